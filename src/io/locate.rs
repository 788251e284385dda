//! File discovery: glob matching and newest-artifact selection.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::{MatchOptions, Pattern, glob_with};
use tracing::debug;

use crate::error::AppError;

/// Shell-like matching: wildcards never match a leading dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// List regular files in `dir` whose names match the glob `pattern`.
///
/// `pattern` supports `*`, `?` and `[...]` classes. A missing directory
/// yields no matches; an unreadable one is an `Io` error. Results keep the
/// order `glob` produces; no further sorting is applied.
pub fn list_matching(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, AppError> {
    let full = format!(
        "{}/{pattern}",
        Pattern::escape(dir.to_string_lossy().trim_end_matches('/'))
    );
    let entries = glob_with(&full, MATCH_OPTIONS).map_err(|source| AppError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let context = format!("Failed to scan '{}'", e.path().display());
            AppError::io(context, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Find the matching file in `dir` with the latest creation time.
///
/// `what` names the artifacts in the `NotFound` error ("trained models").
pub fn locate_latest(dir: &Path, pattern: &str, what: &'static str) -> Result<PathBuf, AppError> {
    let candidates = list_matching(dir, pattern)?;
    debug!(dir = %dir.display(), pattern, count = candidates.len(), "Scanned for {what}");

    let mut stamped = Vec::with_capacity(candidates.len());
    for path in candidates {
        let meta = std::fs::metadata(&path)
            .map_err(|e| AppError::io(format!("Failed to stat '{}'", path.display()), e))?;
        let created = creation_time(&meta)
            .map_err(|e| AppError::io(format!("No timestamp for '{}'", path.display()), e))?;
        stamped.push((path, created));
    }

    newest(stamped).ok_or_else(|| AppError::NotFound {
        what,
        dir: dir.to_path_buf(),
    })
}

/// Birth time where the filesystem records one, modification time otherwise.
fn creation_time(meta: &Metadata) -> std::io::Result<SystemTime> {
    meta.created().or_else(|_| meta.modified())
}

/// Pick the path with the maximum timestamp; the first one wins on ties.
fn newest(stamped: Vec<(PathBuf, SystemTime)>) -> Option<PathBuf> {
    let mut best: Option<(PathBuf, SystemTime)> = None;
    for (path, time) in stamped {
        match &best {
            Some((_, best_time)) if time <= *best_time => {}
            _ => best = Some((path, time)),
        }
    }
    best.map(|(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"{}").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut out: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn matches_prefix_and_suffix() {
        let dir = tempdir().unwrap();
        for name in ["cars_pipe_202401011200.pkl", "cars_pipe_.pkl", "cars_pipe_1.pkl.bak", "other_pipe_1.pkl"] {
            touch(dir.path(), name);
        }

        let found = list_matching(dir.path(), "cars_pipe_*.pkl").unwrap();
        assert_eq!(names(&found), ["cars_pipe_.pkl", "cars_pipe_202401011200.pkl"]);
    }

    #[test]
    fn supports_character_classes() {
        let dir = tempdir().unwrap();
        for name in ["cars_pipe_1.pkl", "cars_pipe_x.pkl"] {
            touch(dir.path(), name);
        }

        let found = list_matching(dir.path(), "cars_pipe_[0-9]*.pkl").unwrap();
        assert_eq!(names(&found), ["cars_pipe_1.pkl"]);
        let latest = locate_latest(dir.path(), "cars_pipe_[0-9]*.pkl", "trained models").unwrap();
        assert_eq!(latest, dir.path().join("cars_pipe_1.pkl"));
    }

    #[test]
    fn wildcard_skips_hidden_files() {
        let dir = tempdir().unwrap();
        touch(dir.path(), ".hidden.json");
        touch(dir.path(), "shown.json");

        assert_eq!(names(&list_matching(dir.path(), "*.json").unwrap()), ["shown.json"]);
        assert_eq!(names(&list_matching(dir.path(), ".*.json").unwrap()), [".hidden.json"]);
    }

    #[test]
    fn directory_name_is_taken_literally() {
        let root = tempdir().unwrap();
        let dir = root.path().join("run[1]");
        std::fs::create_dir(&dir).unwrap();
        touch(&dir, "a.json");

        assert_eq!(names(&list_matching(&dir, "*.json").unwrap()), ["a.json"]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let dir = tempdir().unwrap();
        let err = list_matching(dir.path(), "cars_[.pkl").unwrap_err();
        assert!(matches!(err, AppError::Pattern { .. }));
    }

    #[test]
    fn newest_prefers_max_time_and_first_on_tie() {
        let t0 = SystemTime::UNIX_EPOCH;
        let later = t0 + Duration::from_secs(10);
        let stamped = vec![
            (PathBuf::from("z"), t0),
            (PathBuf::from("b"), later),
            (PathBuf::from("a"), later),
        ];
        assert_eq!(newest(stamped), Some(PathBuf::from("b")));
        assert_eq!(newest(Vec::new()), None);
    }

    #[test]
    fn locate_latest_ignores_lexical_order() {
        let dir = tempdir().unwrap();
        // Created first but lexically last.
        touch(dir.path(), "cars_pipe_z.pkl");
        std::thread::sleep(Duration::from_millis(50));
        touch(dir.path(), "cars_pipe_a.pkl");
        touch(dir.path(), "unrelated.pkl");

        let latest = locate_latest(dir.path(), "cars_pipe_*.pkl", "trained models").unwrap();
        assert_eq!(latest, dir.path().join("cars_pipe_a.pkl"));
    }

    #[test]
    fn locate_latest_reports_not_found() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "model.bin");

        let err = locate_latest(dir.path(), "cars_pipe_*.pkl", "trained models").unwrap_err();
        assert!(matches!(err, AppError::NotFound { what: "trained models", .. }));

        let missing = dir.path().join("nope");
        let err = locate_latest(&missing, "*.pkl", "trained models").unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn list_matching_skips_directories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();
        touch(dir.path(), "a.json");

        let found = list_matching(dir.path(), "*.json").unwrap();
        assert_eq!(found, vec![dir.path().join("a.json")]);
    }
}
