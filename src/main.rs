use std::process::ExitCode;

fn main() -> ExitCode {
    match cars_predict::app::run() {
        Ok(_) => ExitCode::SUCCESS,
        // Already reported by `app::run`.
        Err(err) => ExitCode::from(err.exit_code()),
    }
}
