//! Classifier implementations evaluated over preprocessed feature rows.
//!
//! Each classifier maps a feature row to an index into its `classes` list.
//! The serde `type` tag doubles as the classifier's display name.

use serde::{Deserialize, Serialize};

/// A fitted classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Classifier {
    LogisticRegression(LogisticRegression),
    DecisionTreeClassifier(DecisionTree),
    RandomForestClassifier(RandomForest),
}

impl Classifier {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "LogisticRegression",
            Self::DecisionTreeClassifier(_) => "DecisionTreeClassifier",
            Self::RandomForestClassifier(_) => "RandomForestClassifier",
        }
    }

    pub fn classes(&self) -> &[String] {
        match self {
            Self::LogisticRegression(m) => &m.classes,
            Self::DecisionTreeClassifier(m) => &m.classes,
            Self::RandomForestClassifier(m) => &m.classes,
        }
    }

    /// Predict the class label for one feature row.
    pub fn predict_row(&self, features: &[f64]) -> &str {
        let idx = match self {
            Self::LogisticRegression(m) => m.predict_index(features),
            Self::DecisionTreeClassifier(m) => argmax(&normalized(m.leaf(features))),
            Self::RandomForestClassifier(m) => argmax(&m.predict_proba(features)),
        };
        &self.classes()[idx]
    }

    /// Check internal shapes against the preprocessor's output width.
    pub(crate) fn validate(&self, n_features: usize) -> Result<(), String> {
        let classes = self.classes();
        if classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        match self {
            Self::LogisticRegression(m) => m.validate(n_features),
            Self::DecisionTreeClassifier(m) => m.validate(n_features, classes.len()),
            Self::RandomForestClassifier(m) => {
                if m.trees.is_empty() {
                    return Err("random forest has no trees".to_string());
                }
                m.trees
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, tree)| {
                        tree.validate(n_features, classes.len())
                            .map_err(|e| format!("tree {i}: {e}"))
                    })
            }
        }
    }
}

/// Linear model over the feature row.
///
/// With more than two classes (or two explicit rows) there is one
/// coefficient row per class; a binary model may carry a single row scoring
/// the second class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LogisticRegression {
    fn predict_index(&self, features: &[f64]) -> usize {
        let scores: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();

        if scores.len() == 1 && self.classes.len() == 2 {
            usize::from(scores[0] > 0.0)
        } else {
            argmax(&scores)
        }
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(format!("logistic regression needs at least 2 classes, got {n_classes}"));
        }
        let expected_rows = if n_classes == 2 && self.coef.len() == 1 { 1 } else { n_classes };
        if self.coef.len() != expected_rows || self.intercept.len() != expected_rows {
            return Err(format!(
                "logistic regression expects {expected_rows} coefficient rows for {n_classes} classes, got {} (intercepts: {})",
                self.coef.len(),
                self.intercept.len()
            ));
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != n_features) {
            return Err(format!(
                "coefficient row has {} weights but the preprocessor yields {n_features} features",
                row.len()
            ));
        }
        Ok(())
    }
}

/// One node of a binary decision tree.
///
/// Split nodes send a row left when `features[feature] <= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// A decision tree stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Only meaningful for a standalone tree; forest members inherit the forest's classes.
    #[serde(default)]
    pub classes: Vec<String>,
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk to the leaf for `features` and return its class weights.
    fn leaf(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Child indices must point forward, which also rules out cycles.
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature} but only {n_features} exist"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child index {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(format!(
                            "leaf {idx} has {} class weights, expected {n_classes}",
                            value.len()
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Bagged trees whose normalized leaf distributions are averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub classes: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(normalized(tree.leaf(features))) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        proba
    }
}

fn normalized(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.iter().map(|w| w / total).collect()
    } else {
        weights.to_vec()
    }
}

/// Index of the largest value; the first one wins on ties.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
