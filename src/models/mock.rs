//! In-process classifiers for tests

use crate::models::inference::Classifier;
use crate::types::features::{EncodedRow, Label};
use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// Deterministic stand-in for a trained model: recommends by gender code
/// and counts calls.
pub struct LookupClassifier {
    calls: AtomicU64,
}

impl LookupClassifier {
    pub fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Classifier for LookupClassifier {
    fn name(&self) -> &str {
        "lookup"
    }

    fn predict(&self, row: &EncodedRow) -> Result<Label> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let label = match row.codes() {
            [0, 0, ..] => "Crew Cut",
            [0, ..] => "Pompadour",
            [1, ..] => "Bob",
            _ => "Undercut",
        };
        Ok(Label::Text(label.to_string()))
    }
}

/// Classifier whose every call fails
pub struct FailingClassifier {
    message: String,
}

impl FailingClassifier {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Classifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict(&self, _row: &EncodedRow) -> Result<Label> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}

/// Classifier that panics mid-inference
pub struct PanickingClassifier;

impl Classifier for PanickingClassifier {
    fn name(&self) -> &str {
        "panicking"
    }

    fn predict(&self, _row: &EncodedRow) -> Result<Label> {
        panic!("inference panicked")
    }
}
