//! Per-request feature data structures

use crate::types::attribute::Attribute;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Raw feature values submitted by a client, keyed by attribute column name.
///
/// Values are kept as raw JSON so presence can be checked independently of
/// whether the value is a usable label. Unrecognized keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRecord(HashMap<String, Value>);

impl FeatureRecord {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builder-style insert of a string label.
    pub fn with(mut self, attribute: Attribute, label: &str) -> Self {
        self.insert(attribute, label);
        self
    }

    pub fn insert(&mut self, attribute: Attribute, label: &str) {
        self.0.insert(
            attribute.column_name().to_string(),
            Value::String(label.to_string()),
        );
    }

    /// Whether a value for the attribute was submitted at all.
    pub fn contains(&self, attribute: Attribute) -> bool {
        self.0.contains_key(attribute.column_name())
    }

    /// Raw submitted value for the attribute.
    pub fn get(&self, attribute: Attribute) -> Option<&Value> {
        self.0.get(attribute.column_name())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Value>> for FeatureRecord {
    fn from(values: HashMap<String, Value>) -> Self {
        Self(values)
    }
}

/// Integer codes for one request, in the model's column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedRow([i64; 5]);

impl EncodedRow {
    pub fn new(codes: [i64; 5]) -> Self {
        Self(codes)
    }

    pub fn codes(&self) -> &[i64] {
        &self.0
    }

    /// Code for a single attribute.
    pub fn get(&self, attribute: Attribute) -> i64 {
        self.0[attribute as usize]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_f32(&self) -> Vec<f32> {
        self.0.iter().map(|&c| c as f32).collect()
    }
}

/// A predicted haircut label in whatever form the model emits it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Code(i64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Code(code) => write!(f, "{}", code),
            Label::Text(text) => f.write_str(text),
        }
    }
}

/// Body of `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub features: FeatureRecord,
}

/// Successful `POST /predict` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: Label,
}
