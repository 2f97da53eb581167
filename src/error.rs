//! Request-path error taxonomy

use crate::types::attribute::Attribute;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can fail while serving a single prediction request.
///
/// Each failure is terminal for its request only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// No model was loaded at startup
    #[error("Model not loaded")]
    ModelUnavailable,

    /// Required attributes absent from the feature record, in declaration order
    #[error("Missing feature: {}", join_attributes(.0))]
    MissingFeature(Vec<Attribute>),

    /// Label outside the attribute's fixed enumeration
    #[error("Unknown {attribute} category: {label}")]
    UnknownCategory { attribute: Attribute, label: String },

    /// The model call itself failed
    #[error("{0}")]
    Prediction(String),

    /// Body was not JSON or did not carry a `features` object
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

fn join_attributes(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(|a| a.column_name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl PredictError {
    /// HTTP status code for this error.
    ///
    /// Only missing features are reported as client errors; unknown
    /// categories and malformed bodies stay 500 for compatibility.
    pub fn status_code(&self) -> u16 {
        match self {
            PredictError::MissingFeature(_) => 400,
            _ => 500,
        }
    }

    /// Stable name used in metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::ModelUnavailable => "model_unavailable",
            PredictError::MissingFeature(_) => "missing_feature",
            PredictError::UnknownCategory { .. } => "unknown_category",
            PredictError::Prediction(_) => "prediction_error",
            PredictError::MalformedRequest(_) => "malformed_request",
        }
    }
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&PredictError> for ErrorResponse {
    fn from(err: &PredictError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
