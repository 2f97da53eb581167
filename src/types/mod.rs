//! Type definitions for the haircut recommender

pub mod attribute;
pub mod features;

pub use attribute::Attribute;
pub use features::{EncodedRow, FeatureRecord, Label, PredictRequest, PredictResponse};
