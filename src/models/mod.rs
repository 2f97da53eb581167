//! ML model loading and inference components

pub mod inference;
pub mod loader;
#[cfg(test)]
pub(crate) mod mock;

pub use inference::{Classifier, OnnxClassifier, PredictionInvoker};
pub use loader::ModelLoader;
