//! Classifier abstraction and the prediction invoker

use crate::config::{InputType, ModelConfig};
use crate::error::PredictError;
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::types::features::{EncodedRow, Label};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info};

/// A trained model that maps one encoded row to one label.
pub trait Classifier: Send + Sync {
    /// Model name for logs
    fn name(&self) -> &str;

    /// Predict the label for a single row
    fn predict(&self, row: &EncodedRow) -> Result<Label>;
}

/// Classifier backed by an ONNX Runtime session
pub struct OnnxClassifier {
    /// ort sessions need exclusive access to run
    model: Mutex<LoadedModel>,
    name: String,
    input_type: InputType,
}

impl OnnxClassifier {
    /// Load the classifier described by the model configuration
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let loader = ModelLoader::with_threads(config.onnx_threads)?;
        let name = Path::new(&config.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model")
            .to_string();
        let model = loader.load_model(&config.path, &name)?;

        Ok(Self {
            model: Mutex::new(model),
            name,
            input_type: config.input_type,
        })
    }

    fn run(&self, model: &mut LoadedModel, row: &EncodedRow) -> Result<Label> {
        use ort::value::Tensor;

        // Input tensor shape [1, num_features]
        let shape = vec![1_i64, row.len() as i64];
        let input_name = model.input_name.clone();
        let output_name = model.output_name.clone();

        let outputs = match self.input_type {
            InputType::Float => {
                let tensor = Tensor::from_array((shape, row.to_f32()))
                    .context("Failed to create input tensor")?;
                model.session.run(ort::inputs![input_name.as_str() => tensor])?
            }
            InputType::Int64 => {
                let tensor = Tensor::from_array((shape, row.codes().to_vec()))
                    .context("Failed to create input tensor")?;
                model.session.run(ort::inputs![input_name.as_str() => tensor])?
            }
        };

        let output = outputs
            .get(output_name.as_str())
            .with_context(|| format!("Model produced no output named {}", output_name))?;

        // Classifiers trained on integer targets emit int64 labels,
        // those trained on class names emit strings
        if let Ok((_, labels)) = output.try_extract_tensor::<i64>() {
            return labels
                .first()
                .map(|&code| Label::Code(code))
                .context("Model returned an empty label tensor");
        }

        let (_, labels) = output
            .try_extract_strings()
            .context("Model label output is neither int64 nor string")?;
        labels
            .into_iter()
            .next()
            .map(Label::Text)
            .context("Model returned an empty label tensor")
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &EncodedRow) -> Result<Label> {
        // A panic inside a previous run leaves the session itself usable
        let mut model = self.model.lock().unwrap_or_else(PoisonError::into_inner);
        self.run(&mut model, row)
    }
}

/// Forwards encoded rows to the process-wide model, if one was loaded.
pub struct PredictionInvoker {
    model: Option<Arc<dyn Classifier>>,
}

impl PredictionInvoker {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model: Some(model) }
    }

    /// Invoker whose model failed to load; every call yields `ModelUnavailable`.
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    /// Load the ONNX model. A load failure is logged and leaves the invoker
    /// unavailable instead of aborting startup.
    pub fn load(config: &ModelConfig) -> Self {
        match OnnxClassifier::load(config) {
            Ok(classifier) => {
                info!(model = %classifier.name(), "Prediction model ready");
                Self::new(Arc::new(classifier))
            }
            Err(e) => {
                error!(path = %config.path, error = %format!("{:#}", e), "Error loading the model");
                Self::unavailable()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.name())
    }

    /// Single-attempt prediction for one row
    pub fn invoke(&self, row: &EncodedRow) -> Result<Label, PredictError> {
        let model = self.model.as_ref().ok_or(PredictError::ModelUnavailable)?;

        let label = model
            .predict(row)
            .map_err(|e| PredictError::Prediction(format!("{:#}", e)))?;

        debug!(model = %model.name(), row = ?row.codes(), label = %label, "Prediction complete");
        Ok(label)
    }
}
