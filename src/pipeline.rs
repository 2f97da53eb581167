//! Validate, encode and predict for a single feature record

use crate::error::PredictError;
use crate::models::inference::PredictionInvoker;
use crate::row_assembler::RowAssembler;
use crate::types::features::{FeatureRecord, Label};
use crate::validator::InputValidator;

/// The predict path: presence check, encoding, then one model call.
pub struct PredictionPipeline {
    validator: InputValidator,
    assembler: RowAssembler,
    invoker: PredictionInvoker,
}

impl PredictionPipeline {
    pub fn new(invoker: PredictionInvoker) -> Self {
        Self {
            validator: InputValidator::new(),
            assembler: RowAssembler::new(),
            invoker,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.invoker.is_loaded()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.invoker.model_name()
    }

    /// Model availability is checked before the record is looked at, and
    /// validation completes before any code lookup.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Label, PredictError> {
        if !self.invoker.is_loaded() {
            return Err(PredictError::ModelUnavailable);
        }

        self.validator.validate(record)?;
        let row = self.assembler.assemble(record)?;
        self.invoker.invoke(&row)
    }
}
