//! Presence checks for submitted feature records

use crate::error::PredictError;
use crate::types::attribute::Attribute;
use crate::types::features::FeatureRecord;

/// Checks that every required attribute is present in a feature record.
///
/// Values are not inspected here; unknown labels surface during encoding.
pub struct InputValidator {
    required: Vec<Attribute>,
}

impl InputValidator {
    /// Validator requiring all five model attributes.
    pub fn new() -> Self {
        Self::with_required(Attribute::ALL.to_vec())
    }

    pub fn with_required(required: Vec<Attribute>) -> Self {
        Self { required }
    }

    /// Fails with every missing attribute, in declaration order.
    pub fn validate(&self, record: &FeatureRecord) -> Result<(), PredictError> {
        let missing: Vec<Attribute> = self
            .required
            .iter()
            .copied()
            .filter(|attribute| !record.contains(*attribute))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PredictError::MissingFeature(missing))
        }
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}
