//! Fixed label-to-code mappings for each categorical attribute.
//!
//! The tables are compiled in rather than derived from the dataset: the
//! model was fit on exactly these codes, and the dataset may carry labels the
//! model never saw.

use crate::error::PredictError;
use crate::types::attribute::Attribute;

const GENDER_HAIRCUT: &[(&str, i64)] = &[("Male", 0), ("Female", 1)];

const HAIR_LENGTH: &[(&str, i64)] = &[("Short", 0), ("Medium", 1), ("Long", 2)];

const FACE_SHAPE: &[(&str, i64)] = &[
    ("Oval", 0),
    ("Round", 1),
    ("Square", 2),
    ("Heart", 3),
    ("Diamond", 4),
];

const HAIR_TYPE: &[(&str, i64)] = &[("Straight", 0), ("Wavy", 1), ("Curly", 2)];

const HAIR_DENSITY: &[(&str, i64)] = &[("Thin", 0), ("Medium", 1), ("Thick", 2)];

/// Maps human-readable labels to the integer codes the model expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryCodec;

impl CategoryCodec {
    pub fn new() -> Self {
        Self
    }

    fn table(attribute: Attribute) -> &'static [(&'static str, i64)] {
        match attribute {
            Attribute::GenderHaircut => GENDER_HAIRCUT,
            Attribute::HairLength => HAIR_LENGTH,
            Attribute::FaceShape => FACE_SHAPE,
            Attribute::HairType => HAIR_TYPE,
            Attribute::HairDensity => HAIR_DENSITY,
        }
    }

    /// Code for `label`, or `UnknownCategory` if the label is not declared.
    ///
    /// Matching is exact and case-sensitive.
    pub fn encode(&self, attribute: Attribute, label: &str) -> Result<i64, PredictError> {
        Self::table(attribute)
            .iter()
            .find(|(known, _)| *known == label)
            .map(|&(_, code)| code)
            .ok_or_else(|| PredictError::UnknownCategory {
                attribute,
                label: label.to_string(),
            })
    }

    /// Label for `code`, if declared.
    pub fn decode(&self, attribute: Attribute, code: i64) -> Option<&'static str> {
        Self::table(attribute)
            .iter()
            .find(|&&(_, known)| known == code)
            .map(|&(label, _)| label)
    }

    /// Declared labels in code order.
    pub fn labels(&self, attribute: Attribute) -> Vec<&'static str> {
        Self::table(attribute).iter().map(|&(label, _)| label).collect()
    }

    pub fn is_known(&self, attribute: Attribute, label: &str) -> bool {
        Self::table(attribute).iter().any(|(known, _)| *known == label)
    }
}
