//! Categorical attributes accepted by the recommendation model

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five categorical attributes the model was trained on.
///
/// Variant order is the model's training column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "Gender Haircut")]
    GenderHaircut,
    #[serde(rename = "Hair Length")]
    HairLength,
    #[serde(rename = "Face Shape")]
    FaceShape,
    #[serde(rename = "Hair Type")]
    HairType,
    #[serde(rename = "Hair Density")]
    HairDensity,
}

impl Attribute {
    /// All attributes in the model's column order.
    pub const ALL: [Attribute; 5] = [
        Attribute::GenderHaircut,
        Attribute::HairLength,
        Attribute::FaceShape,
        Attribute::HairType,
        Attribute::HairDensity,
    ];

    /// Name used as the dataset column and as the request feature key.
    pub fn column_name(&self) -> &'static str {
        match self {
            Attribute::GenderHaircut => "Gender Haircut",
            Attribute::HairLength => "Hair Length",
            Attribute::FaceShape => "Face Shape",
            Attribute::HairType => "Hair Type",
            Attribute::HairDensity => "Hair Density",
        }
    }

    /// camelCase name used for the lookup route (`/hairType`).
    pub fn route_name(&self) -> &'static str {
        match self {
            Attribute::GenderHaircut => "genderHaircut",
            Attribute::HairLength => "hairLength",
            Attribute::FaceShape => "faceShape",
            Attribute::HairType => "hairType",
            Attribute::HairDensity => "hairDensity",
        }
    }

    /// Key of the lookup response object (`hairTypeList`).
    pub fn list_key(&self) -> String {
        format!("{}List", self.route_name())
    }

    /// Parse a column name back into an attribute.
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.column_name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
