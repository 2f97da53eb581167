//! Distinct attribute labels derived from the haircut dataset

use crate::codec::CategoryCodec;
use crate::types::attribute::Attribute;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// A dataset label the codec has no code for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDrift {
    pub attribute: Attribute,
    pub label: String,
}

/// Distinct labels observed for each attribute, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    values: BTreeMap<Attribute, BTreeSet<String>>,
    rows: usize,
}

impl AttributeCatalog {
    /// Load the catalog from a CSV file with a header row
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        let catalog = Self::from_reader(file)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;

        info!(
            path = %path.display(),
            rows = catalog.rows,
            "Dataset loaded"
        );
        Ok(catalog)
    }

    /// Build the catalog from CSV data. All five attribute columns must be
    /// present; other columns are ignored, as are empty cells.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = csv.headers().context("Failed to read CSV header")?.clone();
        let mut columns = Vec::with_capacity(Attribute::ALL.len());
        for attribute in Attribute::ALL {
            let index = headers
                .iter()
                .position(|h| h.trim() == attribute.column_name())
                .with_context(|| format!("Dataset has no '{}' column", attribute))?;
            columns.push((attribute, index));
        }

        let mut values: BTreeMap<Attribute, BTreeSet<String>> = Attribute::ALL
            .into_iter()
            .map(|a| (a, BTreeSet::new()))
            .collect();
        let mut rows = 0;

        for record in csv.records() {
            let record = record.with_context(|| format!("Malformed CSV row {}", rows + 1))?;
            rows += 1;

            for &(attribute, index) in &columns {
                if let Some(cell) = record.get(index).filter(|c| !c.is_empty()) {
                    values
                        .entry(attribute)
                        .or_default()
                        .insert(cell.to_string());
                }
            }
        }

        Ok(Self { values, rows })
    }

    /// Distinct labels for an attribute, sorted
    pub fn distinct_values(&self, attribute: Attribute) -> Vec<String> {
        self.values
            .get(&attribute)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of data rows read
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Dataset labels the codec cannot encode, in attribute then label order
    pub fn drift(&self, codec: &CategoryCodec) -> Vec<LabelDrift> {
        self.values
            .iter()
            .flat_map(|(&attribute, labels)| {
                labels
                    .iter()
                    .filter(move |label| !codec.is_known(attribute, label))
                    .map(move |label| LabelDrift {
                        attribute,
                        label: label.clone(),
                    })
            })
            .collect()
    }

    /// Log any drift, or fail when `fail_on_drift` is set
    pub fn check_drift(&self, codec: &CategoryCodec, fail_on_drift: bool) -> Result<()> {
        let drift = self.drift(codec);
        if drift.is_empty() {
            info!("Dataset labels match the compiled-in category codes");
            return Ok(());
        }

        for d in &drift {
            warn!(attribute = %d.attribute, label = %d.label, "Dataset label has no category code");
        }

        if fail_on_drift {
            anyhow::bail!(
                "Dataset contains {} label(s) unknown to the category codec",
                drift.len()
            );
        }
        Ok(())
    }
}
