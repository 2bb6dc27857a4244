//! Sponsor-partitioned vehicle catalog
//!
//! The catalog is the read-only pool every team shops from. It is built once
//! from a CSV dataset (or directly from records in tests) and then shared by
//! reference with every purchase strategy.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CatalogError;

/// A single purchasable vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Sponsor (make) the vehicle belongs to
    pub sponsor: String,
    /// Model name, unique within one sponsor
    pub model: String,
    /// Score contribution, higher is better
    pub efficiency: f64,
    pub price: f64,
}

impl CatalogRecord {
    pub fn new(sponsor: &str, model: &str, efficiency: f64, price: f64) -> Self {
        Self {
            sponsor: sponsor.to_string(),
            model: model.to_string(),
            efficiency,
            price,
        }
    }
}

/// Header names of the four columns the catalog needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub sponsor: String,
    pub model: String,
    pub efficiency: String,
    pub price: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            sponsor: "Make".to_string(),
            model: "Model".to_string(),
            efficiency: "MPG-H".to_string(),
            price: "Price".to_string(),
        }
    }
}

/// Read-only, ordered collection of catalog records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    /// Load a catalog from a CSV file with a header row
    pub fn load_csv(path: &Path, columns: &ColumnMap) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        let catalog = Self::from_reader(file, columns)?;
        tracing::debug!(
            path = %path.display(),
            records = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse CSV data from any reader
    ///
    /// Columns not named in `columns` are ignored. Rows are kept in file order.
    pub fn from_reader<R: Read>(reader: R, columns: &ColumnMap) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let index_of = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| CatalogError::MissingColumn {
                    column: name.to_string(),
                })
        };
        let sponsor_idx = index_of(&columns.sponsor)?;
        let model_idx = index_of(&columns.model)?;
        let efficiency_idx = index_of(&columns.efficiency)?;
        let price_idx = index_of(&columns.price)?;

        let mut records = Vec::new();
        for (row_num, row) in csv_reader.records().enumerate() {
            let row = row?;
            let field = |idx: usize| row.get(idx).unwrap_or("");
            let number = |idx: usize, column: &str| {
                let raw = field(idx);
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| CatalogError::InvalidNumber {
                        column: column.to_string(),
                        row: row_num + 1,
                        value: raw.to_string(),
                    })
            };

            records.push(CatalogRecord {
                sponsor: field(sponsor_idx).to_string(),
                model: field(model_idx).to_string(),
                efficiency: number(efficiency_idx, &columns.efficiency)?,
                price: number(price_idx, &columns.price)?,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct sponsors in order of first appearance
    pub fn sponsors(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.sponsor.as_str()) {
                seen.push(&record.sponsor);
            }
        }
        seen
    }

    /// Records belonging to `sponsor`, in catalog order
    pub fn records_for<'a>(
        &'a self,
        sponsor: &'a str,
    ) -> impl Iterator<Item = &'a CatalogRecord> + 'a {
        self.records.iter().filter(move |r| r.sponsor == sponsor)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;
