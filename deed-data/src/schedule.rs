use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use deed_core::{CircleRateBasis, PropertyType};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Problems reading a schedule. `row` is 1-based and counts data rows, so
/// row 1 is the line after the header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CircleRateLoadError {
    #[error("Could not read schedule: {0}")]
    Io(String),

    #[error("Row {row}: {message}")]
    Csv { row: usize, message: String },

    #[error("Row {row}: locality is blank")]
    BlankLocality { row: usize },

    #[error("Row {row}: unknown property type '{value}'")]
    UnknownPropertyType { row: usize, value: String },

    #[error("Row {row}: rate '{value}' is not a number")]
    InvalidRate { row: usize, value: String },

    #[error("Row {row}: rate must be positive, got {rate}")]
    NonPositiveRate { row: usize, rate: Decimal },

    #[error("Row {row}: unknown rate basis '{value}' (expected per_sq_foot or per_sq_meter)")]
    UnknownBasis { row: usize, value: String },

    #[error("Row {row}: duplicate entry for {locality} / {property_type}")]
    Duplicate {
        row: usize,
        locality: String,
        property_type: PropertyType,
    },
}

/// One line of the CSV, before validation.
///
/// | Column          | Meaning                                            |
/// |-----------------|----------------------------------------------------|
/// | `locality`      | Locality or ward name as published                 |
/// | `property_type` | `residential`, `agriculture`, `commercial`, `industrial` |
/// | `rate`          | Rupees per unit area; thousands separators allowed |
/// | `basis`         | `per_sq_foot` (default when blank) or `per_sq_meter` |
#[derive(Debug, Deserialize)]
struct CsvRow {
    locality: String,
    property_type: String,
    rate: String,
    #[serde(default)]
    basis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleRateRecord {
    pub locality: String,
    pub property_type: PropertyType,
    pub rate: Decimal,
    pub basis: CircleRateBasis,
}

impl CsvRow {
    fn into_record(
        self,
        row: usize,
    ) -> Result<CircleRateRecord, CircleRateLoadError> {
        let locality = self.locality.trim().to_string();
        if locality.is_empty() {
            return Err(CircleRateLoadError::BlankLocality { row });
        }

        let property_type = PropertyType::parse(&self.property_type).ok_or_else(|| {
            CircleRateLoadError::UnknownPropertyType {
                row,
                value: self.property_type.clone(),
            }
        })?;

        let cleaned: String = self.rate.trim().chars().filter(|c| *c != ',').collect();
        let rate = Decimal::from_str(&cleaned).map_err(|_| CircleRateLoadError::InvalidRate {
            row,
            value: self.rate.clone(),
        })?;
        if rate <= Decimal::ZERO {
            return Err(CircleRateLoadError::NonPositiveRate { row, rate });
        }

        let basis_text = self.basis.unwrap_or_default();
        let basis = CircleRateBasis::parse(&basis_text)
            .ok_or(CircleRateLoadError::UnknownBasis { row, value: basis_text })?;

        Ok(CircleRateRecord {
            locality,
            property_type,
            rate,
            basis,
        })
    }
}

fn locality_key(locality: &str) -> String {
    locality
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Circle rates keyed by locality and property type.
#[derive(Debug, Clone, Default)]
pub struct CircleRateSchedule {
    entries: HashMap<(String, PropertyType), CircleRateRecord>,
}

impl CircleRateSchedule {
    /// Parse a schedule from any CSV source with a header row.
    pub fn parse<R: Read>(reader: R) -> Result<Self, CircleRateLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut entries = HashMap::new();

        for (i, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
            let row = i + 1;
            let raw = result.map_err(|e| CircleRateLoadError::Csv {
                row,
                message: e.to_string(),
            })?;
            let record = raw.into_record(row)?;

            let key = (locality_key(&record.locality), record.property_type);
            if entries.contains_key(&key) {
                return Err(CircleRateLoadError::Duplicate {
                    row,
                    locality: record.locality,
                    property_type: record.property_type,
                });
            }
            entries.insert(key, record);
        }

        debug!(entries = entries.len(), "parsed circle-rate schedule");
        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CircleRateLoadError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| CircleRateLoadError::Io(format!("{}: {e}", path.display())))?;
        Self::parse(file)
    }

    /// Rate for `locality`, ignoring case and repeated whitespace.
    pub fn lookup(
        &self,
        locality: &str,
        property_type: PropertyType,
    ) -> Option<&CircleRateRecord> {
        self.entries.get(&(locality_key(locality), property_type))
    }

    /// Distinct locality names as first written, sorted.
    pub fn localities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.values().map(|r| r.locality.as_str()).collect();
        names.sort_unstable_by_key(|name| name.to_lowercase());
        names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
