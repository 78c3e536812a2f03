//! Valuation input files for `deedctl valuate`.
//!
//! The `[property]` and `[additions]` tables use the same camelCase keys as
//! the submission JSON. `[financial]` is written the way a clerk fills the
//! paper form: amounts as text (grouping commas allowed) and concessions as
//! independent yes/no flags.
//!
//! ```toml
//! [property]
//! propertyType = "residential"
//! plotType = "vacant"
//! area = 100
//! areaUnit = "sq_meters"
//!
//! [financial]
//! sale_price = "25,00,000"
//! circle_rate = "40,000"
//! circle_rate_basis = "per_sq_meter"
//! female_buyer = true
//! ```

use std::path::Path;

use deed_core::calculations::ValuationWorksheet;
use deed_core::{
    CircleRateBasis, Deduction, FinancialInputs, PropertyFacts, PropertyType, StructureAdditions,
    ValuationError, ValuationResult,
};
use deed_data::CircleRateSchedule;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::utils::{ParseDecimalError, parse_decimal, parse_optional_decimal};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("invalid valuation input: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Amount(#[from] ParseDecimalError),

    #[error("unknown circle rate basis '{0}' (expected per_sq_foot or per_sq_meter)")]
    UnknownBasis(String),

    #[error("no circle rate given; set financial.circle_rate, pass --circle-rate, or use --rates with a locality")]
    MissingCircleRate,

    #[error("no {property_type} circle rate published for '{locality}'")]
    UnknownLocality {
        locality: String,
        property_type: PropertyType,
    },

    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinancialSection {
    pub sale_price: String,
    pub circle_rate: Option<String>,
    pub circle_rate_basis: Option<String>,
    pub locality: Option<String>,
    pub female_buyer: bool,
    pub ex_serviceman: bool,
    pub handicapped: bool,
    pub other_percent: Option<String>,
    pub double_side_road: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValuationInput {
    pub property: PropertyFacts,
    #[serde(default)]
    pub financial: FinancialSection,
    #[serde(default)]
    pub additions: StructureAdditions,
}

/// Where the circle rate comes from when the input file does not settle it.
#[derive(Debug, Default, Clone, Copy)]
pub struct RateSource<'a> {
    /// `--circle-rate`; beats everything else.
    pub explicit: Option<Decimal>,
    pub schedule: Option<&'a CircleRateSchedule>,
    /// `--locality`; falls back to `financial.locality`.
    pub locality: Option<&'a str>,
}

impl ValuationInput {
    pub fn from_toml(text: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path).map_err(|e| InputError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text)
    }

    /// Resolves the `[financial]` table into calculator inputs.
    ///
    /// The circle rate is taken from `source.explicit`, then from the
    /// schedule when a locality is known, then from the file itself. A rate
    /// found in the schedule brings its own basis with it.
    pub fn financial_inputs(
        &self,
        source: RateSource<'_>,
    ) -> Result<FinancialInputs, InputError> {
        let f = &self.financial;

        let mut basis = match f.circle_rate_basis.as_deref() {
            Some(text) => CircleRateBasis::parse(text)
                .ok_or_else(|| InputError::UnknownBasis(text.to_string()))?,
            None => CircleRateBasis::default(),
        };

        let locality = source.locality.or(f.locality.as_deref());
        let circle_rate = if let Some(rate) = source.explicit {
            rate
        } else if let (Some(schedule), Some(locality)) = (source.schedule, locality) {
            let property_type = self.property.property_type;
            let record = schedule.lookup(locality, property_type).ok_or_else(|| {
                InputError::UnknownLocality {
                    locality: locality.to_string(),
                    property_type,
                }
            })?;
            debug!(locality = %record.locality, rate = %record.rate, "circle rate from schedule");
            basis = record.basis;
            record.rate
        } else {
            let text = f.circle_rate.as_deref().unwrap_or_default();
            parse_optional_decimal(text)?.ok_or(InputError::MissingCircleRate)?
        };

        let other_percent = match f.other_percent.as_deref() {
            Some(text) => parse_optional_decimal(text)?,
            None => None,
        };

        Ok(FinancialInputs {
            sale_price: parse_decimal(&f.sale_price)?,
            circle_rate_per_unit_area: circle_rate,
            circle_rate_basis: basis,
            deduction: Deduction::from_flags(
                f.female_buyer,
                f.ex_serviceman,
                f.handicapped,
                other_percent,
            ),
            double_side_road: f.double_side_road,
        })
    }

    pub fn valuate(
        &self,
        source: RateSource<'_>,
    ) -> Result<ValuationResult, InputError> {
        let financial = self.financial_inputs(source)?;
        Ok(ValuationWorksheet::new(&self.property, &financial, &self.additions).calculate()?)
    }
}
