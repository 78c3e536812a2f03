use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Non-fatal observations made while valuing a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ValuationWarning {
    /// Constructed area is larger than the plot footprint. Common for
    /// multi-floor buildings, so it is reported rather than rejected.
    BuildupExceedsPlot {
        buildup_sq_meters: Decimal,
        plot_sq_meters: Decimal,
    },
}

/// Output of the deed valuation. Recomputed on demand, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub total_plot_area_sq_meters: Decimal,
    pub total_buildup_area_sq_meters: Decimal,

    /// Plot area × circle rate, with the double-side-road premium applied.
    pub base_circle_rate_value: Decimal,
    pub buildup_value: Decimal,
    pub addition_charges: Decimal,

    /// Base value plus built-up value plus addition charges.
    pub final_circle_rate_value: Decimal,

    /// Higher of the declared sale price and the circle-rate value.
    pub final_value: Decimal,

    /// Stamp duty before any concession.
    pub gross_stamp_duty: Decimal,
    pub deduction_amount: Decimal,
    pub stamp_duty: Decimal,
    pub registration_charge: Decimal,
    pub final_payable_amount: Decimal,

    #[serde(default)]
    pub warnings: Vec<ValuationWarning>,
}
