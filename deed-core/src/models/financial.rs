use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit area the published circle rate is quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleRateBasis {
    #[default]
    PerSqFoot,
    PerSqMeter,
}

impl CircleRateBasis {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "per_sq_foot" | "sq_ft" | "sq_feet" => Some(Self::PerSqFoot),
            "per_sq_meter" | "sq_m" | "sq_meters" => Some(Self::PerSqMeter),
            _ => None,
        }
    }
}

/// Stamp-duty concession claimed on the transfer. At most one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Deduction {
    #[default]
    None,
    FemaleBuyer,
    ExServiceman,
    Handicapped,
    OtherPercent { percent: Decimal },
}

impl Deduction {
    /// Resolves independently ticked concessions to a single one.
    ///
    /// Priority is female buyer, ex-serviceman, handicapped, then a custom
    /// percentage; the first that is set wins.
    pub fn from_flags(
        female_buyer: bool,
        ex_serviceman: bool,
        handicapped: bool,
        other_percent: Option<Decimal>,
    ) -> Self {
        if female_buyer {
            Self::FemaleBuyer
        } else if ex_serviceman {
            Self::ExServiceman
        } else if handicapped {
            Self::Handicapped
        } else if let Some(percent) = other_percent {
            Self::OtherPercent { percent }
        } else {
            Self::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInputs {
    /// Consideration declared by the parties.
    pub sale_price: Decimal,

    /// Government-published reference rate per unit area.
    pub circle_rate_per_unit_area: Decimal,

    #[serde(default)]
    pub circle_rate_basis: CircleRateBasis,

    #[serde(default)]
    pub deduction: Deduction,

    #[serde(default)]
    pub double_side_road: bool,
}

impl FinancialInputs {
    pub fn new(
        sale_price: Decimal,
        circle_rate_per_unit_area: Decimal,
    ) -> Self {
        Self {
            sale_price,
            circle_rate_per_unit_area,
            circle_rate_basis: CircleRateBasis::default(),
            deduction: Deduction::None,
            double_side_road: false,
        }
    }
}
