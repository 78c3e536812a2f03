use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Agriculture,
    Commercial,
    Industrial,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Agriculture => "agriculture",
            Self::Commercial => "commercial",
            Self::Industrial => "industrial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Some(Self::Residential),
            "agriculture" | "agricultural" => Some(Self::Agriculture),
            "commercial" => Some(Self::Commercial),
            "industrial" => Some(Self::Industrial),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotType {
    Vacant,
    Buildup,
    Flat,
    Multistory,
}

impl PlotType {
    /// Flats and multistory units take their area from the room or
    /// covered-area figures rather than from a declared plot area.
    pub fn derives_area_from_structure(&self) -> bool {
        matches!(self, Self::Flat | Self::Multistory)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaInputMode {
    #[default]
    Total,
    Dimensions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    #[default]
    SqMeters,
    SqFeet,
    SqYards,
    Acre,
    Hectare,
    Bigha,
    Kanal,
    Marla,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 8] = [
        Self::SqMeters,
        Self::SqFeet,
        Self::SqYards,
        Self::Acre,
        Self::Hectare,
        Self::Bigha,
        Self::Kanal,
        Self::Marla,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Meters,
    #[default]
    Feet,
}

/// Built-up sub-type for commercial plots; each is valued at its own rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommercialBuildupKind {
    SingleShop,
    MultipleShops,
    Mall,
}

/// Physical facts about the plot being conveyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFacts {
    pub property_type: PropertyType,
    pub plot_type: PlotType,

    #[serde(default)]
    pub area_input_mode: AreaInputMode,

    /// Declared plot area, used in [`AreaInputMode::Total`].
    #[serde(default)]
    pub area: Option<Decimal>,
    #[serde(default)]
    pub area_unit: AreaUnit,

    /// Plot sides, used in [`AreaInputMode::Dimensions`].
    #[serde(default)]
    pub length: Option<Decimal>,
    #[serde(default)]
    pub width: Option<Decimal>,
    #[serde(default)]
    pub dimension_unit: LengthUnit,

    /// Constructed area of a residential built-up plot, in square feet.
    #[serde(default)]
    pub buildup_area_sq_ft: Option<Decimal>,

    /// Covered area of a multistory unit, in square feet.
    #[serde(default)]
    pub covered_area_sq_ft: Option<Decimal>,

    #[serde(default)]
    pub commercial_kind: Option<CommercialBuildupKind>,
}

impl PropertyFacts {
    /// Facts for a plot declared by total area.
    pub fn with_total_area(
        property_type: PropertyType,
        plot_type: PlotType,
        area: Decimal,
        area_unit: AreaUnit,
    ) -> Self {
        Self {
            property_type,
            plot_type,
            area_input_mode: AreaInputMode::Total,
            area: Some(area),
            area_unit,
            length: None,
            width: None,
            dimension_unit: LengthUnit::default(),
            buildup_area_sq_ft: None,
            covered_area_sq_ft: None,
            commercial_kind: None,
        }
    }

    /// Facts for a plot declared by its sides.
    pub fn with_dimensions(
        property_type: PropertyType,
        plot_type: PlotType,
        length: Decimal,
        width: Decimal,
        unit: LengthUnit,
    ) -> Self {
        Self {
            area_input_mode: AreaInputMode::Dimensions,
            area: None,
            length: Some(length),
            width: Some(width),
            dimension_unit: unit,
            ..Self::with_total_area(property_type, plot_type, Decimal::ZERO, AreaUnit::SqMeters)
        }
    }
}
