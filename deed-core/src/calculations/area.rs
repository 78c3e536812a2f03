//! Area and length unit conversion.

use rust_decimal::Decimal;

use super::rates::{
    METERS_PER_FOOT, SQ_FT_PER_SQ_METER, SQ_METERS_PER_ACRE, SQ_METERS_PER_BIGHA,
    SQ_METERS_PER_HECTARE, SQ_METERS_PER_KANAL, SQ_METERS_PER_MARLA, SQ_METERS_PER_SQ_FOOT,
    SQ_METERS_PER_SQ_YARD,
};
use crate::models::{AreaUnit, LengthUnit};

fn sq_meters_per_unit(unit: AreaUnit) -> Decimal {
    match unit {
        AreaUnit::SqMeters => Decimal::ONE,
        AreaUnit::SqFeet => SQ_METERS_PER_SQ_FOOT,
        AreaUnit::SqYards => SQ_METERS_PER_SQ_YARD,
        AreaUnit::Acre => SQ_METERS_PER_ACRE,
        AreaUnit::Hectare => SQ_METERS_PER_HECTARE,
        AreaUnit::Bigha => SQ_METERS_PER_BIGHA,
        AreaUnit::Kanal => SQ_METERS_PER_KANAL,
        AreaUnit::Marla => SQ_METERS_PER_MARLA,
    }
}

/// Converts an area in `unit` to square meters, or `None` if the result
/// does not fit in a [`Decimal`].
///
/// ```
/// use rust_decimal_macros::dec;
/// use deed_core::AreaUnit;
/// use deed_core::calculations::to_sq_meters;
///
/// assert_eq!(to_sq_meters(dec!(2), AreaUnit::Hectare), Some(dec!(20000)));
/// ```
pub fn to_sq_meters(
    value: Decimal,
    unit: AreaUnit,
) -> Option<Decimal> {
    value.checked_mul(sq_meters_per_unit(unit))
}

/// Converts square meters back to `unit`, using the same table as
/// [`to_sq_meters`].
pub fn from_sq_meters(
    sq_meters: Decimal,
    unit: AreaUnit,
) -> Option<Decimal> {
    sq_meters.checked_div(sq_meters_per_unit(unit))
}

pub fn length_to_meters(
    value: Decimal,
    unit: LengthUnit,
) -> Decimal {
    match unit {
        LengthUnit::Meters => value,
        LengthUnit::Feet => value * METERS_PER_FOOT,
    }
}

pub fn sq_meters_to_sq_ft(sq_meters: Decimal) -> Option<Decimal> {
    sq_meters.checked_mul(SQ_FT_PER_SQ_METER)
}

pub fn sq_ft_to_sq_meters(sq_ft: Decimal) -> Decimal {
    sq_ft / SQ_FT_PER_SQ_METER
}
