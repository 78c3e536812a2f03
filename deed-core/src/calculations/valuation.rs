//! Stamp-duty valuation for conveyance deeds.
//!
//! # Worksheet
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Normalise the plot area to square meters (and square feet) |
//! | 2    | Built-up value, dispatched on property type and plot type |
//! | 3    | Agricultural addition charges (wells, borewells, trees) |
//! | 4    | Base circle-rate value: plot area × circle rate, +10% on a double-side road |
//! | 5    | Final circle-rate value: step 4 + step 2 + step 3 |
//! | 6    | Final value: higher of declared sale price and step 5 |
//! | 7    | Stamp duty: 7% of step 6, adjusted by at most one concession, floored at zero |
//! | 8    | Registration charge: 1% of step 6 |
//! | 9    | Payable: step 7 + step 8 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use deed_core::{
//!     AreaUnit, FinancialInputs, PlotType, PropertyFacts, PropertyType, StructureAdditions,
//! };
//! use deed_core::calculations::ValuationWorksheet;
//!
//! let property = PropertyFacts::with_total_area(
//!     PropertyType::Residential,
//!     PlotType::Vacant,
//!     dec!(100),
//!     AreaUnit::SqMeters,
//! );
//! let financial = FinancialInputs::new(dec!(500000), dec!(40000));
//! let additions = StructureAdditions::default();
//!
//! let result = ValuationWorksheet::new(&property, &financial, &additions)
//!     .calculate()
//!     .unwrap();
//!
//! assert_eq!(result.base_circle_rate_value, dec!(43055600));
//! assert_eq!(result.final_payable_amount, dec!(3444448));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use super::area::{length_to_meters, sq_ft_to_sq_meters, sq_meters_to_sq_ft, to_sq_meters};
use super::common::{floor_at_zero, round_area, round_money};
use super::rates::{
    BOREWELL_RATE, DOUBLE_SIDE_ROAD_PREMIUM, EX_SERVICEMAN_FLAT_STAMP_DUTY,
    FEMALE_BUYER_REBATE_RATE, HANDICAPPED_REBATE_RATE, HANDICAPPED_REBATE_VALUE_CAP,
    REGISTRATION_RATE, RESIDENTIAL_CONSTRUCTION_RATE, STAMP_DUTY_RATE, WELL_RATE,
    commercial_construction_rate, tree_rate,
};
use crate::models::{
    AreaInputMode, CircleRateBasis, CommercialBuildupKind, Deduction, FinancialInputs, PlotType,
    PropertyFacts, PropertyType, StructureAdditions, ValuationResult, ValuationWarning,
};

/// Input problems that stop a valuation. All are recoverable by editing the
/// form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValuationError {
    #[error("{0} is required")]
    MissingInput(&'static str),

    #[error("plot area is required")]
    MissingArea,

    #[error("plot length and width are both required")]
    MissingDimensions,

    #[error("plot area must be positive, got {0} sq m")]
    NonPositiveArea(Decimal),

    #[error("sale price must be positive, got {0}")]
    NonPositiveSalePrice(Decimal),

    #[error("circle rate must be positive, got {0}")]
    NonPositiveCircleRate(Decimal),

    #[error("deduction percentage cannot be negative, got {0}")]
    NegativeDeductionPercent(Decimal),

    #[error("{field} cannot be negative, got {value}")]
    NegativeStructure { field: &'static str, value: Decimal },

    #[error("amounts derived from {field} are too large to calculate")]
    Overflow { field: &'static str },
}

fn checked(
    value: Option<Decimal>,
    field: &'static str,
) -> Result<Decimal, ValuationError> {
    value.ok_or(ValuationError::Overflow { field })
}

fn non_negative(
    value: Decimal,
    field: &'static str,
) -> Result<Decimal, ValuationError> {
    if value < Decimal::ZERO {
        return Err(ValuationError::NegativeStructure { field, value });
    }
    Ok(value)
}

/// Structure measurements must not be negative, whichever property type
/// ends up reading them.
fn validate_structures(
    property: &PropertyFacts,
    additions: &StructureAdditions,
) -> Result<(), ValuationError> {
    for room in &additions.rooms {
        non_negative(room.length_ft, "additions.rooms")?;
        non_negative(room.width_ft, "additions.rooms")?;
    }
    for shop in &additions.shops {
        non_negative(shop.area_sq_ft, "additions.shops")?;
    }
    for floor in &additions.floors {
        non_negative(floor.area_sq_ft, "additions.floors")?;
    }
    if let Some(area) = property.buildup_area_sq_ft {
        non_negative(area, "buildupAreaSqFt")?;
    }
    if let Some(area) = property.covered_area_sq_ft {
        non_negative(area, "coveredAreaSqFt")?;
    }
    Ok(())
}

/// Plot area held in both units so structure-derived areas stay exact in
/// square feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlotArea {
    sq_meters: Decimal,
    sq_ft: Decimal,
}

impl PlotArea {
    fn from_sq_meters(sq_meters: Decimal) -> Result<Self, ValuationError> {
        Ok(Self {
            sq_meters,
            sq_ft: checked(sq_meters_to_sq_ft(sq_meters), "area")?,
        })
    }

    fn from_sq_ft(sq_ft: Decimal) -> Self {
        Self {
            sq_meters: sq_ft_to_sq_meters(sq_ft),
            sq_ft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct BuiltUp {
    area_sq_ft: Decimal,
    value: Decimal,
}

impl BuiltUp {
    fn priced(
        area_sq_ft: Decimal,
        rate: Decimal,
        field: &'static str,
    ) -> Result<Self, ValuationError> {
        Ok(Self {
            area_sq_ft,
            value: round_money(checked(area_sq_ft.checked_mul(rate), field)?),
        })
    }
}

/// Resolves the plot area of `property` in square meters.
///
/// Flats take the sum of their rooms and multistory units their covered
/// area; both may legitimately be zero. Everything else must resolve to a
/// positive area from the declared total or the two sides.
///
/// # Errors
///
/// [`ValuationError::MissingArea`], [`ValuationError::MissingDimensions`],
/// [`ValuationError::NonPositiveArea`], [`ValuationError::NegativeStructure`]
/// or [`ValuationError::Overflow`].
pub fn plot_area_sq_meters(
    property: &PropertyFacts,
    additions: &StructureAdditions,
) -> Result<Decimal, ValuationError> {
    resolve_plot_area(property, additions).map(|plot| round_area(plot.sq_meters))
}

fn resolve_plot_area(
    property: &PropertyFacts,
    additions: &StructureAdditions,
) -> Result<PlotArea, ValuationError> {
    validate_structures(property, additions)?;

    match property.plot_type {
        PlotType::Flat => {
            let rooms = checked(additions.rooms_area_sq_ft(), "additions.rooms")?;
            return Ok(PlotArea::from_sq_ft(rooms));
        }
        PlotType::Multistory => {
            return Ok(PlotArea::from_sq_ft(
                property.covered_area_sq_ft.unwrap_or(Decimal::ZERO),
            ));
        }
        PlotType::Vacant | PlotType::Buildup => {}
    }

    let sq_meters = match property.area_input_mode {
        AreaInputMode::Total => {
            let area = property.area.ok_or(ValuationError::MissingArea)?;
            checked(to_sq_meters(area, property.area_unit), "area")?
        }
        AreaInputMode::Dimensions => {
            let (Some(length), Some(width)) = (property.length, property.width) else {
                return Err(ValuationError::MissingDimensions);
            };
            let length = length_to_meters(length, property.dimension_unit);
            let width = length_to_meters(width, property.dimension_unit);
            checked(length.checked_mul(width), "dimensions")?
        }
    };

    if sq_meters <= Decimal::ZERO {
        return Err(ValuationError::NonPositiveArea(sq_meters));
    }

    PlotArea::from_sq_meters(sq_meters)
}

/// Calculator for one property valuation.
///
/// Borrows its inputs and holds no other state, so the same inputs always
/// produce the same [`ValuationResult`].
#[derive(Debug, Clone)]
pub struct ValuationWorksheet<'a> {
    property: &'a PropertyFacts,
    financial: &'a FinancialInputs,
    additions: &'a StructureAdditions,
}

impl<'a> ValuationWorksheet<'a> {
    pub fn new(
        property: &'a PropertyFacts,
        financial: &'a FinancialInputs,
        additions: &'a StructureAdditions,
    ) -> Self {
        Self {
            property,
            financial,
            additions,
        }
    }

    /// Runs every step of the worksheet.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError`] when the sale price or circle rate is not
    /// positive, when a custom deduction percentage is negative, or when the
    /// plot area is missing or does not resolve to a positive quantity (flats
    /// and multistory units excepted). Negative structure measurements and
    /// amounts beyond the range of [`Decimal`] are rejected too.
    pub fn calculate(&self) -> Result<ValuationResult, ValuationError> {
        self.validate_financials()?;

        // Step 1
        let plot = self.plot_area()?;

        // Steps 2 and 3
        let built_up = self.built_up()?;
        let addition_charges = self.addition_charges()?;

        let buildup_sq_meters = sq_ft_to_sq_meters(built_up.area_sq_ft);
        let mut warnings = Vec::new();
        if !self.property.plot_type.derives_area_from_structure()
            && buildup_sq_meters > plot.sq_meters
        {
            warn!(
                buildup_sq_meters = %round_area(buildup_sq_meters),
                plot_sq_meters = %round_area(plot.sq_meters),
                "Built-up area exceeds plot area"
            );
            warnings.push(ValuationWarning::BuildupExceedsPlot {
                buildup_sq_meters: round_area(buildup_sq_meters),
                plot_sq_meters: round_area(plot.sq_meters),
            });
        }

        // Step 4
        let base_circle_rate_value = self.base_circle_rate_value(plot)?;

        // Step 5
        let final_circle_rate_value = round_money(checked(
            base_circle_rate_value
                .checked_add(built_up.value)
                .and_then(|value| value.checked_add(addition_charges)),
            "circleRate",
        )?);

        // Step 6
        let final_value = self.final_value(final_circle_rate_value);

        // Step 7
        let gross_stamp_duty = round_money(final_value * STAMP_DUTY_RATE);
        let stamp_duty = self.adjusted_stamp_duty(final_value, gross_stamp_duty)?;

        // Step 8
        let registration_charge = round_money(final_value * REGISTRATION_RATE);

        // Step 9
        let final_payable_amount = round_money(stamp_duty + registration_charge);

        debug!(
            final_value = %final_value,
            stamp_duty = %stamp_duty,
            registration_charge = %registration_charge,
            "Valuation complete"
        );

        Ok(ValuationResult {
            total_plot_area_sq_meters: round_area(plot.sq_meters),
            total_buildup_area_sq_meters: round_area(buildup_sq_meters),
            base_circle_rate_value,
            buildup_value: built_up.value,
            addition_charges,
            final_circle_rate_value,
            final_value,
            gross_stamp_duty,
            // The flat ex-serviceman duty can exceed a small gross duty.
            deduction_amount: floor_at_zero(gross_stamp_duty - stamp_duty),
            stamp_duty,
            registration_charge,
            final_payable_amount,
            warnings,
        })
    }

    fn validate_financials(&self) -> Result<(), ValuationError> {
        let financial = self.financial;
        if financial.sale_price <= Decimal::ZERO {
            return Err(ValuationError::NonPositiveSalePrice(financial.sale_price));
        }
        if financial.circle_rate_per_unit_area <= Decimal::ZERO {
            return Err(ValuationError::NonPositiveCircleRate(
                financial.circle_rate_per_unit_area,
            ));
        }
        if let Deduction::OtherPercent { percent } = financial.deduction {
            if percent < Decimal::ZERO {
                return Err(ValuationError::NegativeDeductionPercent(percent));
            }
        }
        Ok(())
    }

    /// Step 1: plot area.
    fn plot_area(&self) -> Result<PlotArea, ValuationError> {
        resolve_plot_area(self.property, self.additions)
    }

    /// Step 2: constructed area and its value.
    fn built_up(&self) -> Result<BuiltUp, ValuationError> {
        let property = self.property;
        let additions = self.additions;

        match (property.property_type, property.plot_type) {
            (PropertyType::Residential, PlotType::Buildup) => BuiltUp::priced(
                property.buildup_area_sq_ft.unwrap_or(Decimal::ZERO),
                RESIDENTIAL_CONSTRUCTION_RATE,
                "buildupAreaSqFt",
            ),
            (PropertyType::Residential, PlotType::Flat) => BuiltUp::priced(
                checked(additions.rooms_area_sq_ft(), "additions.rooms")?,
                RESIDENTIAL_CONSTRUCTION_RATE,
                "additions.rooms",
            ),
            (PropertyType::Residential, PlotType::Multistory) => BuiltUp::priced(
                property.covered_area_sq_ft.unwrap_or(Decimal::ZERO),
                RESIDENTIAL_CONSTRUCTION_RATE,
                "coveredAreaSqFt",
            ),
            (PropertyType::Commercial, PlotType::Buildup) => {
                let Some(kind) = property.commercial_kind else {
                    warn!("Commercial built-up plot has no built-up kind; no built-up value added");
                    return Ok(BuiltUp::default());
                };
                let (area_sq_ft, field) = match kind {
                    CommercialBuildupKind::Mall => {
                        (additions.floors_area_sq_ft(), "additions.floors")
                    }
                    CommercialBuildupKind::SingleShop | CommercialBuildupKind::MultipleShops => {
                        (additions.shops_area_sq_ft(), "additions.shops")
                    }
                };
                let area_sq_ft = checked(area_sq_ft, field)?;
                BuiltUp::priced(area_sq_ft, commercial_construction_rate(kind), field)
            }
            (property_type, plot_type) => {
                debug!(
                    property_type = %property_type,
                    plot_type = ?plot_type,
                    "No built-up valuation for this combination"
                );
                Ok(BuiltUp::default())
            }
        }
    }

    /// Step 3: wells, borewells and trees on agricultural land.
    fn addition_charges(&self) -> Result<Decimal, ValuationError> {
        if self.property.property_type != PropertyType::Agriculture {
            return Ok(Decimal::ZERO);
        }

        let additions = self.additions;
        let wells = Decimal::from(additions.wells) * WELL_RATE;
        let borewells = Decimal::from(additions.borewells) * BOREWELL_RATE;
        let total = additions
            .trees
            .iter()
            .map(|t| Decimal::from(t.count) * tree_rate(t.species))
            .try_fold(wells + borewells, |total, trees| total.checked_add(trees));

        Ok(round_money(checked(total, "additions")?))
    }

    /// Step 4: plot area priced at the circle rate.
    fn base_circle_rate_value(
        &self,
        plot: PlotArea,
    ) -> Result<Decimal, ValuationError> {
        let area = match self.financial.circle_rate_basis {
            CircleRateBasis::PerSqFoot => plot.sq_ft,
            CircleRateBasis::PerSqMeter => plot.sq_meters,
        };
        let mut value = area.checked_mul(self.financial.circle_rate_per_unit_area);
        if self.financial.double_side_road {
            value = value.and_then(|v| v.checked_mul(Decimal::ONE + DOUBLE_SIDE_ROAD_PREMIUM));
        }
        Ok(round_money(checked(value, "circleRate")?))
    }

    /// Step 6: duty is charged on whichever is higher, so under-declaring
    /// the price gains nothing.
    fn final_value(
        &self,
        final_circle_rate_value: Decimal,
    ) -> Decimal {
        let sale_price = self.financial.sale_price;
        if final_circle_rate_value > sale_price {
            debug!(
                sale_price = %sale_price,
                circle_rate_value = %final_circle_rate_value,
                "Circle-rate value exceeds declared sale price"
            );
            final_circle_rate_value
        } else {
            round_money(sale_price)
        }
    }

    /// Step 7: concession, then floor at zero.
    fn adjusted_stamp_duty(
        &self,
        final_value: Decimal,
        gross_stamp_duty: Decimal,
    ) -> Result<Decimal, ValuationError> {
        let adjusted = match self.financial.deduction {
            Deduction::None => gross_stamp_duty,
            Deduction::FemaleBuyer => gross_stamp_duty - final_value * FEMALE_BUYER_REBATE_RATE,
            Deduction::ExServiceman => EX_SERVICEMAN_FLAT_STAMP_DUTY,
            Deduction::Handicapped => {
                gross_stamp_duty
                    - HANDICAPPED_REBATE_RATE * final_value.min(HANDICAPPED_REBATE_VALUE_CAP)
            }
            Deduction::OtherPercent { percent } => {
                let rebate = (percent / Decimal::ONE_HUNDRED).checked_mul(final_value);
                gross_stamp_duty - checked(rebate, "deduction")?
            }
        };

        if adjusted < Decimal::ZERO {
            warn!(
                gross_stamp_duty = %gross_stamp_duty,
                adjusted = %adjusted,
                deduction = ?self.financial.deduction,
                "Concession exceeds stamp duty; duty floored at zero"
            );
        }

        Ok(round_money(floor_at_zero(adjusted)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::models::{AreaUnit, FloorArea, LengthUnit, Room, TreeCount, TreeSpecies};

    fn vacant(sq_meters: Decimal) -> PropertyFacts {
        PropertyFacts::with_total_area(
            PropertyType::Residential,
            PlotType::Vacant,
            sq_meters,
            AreaUnit::SqMeters,
        )
    }

    /// Shows the calculator's warnings in the output of tests that trigger them.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn calculate(
        property: &PropertyFacts,
        financial: &FinancialInputs,
        additions: &StructureAdditions,
    ) -> Result<ValuationResult, ValuationError> {
        ValuationWorksheet::new(property, financial, additions).calculate()
    }

    fn with_deduction(
        sale_price: Decimal,
        deduction: Deduction,
    ) -> FinancialInputs {
        FinancialInputs {
            deduction,
            ..FinancialInputs::new(sale_price, dec!(1))
        }
    }

    // =========================================================================
    // Payable total
    // =========================================================================

    #[test]
    fn payable_is_eight_percent_of_higher_value_without_concessions() {
        let cases = [
            (dec!(100), dec!(40000), dec!(500000)),
            (dec!(250.5), dec!(1234), dec!(10000000)),
            (dec!(1), dec!(1), dec!(1)),
            (dec!(640), dec!(95.5), dec!(250000)),
        ];

        for (area, rate, sale_price) in cases {
            let property = vacant(area);
            let financial = FinancialInputs::new(sale_price, rate);

            let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

            let expected = sale_price.max(area * dec!(10.7639) * rate) * dec!(0.08);
            assert!(
                (result.final_payable_amount - expected).abs() <= dec!(0.01),
                "area {area}, rate {rate}: got {}, expected {expected}",
                result.final_payable_amount
            );
        }
    }

    #[test]
    fn declared_price_governs_when_above_circle_value() {
        let property = vacant(dec!(10));
        let financial = FinancialInputs::new(dec!(1000000), dec!(100));

        let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.final_circle_rate_value, dec!(10763.90));
        assert_eq!(result.final_value, dec!(1000000));
        assert_eq!(result.stamp_duty, dec!(70000));
        assert_eq!(result.registration_charge, dec!(10000));
        assert_eq!(result.final_payable_amount, dec!(80000));
    }

    #[test]
    fn per_sq_meter_basis_skips_square_foot_conversion() {
        let property = vacant(dec!(100));
        let financial = FinancialInputs {
            circle_rate_basis: CircleRateBasis::PerSqMeter,
            ..FinancialInputs::new(dec!(500000), dec!(40000))
        };

        let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.base_circle_rate_value, dec!(4000000));
        assert_eq!(result.final_value, dec!(4000000));
    }

    // =========================================================================
    // Double-side road
    // =========================================================================

    #[test]
    fn double_side_road_raises_base_value_by_ten_percent() {
        let property = vacant(dec!(100));
        let plain = FinancialInputs::new(dec!(1), dec!(40000));
        let corner = FinancialInputs {
            double_side_road: true,
            ..plain.clone()
        };
        let additions = StructureAdditions::default();

        let without = calculate(&property, &plain, &additions).unwrap();
        let with = calculate(&property, &corner, &additions).unwrap();

        assert_eq!(with.base_circle_rate_value, without.base_circle_rate_value * dec!(1.10));
    }

    #[test]
    fn double_side_road_premium_excludes_buildup_value() {
        let property = PropertyFacts {
            buildup_area_sq_ft: Some(dec!(1000)),
            ..PropertyFacts::with_total_area(
                PropertyType::Residential,
                PlotType::Buildup,
                dec!(200),
                AreaUnit::SqMeters,
            )
        };
        let financial = FinancialInputs {
            double_side_road: true,
            ..FinancialInputs::new(dec!(1), dec!(1000))
        };

        let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.base_circle_rate_value, dec!(2368058));
        assert_eq!(result.buildup_value, dec!(1200000));
        assert_eq!(result.final_circle_rate_value, dec!(3568058));
    }

    // =========================================================================
    // Concessions
    // =========================================================================

    #[test]
    fn female_buyer_pays_six_percent() {
        let financial = with_deduction(dec!(1000000), Deduction::FemaleBuyer);

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.gross_stamp_duty, dec!(70000));
        assert_eq!(result.stamp_duty, dec!(60000));
        assert_eq!(result.deduction_amount, dec!(10000));
        assert_eq!(result.registration_charge, dec!(10000));
    }

    #[test]
    fn ex_serviceman_duty_is_flat_regardless_of_value() {
        for sale_price in [dec!(100000), dec!(50000000)] {
            let financial = with_deduction(sale_price, Deduction::ExServiceman);

            let result =
                calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default()).unwrap();

            assert_eq!(result.stamp_duty, dec!(100));
            assert_eq!(result.registration_charge, sale_price * dec!(0.01));
        }
    }

    #[test]
    fn ex_serviceman_deduction_is_zero_when_flat_duty_exceeds_gross() {
        let financial = with_deduction(dec!(1000), Deduction::ExServiceman);

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.gross_stamp_duty, dec!(70));
        assert_eq!(result.stamp_duty, dec!(100));
        assert_eq!(result.deduction_amount, dec!(0));
        assert_eq!(result.final_payable_amount, dec!(110));
    }

    #[test]
    fn handicapped_rebate_is_capped() {
        let financial = with_deduction(dec!(10000000), Deduction::Handicapped);

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.gross_stamp_duty, dec!(700000));
        assert_eq!(result.deduction_amount, dec!(125000));
        assert_eq!(result.stamp_duty, dec!(575000));
    }

    #[test]
    fn handicapped_rebate_on_small_value_floors_duty_at_zero() {
        let _guard = init_test_tracing();
        let financial = with_deduction(dec!(100000), Deduction::Handicapped);

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.stamp_duty, dec!(0));
        assert!(result.deduction_amount <= dec!(125000));
        assert_eq!(result.final_payable_amount, dec!(1000));
    }

    #[test]
    fn other_percent_reduces_by_share_of_final_value() {
        let financial = with_deduction(dec!(1000000), Deduction::OtherPercent { percent: dec!(2) });

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.stamp_duty, dec!(50000));
    }

    #[test]
    fn oversized_percentage_never_makes_duty_negative() {
        let financial =
            with_deduction(dec!(1000000), Deduction::OtherPercent { percent: dec!(150) });

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.stamp_duty, dec!(0));
        assert_eq!(result.final_payable_amount, dec!(10000));
    }

    #[test]
    fn negative_percentage_is_rejected() {
        let financial = with_deduction(dec!(1000), Deduction::OtherPercent { percent: dec!(-1) });

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::NegativeDeductionPercent(dec!(-1))));
    }

    // =========================================================================
    // Area resolution
    // =========================================================================

    #[test]
    fn dimensions_in_feet_are_multiplied_in_meters() {
        let property = PropertyFacts::with_dimensions(
            PropertyType::Residential,
            PlotType::Vacant,
            dec!(30),
            dec!(40),
            LengthUnit::Feet,
        );
        let financial = FinancialInputs::new(dec!(1), dec!(1));

        let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.total_plot_area_sq_meters, dec!(111.4836));
    }

    #[test]
    fn dimensions_mode_needs_both_sides() {
        let property = PropertyFacts {
            width: None,
            ..PropertyFacts::with_dimensions(
                PropertyType::Residential,
                PlotType::Vacant,
                dec!(30),
                dec!(40),
                LengthUnit::Meters,
            )
        };
        let financial = FinancialInputs::new(dec!(1), dec!(1));

        let result = calculate(&property, &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::MissingDimensions));
    }

    #[test]
    fn missing_total_area_is_rejected() {
        let property = PropertyFacts {
            area: None,
            ..vacant(dec!(1))
        };
        let financial = FinancialInputs::new(dec!(1), dec!(1));

        let result = calculate(&property, &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::MissingArea));
    }

    #[test]
    fn zero_area_vacant_plot_is_rejected() {
        let financial = FinancialInputs::new(dec!(1), dec!(1));

        let result = calculate(&vacant(dec!(0)), &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::NonPositiveArea(dec!(0))));
    }

    #[test]
    fn flat_without_rooms_values_to_zero_area() {
        let property = PropertyFacts {
            area: None,
            ..PropertyFacts::with_total_area(
                PropertyType::Residential,
                PlotType::Flat,
                dec!(0),
                AreaUnit::SqMeters,
            )
        };
        let financial = FinancialInputs::new(dec!(100000), dec!(1000));

        let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.total_plot_area_sq_meters, dec!(0));
        assert_eq!(result.buildup_value, dec!(0));
        assert_eq!(result.final_value, dec!(100000));
    }

    #[test]
    fn non_positive_sale_price_is_rejected() {
        let financial = FinancialInputs::new(dec!(0), dec!(1));

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::NonPositiveSalePrice(dec!(0))));
    }

    #[test]
    fn non_positive_circle_rate_is_rejected() {
        let financial = FinancialInputs::new(dec!(1), dec!(-5));

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::NonPositiveCircleRate(dec!(-5))));
    }

    // =========================================================================
    // Built-up value
    // =========================================================================

    #[test]
    fn flat_is_valued_from_room_areas() {
        let property = PropertyFacts::with_total_area(
            PropertyType::Residential,
            PlotType::Flat,
            dec!(0),
            AreaUnit::SqMeters,
        );
        let additions = StructureAdditions {
            rooms: vec![
                Room {
                    room_type: "bedroom".into(),
                    length_ft: dec!(10),
                    width_ft: dec!(12),
                },
                Room {
                    room_type: "hall".into(),
                    length_ft: dec!(15),
                    width_ft: dec!(10),
                },
            ],
            ..Default::default()
        };
        let financial = FinancialInputs::new(dec!(500000), dec!(1000));

        let result = calculate(&property, &financial, &additions).unwrap();

        assert_eq!(result.base_circle_rate_value, dec!(270000));
        assert_eq!(result.buildup_value, dec!(324000));
        assert_eq!(result.final_value, dec!(594000));
        assert_eq!(result.stamp_duty, dec!(41580));
        assert_eq!(result.registration_charge, dec!(5940));
        assert_eq!(result.final_payable_amount, dec!(47520));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn multistory_uses_covered_area() {
        let property = PropertyFacts {
            covered_area_sq_ft: Some(dec!(1500)),
            ..PropertyFacts::with_total_area(
                PropertyType::Residential,
                PlotType::Multistory,
                dec!(0),
                AreaUnit::SqMeters,
            )
        };
        let financial = FinancialInputs::new(dec!(1), dec!(100));

        let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.base_circle_rate_value, dec!(150000));
        assert_eq!(result.buildup_value, dec!(1800000));
    }

    #[test]
    fn mall_floors_use_mall_rate() {
        let property = PropertyFacts {
            commercial_kind: Some(CommercialBuildupKind::Mall),
            ..PropertyFacts::with_total_area(
                PropertyType::Commercial,
                PlotType::Buildup,
                dec!(1000),
                AreaUnit::SqMeters,
            )
        };
        let additions = StructureAdditions {
            floors: vec![
                FloorArea {
                    label: "ground".into(),
                    area_sq_ft: dec!(2000),
                },
                FloorArea {
                    label: "first".into(),
                    area_sq_ft: dec!(3000),
                },
            ],
            ..Default::default()
        };
        let financial = FinancialInputs::new(dec!(1), dec!(500));

        let result = calculate(&property, &financial, &additions).unwrap();

        assert_eq!(result.base_circle_rate_value, dec!(5381950));
        assert_eq!(result.buildup_value, dec!(12500000));
        assert_eq!(result.final_circle_rate_value, dec!(17881950));
    }

    #[test]
    fn single_shop_uses_shop_rate() {
        let property = PropertyFacts {
            commercial_kind: Some(CommercialBuildupKind::SingleShop),
            ..PropertyFacts::with_total_area(
                PropertyType::Commercial,
                PlotType::Buildup,
                dec!(100),
                AreaUnit::SqMeters,
            )
        };
        let additions = StructureAdditions {
            shops: vec![FloorArea {
                label: "front".into(),
                area_sq_ft: dec!(400),
            }],
            ..Default::default()
        };
        let financial = FinancialInputs::new(dec!(1), dec!(1));

        let result = calculate(&property, &financial, &additions).unwrap();

        assert_eq!(result.buildup_value, dec!(600000));
    }

    #[test]
    fn unmatched_combination_adds_nothing() {
        let property = PropertyFacts {
            buildup_area_sq_ft: Some(dec!(5000)),
            ..PropertyFacts::with_total_area(
                PropertyType::Industrial,
                PlotType::Buildup,
                dec!(100),
                AreaUnit::SqMeters,
            )
        };
        let additions = StructureAdditions {
            wells: 3,
            ..Default::default()
        };
        let financial = FinancialInputs::new(dec!(1), dec!(1));

        let result = calculate(&property, &financial, &additions).unwrap();

        assert_eq!(result.buildup_value, dec!(0));
        assert_eq!(result.addition_charges, dec!(0));
        assert_eq!(result.final_circle_rate_value, result.base_circle_rate_value);
    }

    #[test]
    fn buildup_larger_than_plot_is_a_warning() {
        let _guard = init_test_tracing();
        let property = PropertyFacts {
            buildup_area_sq_ft: Some(dec!(1000)),
            ..PropertyFacts::with_total_area(
                PropertyType::Residential,
                PlotType::Buildup,
                dec!(100),
                AreaUnit::SqYards,
            )
        };
        let financial = FinancialInputs::new(dec!(1), dec!(1));

        let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            result.warnings[0],
            ValuationWarning::BuildupExceedsPlot { plot_sq_meters, .. } if plot_sq_meters == dec!(83.6127)
        ));
    }

    // =========================================================================
    // Agricultural additions
    // =========================================================================

    #[test]
    fn agricultural_additions_accumulate() {
        let property = PropertyFacts::with_total_area(
            PropertyType::Agriculture,
            PlotType::Vacant,
            dec!(1),
            AreaUnit::Acre,
        );
        let additions = StructureAdditions {
            wells: 2,
            borewells: 1,
            trees: vec![
                TreeCount {
                    species: TreeSpecies::Mango,
                    count: 10,
                },
                TreeCount {
                    species: TreeSpecies::Neem,
                    count: 4,
                },
            ],
            ..Default::default()
        };
        let financial = FinancialInputs::new(dec!(1), dec!(10));

        let result = calculate(&property, &financial, &additions).unwrap();

        assert_eq!(result.addition_charges, dec!(192000));
        assert_eq!(result.base_circle_rate_value, dec!(435599.96));
        assert_eq!(result.final_circle_rate_value, dec!(627599.96));
    }

    #[test]
    fn empty_agricultural_lists_contribute_zero() {
        let property = PropertyFacts::with_total_area(
            PropertyType::Agriculture,
            PlotType::Vacant,
            dec!(1),
            AreaUnit::Hectare,
        );
        let financial = FinancialInputs::new(dec!(1), dec!(1));

        let result = calculate(&property, &financial, &StructureAdditions::default()).unwrap();

        assert_eq!(result.addition_charges, dec!(0));
    }

    // =========================================================================
    // Out-of-range inputs
    // =========================================================================

    fn flat_with_rooms(rooms: Vec<Room>) -> (PropertyFacts, StructureAdditions) {
        let property = PropertyFacts::with_total_area(
            PropertyType::Residential,
            PlotType::Flat,
            dec!(0),
            AreaUnit::SqMeters,
        );
        let additions = StructureAdditions {
            rooms,
            ..Default::default()
        };
        (property, additions)
    }

    #[test]
    fn huge_plot_at_huge_rate_is_an_overflow_error() {
        let property = PropertyFacts::with_total_area(
            PropertyType::Residential,
            PlotType::Vacant,
            dec!(1000000000000),
            AreaUnit::Hectare,
        );
        let financial = FinancialInputs::new(dec!(1000000), dec!(1000000000000));

        let result = calculate(&property, &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::Overflow { field: "circleRate" }));
    }

    #[test]
    fn area_beyond_decimal_range_is_an_overflow_error() {
        let property = PropertyFacts::with_total_area(
            PropertyType::Residential,
            PlotType::Vacant,
            Decimal::MAX,
            AreaUnit::Hectare,
        );
        let financial = FinancialInputs::new(dec!(1000000), dec!(1));

        let result = calculate(&property, &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::Overflow { field: "area" }));
    }

    #[test]
    fn overflowing_room_area_is_an_overflow_error() {
        let (property, additions) = flat_with_rooms(vec![Room {
            room_type: "hall".into(),
            length_ft: Decimal::MAX,
            width_ft: dec!(2),
        }]);
        let financial = FinancialInputs::new(dec!(1000000), dec!(1));

        let result = calculate(&property, &financial, &additions);

        assert_eq!(result, Err(ValuationError::Overflow { field: "additions.rooms" }));
    }

    #[test]
    fn huge_custom_percentage_is_an_overflow_error() {
        let financial = with_deduction(
            dec!(1000000000000000000000),
            Deduction::OtherPercent {
                percent: dec!(1000000000000000000000),
            },
        );

        let result = calculate(&vacant(dec!(1)), &financial, &StructureAdditions::default());

        assert_eq!(result, Err(ValuationError::Overflow { field: "deduction" }));
    }

    #[test]
    fn negative_room_dimension_is_rejected() {
        let (property, additions) = flat_with_rooms(vec![Room {
            room_type: "bedroom".into(),
            length_ft: dec!(-20),
            width_ft: dec!(10),
        }]);
        let financial = FinancialInputs::new(dec!(500000), dec!(1000));

        let result = calculate(&property, &financial, &additions);

        assert_eq!(
            result,
            Err(ValuationError::NegativeStructure {
                field: "additions.rooms",
                value: dec!(-20),
            })
        );
        assert!(plot_area_sq_meters(&property, &additions).is_err());
    }

    #[test]
    fn negative_buildup_area_is_rejected() {
        let property = PropertyFacts {
            buildup_area_sq_ft: Some(dec!(-500)),
            ..PropertyFacts::with_total_area(
                PropertyType::Residential,
                PlotType::Buildup,
                dec!(100),
                AreaUnit::SqMeters,
            )
        };
        let financial = FinancialInputs::new(dec!(500000), dec!(1000));

        let result = calculate(&property, &financial, &StructureAdditions::default());

        assert_eq!(
            result,
            Err(ValuationError::NegativeStructure {
                field: "buildupAreaSqFt",
                value: dec!(-500),
            })
        );
    }

    #[test]
    fn negative_shop_area_is_rejected() {
        let additions = StructureAdditions {
            shops: vec![FloorArea {
                label: "front".into(),
                area_sq_ft: dec!(-1),
            }],
            ..Default::default()
        };
        let financial = FinancialInputs::new(dec!(500000), dec!(1000));

        let result = calculate(&vacant(dec!(100)), &financial, &additions);

        assert_eq!(
            result,
            Err(ValuationError::NegativeStructure {
                field: "additions.shops",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn repeated_calculation_is_identical() {
        let property = vacant(dec!(321.5));
        let financial = FinancialInputs::new(dec!(2500000), dec!(777));
        let additions = StructureAdditions::default();
        let worksheet = ValuationWorksheet::new(&property, &financial, &additions);

        assert_eq!(worksheet.calculate(), worksheet.calculate());
    }
}
