use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeedForm;
use super::preview;
use super::validation::{
    ValidationErrors, check_people, require_named_party, require_positive, require_text,
};
use crate::calculations::{ValuationError, ValuationWorksheet};
use crate::models::{
    CircleRateBasis, Deduction, FinancialInputs, PersonRecord, PropertyFacts, StructureAdditions,
    ValuationResult,
};

/// Conveyance of immovable property for a price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleDeedForm {
    /// Instrument being drafted, e.g. "Sale Deed" or "Agreement to Sell".
    pub document_type: String,
    pub property: Option<PropertyFacts>,
    pub property_address: String,
    pub sale_price: Option<Decimal>,
    pub circle_rate: Option<Decimal>,
    pub circle_rate_basis: CircleRateBasis,
    pub deduction: Deduction,
    pub double_side_road: bool,
    pub additions: StructureAdditions,
    pub sellers: Vec<PersonRecord>,
    pub buyers: Vec<PersonRecord>,
    pub witnesses: Vec<PersonRecord>,
}

impl SaleDeedForm {
    /// Financial inputs for the valuation, once both amounts are entered.
    pub fn financial_inputs(&self) -> Option<FinancialInputs> {
        Some(FinancialInputs {
            sale_price: self.sale_price?,
            circle_rate_per_unit_area: self.circle_rate?,
            circle_rate_basis: self.circle_rate_basis,
            deduction: self.deduction,
            double_side_road: self.double_side_road,
        })
    }

    /// Values the property from the entered facts. Recomputed on every call.
    pub fn valuation(&self) -> Result<ValuationResult, ValuationError> {
        let property = self
            .property
            .as_ref()
            .ok_or(ValuationError::MissingInput("property type"))?;
        let sale_price = self.sale_price.ok_or(ValuationError::MissingInput("sale price"))?;
        let circle_rate = self.circle_rate.ok_or(ValuationError::MissingInput("circle rate"))?;
        let financial = FinancialInputs {
            sale_price,
            circle_rate_per_unit_area: circle_rate,
            circle_rate_basis: self.circle_rate_basis,
            deduction: self.deduction,
            double_side_road: self.double_side_road,
        };

        ValuationWorksheet::new(property, &financial, &self.additions).calculate()
    }
}

fn valuation_error_field(error: &ValuationError) -> &'static str {
    match error {
        ValuationError::MissingArea | ValuationError::NonPositiveArea(_) => "area",
        ValuationError::MissingDimensions => "dimensions",
        ValuationError::NegativeDeductionPercent(_) => "deduction",
        ValuationError::NonPositiveSalePrice(_) => "salePrice",
        ValuationError::NonPositiveCircleRate(_) => "circleRate",
        ValuationError::MissingInput(_) => "property",
        ValuationError::NegativeStructure { field, .. } | ValuationError::Overflow { field } => {
            *field
        }
    }
}

impl DeedForm for SaleDeedForm {
    fn check_fields(
        &self,
        errors: &mut ValidationErrors,
    ) {
        let before = errors.len();
        require_text(errors, "documentType", &self.document_type, "Document type");
        if self.property.is_none() {
            errors.push("propertyType", "Property type is required");
        }
        require_positive(errors, "salePrice", self.sale_price, "Sale price");
        require_positive(errors, "circleRate", self.circle_rate, "Circle rate");

        // Only worth valuing once the basics are in.
        if errors.len() == before {
            if let Err(e) = self.valuation() {
                errors.push(valuation_error_field(&e), e.to_string());
            }
        }

        check_people(errors, "sellers", &self.sellers);
        check_people(errors, "buyers", &self.buyers);
        check_people(errors, "witnesses", &self.witnesses);
    }

    fn check_structure(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_named_party(errors, "sellers", &self.sellers, "seller");
        require_named_party(errors, "buyers", &self.buyers, "buyer");
    }

    fn write_preview(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        preview::line(f, "Document type:", &self.document_type)?;
        preview::line(f, "Property address:", &self.property_address)?;
        if let Some(property) = &self.property {
            preview::line(f, "Property type:", property.property_type.as_str())?;
        }
        preview::money(f, "Sale price:", self.sale_price)?;

        if let Ok(valuation) = self.valuation() {
            preview::line(
                f,
                "Plot area:",
                &format!("{} sq m", valuation.total_plot_area_sq_meters),
            )?;
            preview::money(f, "Circle-rate value:", Some(valuation.final_circle_rate_value))?;
            preview::money(f, "Stamp duty:", Some(valuation.stamp_duty))?;
            preview::money(f, "Registration charge:", Some(valuation.registration_charge))?;
            preview::money(f, "Total payable:", Some(valuation.final_payable_amount))?;
        }

        preview::parties(f, "Sellers", &self.sellers)?;
        preview::parties(f, "Buyers", &self.buyers)?;
        preview::parties(f, "Witnesses", &self.witnesses)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::forms::FormData;
    use crate::models::{AreaUnit, PlotType, PropertyType, Room};

    fn complete_form() -> SaleDeedForm {
        SaleDeedForm {
            document_type: "Sale Deed".into(),
            property: Some(PropertyFacts::with_total_area(
                PropertyType::Residential,
                PlotType::Vacant,
                dec!(100),
                AreaUnit::SqMeters,
            )),
            property_address: "Plot 12, Sector 4, Noida".into(),
            sale_price: Some(dec!(500000)),
            circle_rate: Some(dec!(40000)),
            sellers: vec![PersonRecord::new("Mohan Lal", "Noida", "9876543210")],
            buyers: vec![PersonRecord::new("Sunita Sharma", "Delhi", "9812345678")],
            ..Default::default()
        }
    }

    #[test]
    fn complete_form_passes_both_checks() {
        let data = FormData::SaleDeed(complete_form());

        assert_eq!(data.validate_fields(), Ok(()));
        assert_eq!(data.validate_structure(), Ok(()));
    }

    #[test]
    fn missing_basics_are_reported_per_field() {
        let data = FormData::SaleDeed(SaleDeedForm::default());

        let errors = data.validate_fields().unwrap_err();

        assert!(errors.field("documentType").is_some());
        assert!(errors.field("propertyType").is_some());
        assert!(errors.field("salePrice").is_some());
        assert!(errors.field("circleRate").is_some());
    }

    #[test]
    fn unusable_area_is_reported_against_area() {
        let mut form = complete_form();
        if let Some(property) = form.property.as_mut() {
            property.area = Some(dec!(0));
        }

        let errors = FormData::SaleDeed(form).validate_fields().unwrap_err();

        assert!(errors.field("area").is_some());
    }

    #[test]
    fn huge_amounts_are_reported_against_circle_rate() {
        let form = SaleDeedForm {
            property: Some(PropertyFacts::with_total_area(
                PropertyType::Residential,
                PlotType::Vacant,
                dec!(1000000000000),
                AreaUnit::Hectare,
            )),
            circle_rate: Some(dec!(1000000000000)),
            ..complete_form()
        };

        let errors = FormData::SaleDeed(form).validate_fields().unwrap_err();

        assert!(errors.field("circleRate").is_some());
    }

    #[test]
    fn negative_room_is_reported_against_rooms() {
        let mut form = SaleDeedForm {
            additions: StructureAdditions {
                rooms: vec![Room {
                    room_type: "bedroom".into(),
                    length_ft: dec!(-20),
                    width_ft: dec!(10),
                }],
                ..Default::default()
            },
            ..complete_form()
        };
        if let Some(property) = form.property.as_mut() {
            property.plot_type = PlotType::Flat;
        }

        let errors = FormData::SaleDeed(form).validate_fields().unwrap_err();

        assert!(errors.field("additions.rooms").is_some());
    }

    #[test]
    fn structure_needs_seller_and_buyer() {
        let form = SaleDeedForm {
            sellers: vec![],
            buyers: vec![PersonRecord::default()],
            ..complete_form()
        };

        let errors = FormData::SaleDeed(form).validate_structure().unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.field("sellers").is_some());
        assert!(errors.field("buyers").is_some());
    }

    #[test]
    fn valuation_uses_form_amounts() {
        let valuation = complete_form().valuation().unwrap();

        assert_eq!(valuation.base_circle_rate_value, dec!(43055600));
    }

    #[test]
    fn financial_inputs_need_both_amounts() {
        let form = SaleDeedForm {
            circle_rate: None,
            ..complete_form()
        };

        assert_eq!(form.financial_inputs(), None);
        assert!(complete_form().financial_inputs().is_some());
    }
}
