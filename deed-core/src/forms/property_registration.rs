use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeedForm;
use super::preview;
use super::validation::{ValidationErrors, check_people, require_complete_party, require_text};
use crate::calculations::plot_area_sq_meters;
use crate::models::{PersonRecord, PropertyFacts, StructureAdditions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyRegistrationForm {
    pub owners: Vec<PersonRecord>,
    pub property: Option<PropertyFacts>,
    pub property_address: String,
    pub registration_office: String,
    pub witnesses: Vec<PersonRecord>,
}

impl DeedForm for PropertyRegistrationForm {
    fn check_fields(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_complete_party(errors, "owners", &self.owners, "owner");
        require_text(
            errors,
            "propertyAddress",
            &self.property_address,
            "Property address",
        );
        check_people(errors, "owners", &self.owners);
        check_people(errors, "witnesses", &self.witnesses);
    }

    fn check_structure(
        &self,
        errors: &mut ValidationErrors,
    ) {
        let Some(property) = &self.property else {
            errors.push("property", "Property details are required");
            return;
        };

        match plot_area_sq_meters(property, &StructureAdditions::default()) {
            Ok(area) if area > Decimal::ZERO => {}
            Ok(_) => errors.push("area", "Property area must be positive"),
            Err(e) => errors.push("area", e.to_string()),
        }
    }

    fn write_preview(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        preview::line(f, "Property address:", &self.property_address)?;
        if let Some(property) = &self.property {
            preview::line(f, "Property type:", property.property_type.as_str())?;
            if let Ok(area) = plot_area_sq_meters(property, &StructureAdditions::default()) {
                preview::line(f, "Area:", &format!("{area} sq m"))?;
            }
        }
        preview::line(f, "Registration office:", &self.registration_office)?;
        preview::parties(f, "Owners", &self.owners)?;
        preview::parties(f, "Witnesses", &self.witnesses)
    }
}
