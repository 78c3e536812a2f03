use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeedForm;
use super::preview;
use super::validation::{ValidationErrors, check_person, require_positive, require_text};
use crate::models::PersonRecord;

/// Certificate issued by a bank to the purchaser of an auctioned property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertySaleCertificateForm {
    pub bank_name: String,
    pub bank_branch: String,
    pub bank_representative: PersonRecord,
    pub property_address: String,
    pub sale_amount: Option<Decimal>,
    pub auction_date: Option<NaiveDate>,
    pub purchaser: PersonRecord,
}

impl DeedForm for PropertySaleCertificateForm {
    fn check_fields(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_text(errors, "bankName", &self.bank_name, "Bank name");
        require_text(errors, "purchaser.name", &self.purchaser.name, "Purchaser name");
        check_person(errors, "bankRepresentative", &self.bank_representative);
        check_person(errors, "purchaser", &self.purchaser);
    }

    fn check_structure(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_text(errors, "bankName", &self.bank_name, "Bank name");
        require_text(
            errors,
            "bankRepresentative.name",
            &self.bank_representative.name,
            "Bank representative",
        );
        require_text(
            errors,
            "propertyAddress",
            &self.property_address,
            "Property address",
        );
        require_positive(errors, "saleAmount", self.sale_amount, "Sale amount");
    }

    fn write_preview(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        preview::line(f, "Bank:", &self.bank_name)?;
        preview::line(f, "Branch:", &self.bank_branch)?;
        preview::person(f, "Authorised officer:", &self.bank_representative)?;
        preview::line(f, "Property address:", &self.property_address)?;
        preview::money(f, "Sale amount:", self.sale_amount)?;
        if let Some(date) = self.auction_date {
            preview::line(f, "Auction date:", &date.format("%d-%m-%Y").to_string())?;
        }
        preview::person(f, "Purchaser:", &self.purchaser)
    }
}
