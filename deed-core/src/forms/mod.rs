//! Deed forms and the submission that carries one through the workflow.
//!
//! Each form type owns its own rules through [`DeedForm`]: the required-field
//! set checked before preview, and the structural rules checked before the
//! submission is sent. [`FormData`] dispatches to them, so there is a single
//! source of truth per form.

mod adoption_deed;
mod power_of_attorney;
mod preview;
mod property_registration;
mod property_sale_certificate;
mod sale_deed;
mod trust_deed;
pub mod validation;
mod will_deed;

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub use adoption_deed::{ADOPTION_MAX_CHILD_AGE, AdoptionDeedForm};
pub use power_of_attorney::{PowerOfAttorneyForm, PowerOfAttorneyKind};
pub use property_registration::PropertyRegistrationForm;
pub use property_sale_certificate::PropertySaleCertificateForm;
pub use sale_deed::SaleDeedForm;
pub use trust_deed::TrustDeedForm;
pub use validation::{FieldError, ValidationErrors};
pub use will_deed::{Beneficiary, WillDeedForm};

/// Service fee charged for drafting each form, in rupees.
pub const SALE_DEED_FEE: Decimal = dec!(1499);
pub const TRUST_DEED_FEE: Decimal = dec!(1999);
pub const ADOPTION_DEED_FEE: Decimal = dec!(999);
pub const POWER_OF_ATTORNEY_FEE: Decimal = dec!(799);
pub const WILL_DEED_FEE: Decimal = dec!(999);
pub const PROPERTY_REGISTRATION_FEE: Decimal = dec!(1499);
pub const PROPERTY_SALE_CERTIFICATE_FEE: Decimal = dec!(1199);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    SaleDeed,
    TrustDeed,
    AdoptionDeed,
    PowerOfAttorney,
    WillDeed,
    PropertyRegistration,
    PropertySaleCertificate,
}

impl FormType {
    pub const ALL: [FormType; 7] = [
        Self::SaleDeed,
        Self::TrustDeed,
        Self::AdoptionDeed,
        Self::PowerOfAttorney,
        Self::WillDeed,
        Self::PropertyRegistration,
        Self::PropertySaleCertificate,
    ];

    /// Kebab-case name, also the backend endpoint segment.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::SaleDeed => "sale-deed",
            Self::TrustDeed => "trust-deed",
            Self::AdoptionDeed => "adoption-deed",
            Self::PowerOfAttorney => "power-of-attorney",
            Self::WillDeed => "will-deed",
            Self::PropertyRegistration => "property-registration",
            Self::PropertySaleCertificate => "property-sale-certificate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|t| t.slug() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::SaleDeed => "Sale Deed",
            Self::TrustDeed => "Trust Deed",
            Self::AdoptionDeed => "Adoption Deed",
            Self::PowerOfAttorney => "Power of Attorney",
            Self::WillDeed => "Will Deed",
            Self::PropertyRegistration => "Property Registration",
            Self::PropertySaleCertificate => "Property Sale Certificate",
        }
    }

    pub fn service_fee(&self) -> Decimal {
        match self {
            Self::SaleDeed => SALE_DEED_FEE,
            Self::TrustDeed => TRUST_DEED_FEE,
            Self::AdoptionDeed => ADOPTION_DEED_FEE,
            Self::PowerOfAttorney => POWER_OF_ATTORNEY_FEE,
            Self::WillDeed => WILL_DEED_FEE,
            Self::PropertyRegistration => PROPERTY_REGISTRATION_FEE,
            Self::PropertySaleCertificate => PROPERTY_SALE_CERTIFICATE_FEE,
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Rules and rendering owned by one form type.
pub trait DeedForm {
    /// Required fields that must be filled before the form can be previewed.
    fn check_fields(
        &self,
        errors: &mut ValidationErrors,
    );

    /// Whole-document rules checked before the form is sent for processing.
    fn check_structure(
        &self,
        errors: &mut ValidationErrors,
    );

    /// Body of the plain-text preview, after the title.
    fn write_preview(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result;
}

/// The collected fields of one deed, tagged by form type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "formType", content = "formData", rename_all = "kebab-case")]
pub enum FormData {
    SaleDeed(SaleDeedForm),
    TrustDeed(TrustDeedForm),
    AdoptionDeed(AdoptionDeedForm),
    PowerOfAttorney(PowerOfAttorneyForm),
    WillDeed(WillDeedForm),
    PropertyRegistration(PropertyRegistrationForm),
    PropertySaleCertificate(PropertySaleCertificateForm),
}

impl FormData {
    pub fn form_type(&self) -> FormType {
        match self {
            Self::SaleDeed(_) => FormType::SaleDeed,
            Self::TrustDeed(_) => FormType::TrustDeed,
            Self::AdoptionDeed(_) => FormType::AdoptionDeed,
            Self::PowerOfAttorney(_) => FormType::PowerOfAttorney,
            Self::WillDeed(_) => FormType::WillDeed,
            Self::PropertyRegistration(_) => FormType::PropertyRegistration,
            Self::PropertySaleCertificate(_) => FormType::PropertySaleCertificate,
        }
    }

    fn as_deed_form(&self) -> &dyn DeedForm {
        match self {
            Self::SaleDeed(form) => form,
            Self::TrustDeed(form) => form,
            Self::AdoptionDeed(form) => form,
            Self::PowerOfAttorney(form) => form,
            Self::WillDeed(form) => form,
            Self::PropertyRegistration(form) => form,
            Self::PropertySaleCertificate(form) => form,
        }
    }

    /// Required-field check gating `form → preview`.
    pub fn validate_fields(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.as_deed_form().check_fields(&mut errors);
        errors.into_result()
    }

    /// Structural check gating `preview → processing`.
    pub fn validate_structure(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.as_deed_form().check_structure(&mut errors);
        errors.into_result()
    }
}

/// A completed form plus the amount to be collected for it.
///
/// Serialises as `{ "amount", "formType", "formData" }`, which is the body
/// posted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSubmission {
    pub amount: Decimal,
    #[serde(flatten)]
    pub data: FormData,
}

impl WorkflowSubmission {
    /// Wraps `data`, charging the form type's service fee.
    pub fn new(data: FormData) -> Self {
        Self {
            amount: data.form_type().service_fee(),
            data,
        }
    }

    pub fn with_amount(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.amount = amount;
        self
    }

    pub fn form_type(&self) -> FormType {
        self.data.form_type()
    }
}

impl fmt::Display for WorkflowSubmission {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        preview::heading(f, &self.form_type().title().to_uppercase())?;
        self.data.as_deed_form().write_preview(f)?;
        writeln!(f)?;
        write!(f, "{:<22}₹{}", "Service fee:", self.amount)
    }
}
