//! Field-scoped validation shared by every deed form.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{IdType, PersonRecord};

static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile pattern is valid"));
static AADHAAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[2-9][0-9]{11}$").expect("aadhaar pattern is valid"));
static PAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("pan pattern is valid"));
static PASSPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]{7}$").expect("passport pattern is valid"));
static VOTER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{7}$").expect("voter id pattern is valid"));
static DRIVING_LICENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{13}$").expect("licence pattern is valid"));

/// One problem with one field, keyed by the field's path in the form
/// (e.g. `trustees`, `buyers[1].mobile`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field problem found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First error reported against `field`, if any.
    pub fn field(
        &self,
        field: &str,
    ) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    label: &str,
) {
    if is_blank(value) {
        errors.push(field, format!("{label} is required"));
    }
}

pub(crate) fn require_positive(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Decimal>,
    label: &str,
) {
    match value {
        None => errors.push(field, format!("{label} is required")),
        Some(v) if v <= Decimal::ZERO => errors.push(field, format!("{label} must be positive")),
        Some(_) => {}
    }
}

/// At least one person in `people` has a name, an address and a mobile.
pub(crate) fn require_complete_party(
    errors: &mut ValidationErrors,
    field: &str,
    people: &[PersonRecord],
    label: &str,
) {
    if !people.iter().any(PersonRecord::is_contact_complete) {
        errors.push(
            field,
            format!("At least one {label} with name, address and mobile is required"),
        );
    }
}

/// At least one person in `people` has a name.
pub(crate) fn require_named_party(
    errors: &mut ValidationErrors,
    field: &str,
    people: &[PersonRecord],
    label: &str,
) {
    if !people.iter().any(PersonRecord::has_name) {
        errors.push(field, format!("At least one {label} is required"));
    }
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_ascii_uppercase()
}

pub fn is_valid_mobile(mobile: &str) -> bool {
    let digits = normalize(mobile);
    let digits = digits.strip_prefix("+91").unwrap_or(&digits);
    MOBILE.is_match(digits)
}

pub fn is_valid_id_number(
    id_type: IdType,
    id_number: &str,
) -> bool {
    let id = normalize(id_number);
    let pattern = match id_type {
        IdType::Aadhaar => &AADHAAR,
        IdType::Pan => &PAN,
        IdType::Passport => &PASSPORT,
        IdType::VoterId => &VOTER_ID,
        IdType::DrivingLicence => &DRIVING_LICENCE,
    };
    pattern.is_match(&id)
}

/// Checks the format of whatever contact and identity details were given.
/// Blank values are left to the required-field rules.
pub(crate) fn check_person(
    errors: &mut ValidationErrors,
    field: &str,
    person: &PersonRecord,
) {
    if !is_blank(&person.mobile) && !is_valid_mobile(&person.mobile) {
        errors.push(
            format!("{field}.mobile"),
            "Mobile number must be 10 digits starting with 6, 7, 8 or 9",
        );
    }

    if is_blank(&person.id_number) {
        return;
    }
    match person.id_type {
        None => errors.push(
            format!("{field}.idType"),
            "ID type is required when an ID number is given",
        ),
        Some(id_type) if !is_valid_id_number(id_type, &person.id_number) => errors.push(
            format!("{field}.idNumber"),
            format!("{} number is not in a valid format", id_type.label()),
        ),
        Some(_) => {}
    }
}

pub(crate) fn check_people(
    errors: &mut ValidationErrors,
    field: &str,
    people: &[PersonRecord],
) {
    for (i, person) in people.iter().enumerate() {
        check_person(errors, &format!("{field}[{i}]"), person);
    }
}
