use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DeedForm;
use super::preview;
use super::validation::{ValidationErrors, check_people, require_complete_party, require_text};
use crate::calculations::age_in_years;
use crate::models::PersonRecord;

/// Oldest completed age at which a child may be given in adoption.
pub const ADOPTION_MAX_CHILD_AGE: u32 = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdoptionDeedForm {
    pub child_name: String,
    pub child_date_of_birth: Option<NaiveDate>,
    pub child_gender: String,
    pub adoptive_parents: Vec<PersonRecord>,
    pub biological_parents: Vec<PersonRecord>,
    pub witnesses: Vec<PersonRecord>,
    /// Date the deed is executed. Today when left empty.
    pub execution_date: Option<NaiveDate>,
}

impl AdoptionDeedForm {
    fn reference_date(&self) -> NaiveDate {
        self.execution_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Child's completed age on the execution date.
    pub fn child_age(&self) -> Option<u32> {
        age_in_years(self.child_date_of_birth?, self.reference_date())
    }
}

impl DeedForm for AdoptionDeedForm {
    fn check_fields(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_text(errors, "childName", &self.child_name, "Child name");
        if self.child_date_of_birth.is_none() {
            errors.push("childDateOfBirth", "Child date of birth is required");
        }
        require_complete_party(
            errors,
            "adoptiveParents",
            &self.adoptive_parents,
            "adoptive parent",
        );
        require_complete_party(errors, "witnesses", &self.witnesses, "witness");
        check_people(errors, "adoptiveParents", &self.adoptive_parents);
        check_people(errors, "biologicalParents", &self.biological_parents);
        check_people(errors, "witnesses", &self.witnesses);
    }

    fn check_structure(
        &self,
        errors: &mut ValidationErrors,
    ) {
        let Some(dob) = self.child_date_of_birth else {
            errors.push("childDateOfBirth", "Child date of birth is required");
            return;
        };

        match age_in_years(dob, self.reference_date()) {
            None => errors.push(
                "childDateOfBirth",
                "Child date of birth cannot be after the execution date",
            ),
            Some(age) if age >= ADOPTION_MAX_CHILD_AGE => errors.push(
                "childDateOfBirth",
                format!("Child must be under {ADOPTION_MAX_CHILD_AGE} years of age, is {age}"),
            ),
            Some(_) => {}
        }
    }

    fn write_preview(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        preview::line(f, "Child:", &self.child_name)?;
        if let Some(dob) = self.child_date_of_birth {
            preview::line(f, "Date of birth:", &dob.format("%d-%m-%Y").to_string())?;
        }
        if let Some(age) = self.child_age() {
            preview::line(f, "Age:", &format!("{age} years"))?;
        }
        preview::line(f, "Gender:", &self.child_gender)?;
        if let Some(date) = self.execution_date {
            preview::line(f, "Execution date:", &date.format("%d-%m-%Y").to_string())?;
        }
        preview::parties(f, "Adoptive parents", &self.adoptive_parents)?;
        preview::parties(f, "Biological parents", &self.biological_parents)?;
        preview::parties(f, "Witnesses", &self.witnesses)
    }
}
