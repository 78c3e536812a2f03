use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeedForm;
use super::preview;
use super::validation::{
    ValidationErrors, check_people, check_person, require_complete_party, require_text,
};
use crate::models::PersonRecord;

/// Settlement of property on trustees for stated objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrustDeedForm {
    pub trust_name: String,
    pub trust_address: String,
    pub settlor: PersonRecord,
    pub trustees: Vec<PersonRecord>,
    pub witnesses: Vec<PersonRecord>,
    pub objectives: Vec<String>,
    pub trust_property: String,
    pub initial_corpus: Option<Decimal>,
}

impl DeedForm for TrustDeedForm {
    fn check_fields(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_text(errors, "trustName", &self.trust_name, "Trust name");
        require_complete_party(errors, "trustees", &self.trustees, "trustee");
        require_complete_party(errors, "witnesses", &self.witnesses, "witness");
        check_person(errors, "settlor", &self.settlor);
        check_people(errors, "trustees", &self.trustees);
        check_people(errors, "witnesses", &self.witnesses);
    }

    fn check_structure(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_text(errors, "settlor.name", &self.settlor.name, "Settlor name");
        if let Some(corpus) = self.initial_corpus {
            if corpus <= Decimal::ZERO {
                errors.push("initialCorpus", "Initial corpus must be positive");
            }
        }
    }

    fn write_preview(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        preview::line(f, "Trust name:", &self.trust_name)?;
        preview::line(f, "Registered office:", &self.trust_address)?;
        preview::person(f, "Settlor:", &self.settlor)?;
        preview::money(f, "Initial corpus:", self.initial_corpus)?;
        preview::line(f, "Trust property:", &self.trust_property)?;
        preview::list(f, "Objectives", &self.objectives)?;
        preview::parties(f, "Trustees", &self.trustees)?;
        preview::parties(f, "Witnesses", &self.witnesses)
    }
}
