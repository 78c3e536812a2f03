use std::fmt;

use serde::{Deserialize, Serialize};

use super::DeedForm;
use super::preview;
use super::validation::{ValidationErrors, check_people, is_blank, require_complete_party};
use crate::models::PersonRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerOfAttorneyKind {
    #[default]
    General,
    /// Limited to the listed powers.
    Special,
}

impl PowerOfAttorneyKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Special => "Special",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PowerOfAttorneyForm {
    pub kind: PowerOfAttorneyKind,
    pub principals: Vec<PersonRecord>,
    pub agents: Vec<PersonRecord>,
    pub powers: Vec<String>,
    pub property_description: String,
    pub witnesses: Vec<PersonRecord>,
}

impl DeedForm for PowerOfAttorneyForm {
    fn check_fields(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_complete_party(errors, "principals", &self.principals, "principal");
        require_complete_party(errors, "agents", &self.agents, "agent");
        check_people(errors, "principals", &self.principals);
        check_people(errors, "agents", &self.agents);
        check_people(errors, "witnesses", &self.witnesses);
    }

    fn check_structure(
        &self,
        errors: &mut ValidationErrors,
    ) {
        if self.kind == PowerOfAttorneyKind::Special && self.powers.iter().all(|p| is_blank(p)) {
            errors.push(
                "powers",
                "A special power of attorney must list at least one power",
            );
        }
    }

    fn write_preview(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        preview::line(f, "Kind:", self.kind.label())?;
        preview::line(f, "Property:", &self.property_description)?;
        preview::parties(f, "Principals", &self.principals)?;
        preview::parties(f, "Agents", &self.agents)?;
        preview::list(f, "Powers granted", &self.powers)?;
        preview::parties(f, "Witnesses", &self.witnesses)
    }
}
