use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::DeedForm;
use super::preview;
use super::validation::{
    ValidationErrors, check_people, check_person, require_complete_party, require_text,
};
use crate::models::PersonRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Beneficiary {
    #[serde(flatten)]
    pub person: PersonRecord,
    /// Declared share of the estate, in percent.
    pub share_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WillDeedForm {
    pub testator: PersonRecord,
    pub beneficiaries: Vec<Beneficiary>,
    pub executor: Option<PersonRecord>,
    pub witnesses: Vec<PersonRecord>,
    pub assets: Vec<String>,
}

impl WillDeedForm {
    /// Sum of the declared shares; beneficiaries without a share count as zero.
    /// `None` if the sum overflows.
    pub fn declared_share_total(&self) -> Option<Decimal> {
        self.beneficiaries
            .iter()
            .filter_map(|b| b.share_percent)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
    }
}

impl DeedForm for WillDeedForm {
    fn check_fields(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_text(errors, "testator.name", &self.testator.name, "Testator name");
        require_complete_party(errors, "witnesses", &self.witnesses, "witness");
        check_person(errors, "testator", &self.testator);
        for (i, beneficiary) in self.beneficiaries.iter().enumerate() {
            check_person(errors, &format!("beneficiaries[{i}]"), &beneficiary.person);
        }
        if let Some(executor) = &self.executor {
            check_person(errors, "executor", executor);
        }
        check_people(errors, "witnesses", &self.witnesses);
    }

    fn check_structure(
        &self,
        errors: &mut ValidationErrors,
    ) {
        require_text(errors, "testator.name", &self.testator.name, "Testator name");
        if !self.beneficiaries.iter().any(|b| b.person.has_name()) {
            errors.push("beneficiaries", "At least one beneficiary is required");
        }

        for (i, beneficiary) in self.beneficiaries.iter().enumerate() {
            if matches!(beneficiary.share_percent, Some(share) if share <= Decimal::ZERO) {
                errors.push(
                    format!("beneficiaries[{i}].sharePercent"),
                    "Share must be positive",
                );
            }
        }

        match self.declared_share_total() {
            Some(total) if total > dec!(100) => errors.push(
                "beneficiaries",
                format!("Declared shares add up to {total}%, more than 100%"),
            ),
            Some(_) => {}
            None => errors.push("beneficiaries", "Declared shares add up to more than 100%"),
        }
    }

    fn write_preview(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        preview::person(f, "Testator:", &self.testator)?;
        if let Some(executor) = &self.executor {
            preview::person(f, "Executor:", executor)?;
        }
        preview::list(f, "Assets", &self.assets)?;

        let named: Vec<_> = self
            .beneficiaries
            .iter()
            .filter(|b| b.person.has_name())
            .collect();
        if !named.is_empty() {
            writeln!(f)?;
            writeln!(f, "Beneficiaries:")?;
            for (i, b) in named.into_iter().enumerate() {
                match b.share_percent {
                    Some(share) => writeln!(f, "  {}. {} ({share}%)", i + 1, b.person.name.trim())?,
                    None => writeln!(f, "  {}. {}", i + 1, b.person.name.trim())?,
                }
            }
        }

        preview::parties(f, "Witnesses", &self.witnesses)
    }
}
