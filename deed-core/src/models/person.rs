use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Aadhaar,
    Pan,
    Passport,
    VoterId,
    DrivingLicence,
}

impl IdType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aadhaar => "Aadhaar",
            Self::Pan => "PAN",
            Self::Passport => "Passport",
            Self::VoterId => "Voter ID",
            Self::DrivingLicence => "Driving Licence",
        }
    }
}

/// A party, witness, or other named person on a deed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonRecord {
    pub name: String,
    /// Relation line as printed on the deed, e.g. "S/o Ram Lal".
    pub relation: String,
    pub address: String,
    pub mobile: String,
    pub id_type: Option<IdType>,
    pub id_number: String,
}

impl PersonRecord {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            mobile: mobile.into(),
            ..Default::default()
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Name, address and mobile are all filled in.
    pub fn is_contact_complete(&self) -> bool {
        self.has_name() && !self.address.trim().is_empty() && !self.mobile.trim().is_empty()
    }
}
