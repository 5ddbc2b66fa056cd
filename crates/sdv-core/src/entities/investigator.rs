use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Principal investigator attached to a study.
///
/// Mirrors the record the portal API stores for a study's investigator, which
/// is a contact card rather than a signed-in identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PrincipalInvestigator {
    pub name: String,
    pub email: String,
    pub institution: String,
    pub specialty: String,
}

impl PrincipalInvestigator {
    /// Names of the fields that are blank. The add-investigator form requires
    /// all four.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("institution", &self.institution),
            ("specialty", &self.specialty),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
