use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Role a person plays on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Role {
    Sponsor,
    Investigator,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sponsor => "Sponsor",
            Self::Investigator => "Investigator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sponsor" => Ok(Self::Sponsor),
            "investigator" => Ok(Self::Investigator),
            _ => Err(CoreError::UnknownVariant {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// A person signed in to (or known by) the platform.
///
/// Immutable once built. The derived helpers ([`full_name`](Self::full_name),
/// [`initials`](Self::initials), [`display_name`](Self::display_name)) are
/// computed on every call and never serialized, so an identity rebuilt from
/// storage can't carry stale values.
///
/// Field names on the wire and in storage follow the portal API
/// (`firstName`, `emailAddress`, `companyAssociation`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    first_name: String,
    last_name: String,
    email_address: String,
    company_association: String,
    role: Role,
}

impl Identity {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
        company_association: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address: email_address.into(),
            company_association: company_association.into(),
            role,
        }
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email_address
    }

    /// Organization the identity signed in through (e.g. `"Veera Vault"`).
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.company_association
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn is_sponsor(&self) -> bool {
        matches!(self.role, Role::Sponsor)
    }

    #[must_use]
    pub const fn is_investigator(&self) -> bool {
        matches!(self.role, Role::Investigator)
    }

    /// `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First letter of the first and last name, uppercased.
    ///
    /// An empty name part contributes nothing.
    #[must_use]
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// `"Role - Organization"`, shown under the account name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.role, self.company_association)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sarah() -> Identity {
        Identity::new(
            "sarah",
            "johnson",
            "sarah.johnson@regeneron.com",
            "Google",
            Role::Sponsor,
        )
    }

    #[test]
    fn initials_are_uppercased() {
        assert_eq!(sarah().initials(), "SJ");
    }

    #[test]
    fn initials_skip_empty_parts() {
        let identity = Identity::new("", "kim", "k@site.com", "Google", Role::Investigator);
        assert_eq!(identity.initials(), "K");
    }

    #[test]
    fn full_and_display_names() {
        let identity = sarah();
        assert_eq!(identity.full_name(), "sarah johnson");
        assert_eq!(identity.display_name(), "Sponsor - Google");
    }

    #[test]
    fn serializes_with_wire_field_names_only() {
        let value = serde_json::to_value(sarah()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "companyAssociation",
                "emailAddress",
                "firstName",
                "lastName",
                "role"
            ]
        );
        assert_eq!(value["role"], "Sponsor");
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("investigator".parse::<Role>().unwrap(), Role::Investigator);
        assert_eq!(" Sponsor ".parse::<Role>().unwrap(), Role::Sponsor);
        assert!(matches!(
            "monitor".parse::<Role>(),
            Err(CoreError::UnknownVariant { kind: "role", .. })
        ));
    }

    #[test]
    fn role_predicates() {
        assert!(sarah().is_sponsor());
        assert!(!sarah().is_investigator());
    }
}
