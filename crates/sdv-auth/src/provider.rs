//! The three mock SSO providers and the EDC branding implied by each.

use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// A fictitious single-sign-on service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
    VeeraVault,
    Medidata,
}

/// Text shown inside a provider's sign-in modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branding {
    /// `"to continue to ..."` line under the title.
    pub subtitle: &'static str,
    /// Label of the confirm button on the consent step.
    pub confirm_label: &'static str,
    /// Hex accent color.
    pub color: &'static str,
}

impl Provider {
    pub const ALL: [Self; 3] = [Self::Google, Self::VeeraVault, Self::Medidata];

    /// Short CLI key (`google`, `veera`, `medidata`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::VeeraVault => "veera",
            Self::Medidata => "medidata",
        }
    }

    /// Organization stamped on every identity from this provider.
    #[must_use]
    pub const fn organization(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::VeeraVault => "Veera Vault",
            Self::Medidata => "Medidata",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.organization()
    }

    /// Label persisted under `authMethod` after a successful sign-in.
    #[must_use]
    pub const fn auth_method(self) -> &'static str {
        match self {
            Self::Google => "Google SSO",
            Self::VeeraVault => "Veera Vault SSO",
            Self::Medidata => "Medidata SSO",
        }
    }

    #[must_use]
    pub const fn branding(self) -> Branding {
        match self {
            Self::Google => Branding {
                subtitle: "to continue to SDV Platform",
                confirm_label: "Continue",
                color: "#4285F4",
            },
            Self::VeeraVault => Branding {
                subtitle: "to continue to Veeva Vault",
                confirm_label: "Sign In to Vault",
                color: "#6366F1",
            },
            Self::Medidata => Branding {
                subtitle: "to continue to Medidata",
                confirm_label: "Sign In",
                color: "#10B981",
            },
        }
    }

    /// Heading of the consent step.
    #[must_use]
    pub fn consent_heading(self) -> String {
        format!(
            "{} will allow SDV Platform to access this info about you",
            self.display_name()
        )
    }

    /// Reverse of [`auth_method`](Self::auth_method).
    #[must_use]
    pub fn from_auth_method(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.auth_method() == label.trim())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "veera" | "veera vault" | "veera-vault" | "veeva" => Ok(Self::VeeraVault),
            "medidata" => Ok(Self::Medidata),
            _ => Err(AuthError::UnknownProvider(s.to_string())),
        }
    }
}

/// Electronic data capture system shown next to the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdcSystem {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl EdcSystem {
    const GENERIC: Self = Self {
        name: "EDC",
        color: "#6B7280",
        icon: "📋",
    };

    /// Map a stored auth-method label to its EDC. Unknown or missing labels
    /// fall back to the generic "EDC".
    #[must_use]
    pub fn for_auth_method(label: Option<&str>) -> Self {
        label
            .and_then(Provider::from_auth_method)
            .map_or(Self::GENERIC, Self::for_provider)
    }

    #[must_use]
    pub const fn for_provider(provider: Provider) -> Self {
        match provider {
            Provider::Medidata => Self {
                name: "Medidata Rave",
                color: "#10B981",
                icon: "🏥",
            },
            Provider::VeeraVault => Self {
                name: "Veeva Vault",
                color: "#6366F1",
                icon: "📊",
            },
            Provider::Google => Self {
                name: "Google Cloud",
                color: "#4285F4",
                icon: "☁️",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("google", Provider::Google)]
    #[case("Veera", Provider::VeeraVault)]
    #[case("veera vault", Provider::VeeraVault)]
    #[case("veeva", Provider::VeeraVault)]
    #[case(" MEDIDATA ", Provider::Medidata)]
    fn parses_provider_keys(#[case] raw: &str, #[case] expected: Provider) {
        assert_eq!(raw.parse::<Provider>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(matches!(
            "okta".parse::<Provider>(),
            Err(AuthError::UnknownProvider(ref p)) if p == "okta"
        ));
    }

    #[test]
    fn auth_method_roundtrips() {
        for provider in Provider::ALL {
            assert_eq!(
                Provider::from_auth_method(provider.auth_method()),
                Some(provider)
            );
        }
        assert_eq!(Provider::from_auth_method("Okta SSO"), None);
    }

    #[rstest]
    #[case(Some("Medidata SSO"), "Medidata Rave")]
    #[case(Some("Veera Vault SSO"), "Veeva Vault")]
    #[case(Some("Google SSO"), "Google Cloud")]
    #[case(Some("Password"), "EDC")]
    #[case(None, "EDC")]
    fn edc_follows_auth_method(#[case] label: Option<&str>, #[case] name: &str) {
        assert_eq!(EdcSystem::for_auth_method(label).name, name);
    }

    #[test]
    fn consent_heading_names_provider() {
        assert_eq!(
            Provider::Medidata.consent_heading(),
            "Medidata will allow SDV Platform to access this info about you"
        );
    }
}
