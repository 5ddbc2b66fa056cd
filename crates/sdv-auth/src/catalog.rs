//! Fixed account lists for the mock providers.
//!
//! Each provider offers two sponsors and two investigators. The lists are
//! rebuilt on every call, so callers always get owned copies.

use sdv_core::{Identity, Role};

use crate::provider::Provider;

const GOOGLE: [(&str, &str, &str, Role); 4] = [
    ("Sarah", "Johnson", "sarah.johnson@regeneron.com", Role::Sponsor),
    ("Michael", "Chen", "michael.chen@site.com", Role::Investigator),
    ("Emily", "Rodriguez", "emily.rodriguez@regeneron.com", Role::Sponsor),
    ("David", "Kim", "david.kim@site.com", Role::Investigator),
];

const VEERA_VAULT: [(&str, &str, &str, Role); 4] = [
    ("Jennifer", "Williams", "jennifer.williams@regeneron.com", Role::Sponsor),
    ("Robert", "Brown", "robert.brown@site.com", Role::Investigator),
    ("Lisa", "Davis", "lisa.davis@regeneron.com", Role::Sponsor),
    ("James", "Wilson", "james.wilson@site.com", Role::Investigator),
];

const MEDIDATA: [(&str, &str, &str, Role); 4] = [
    ("Amanda", "Taylor", "amanda.taylor@regeneron.com", Role::Sponsor),
    (
        "Christopher",
        "Anderson",
        "christopher.anderson@site.com",
        Role::Investigator,
    ),
    ("Jessica", "Thomas", "jessica.thomas@regeneron.com", Role::Sponsor),
    ("Matthew", "Jackson", "matthew.jackson@site.com", Role::Investigator),
];

/// The accounts a provider's modal lists, in display order.
#[must_use]
pub fn accounts(provider: Provider) -> Vec<Identity> {
    let rows = match provider {
        Provider::Google => &GOOGLE,
        Provider::VeeraVault => &VEERA_VAULT,
        Provider::Medidata => &MEDIDATA,
    };
    rows.iter()
        .map(|&(first, last, email, role)| {
            Identity::new(first, last, email, provider.organization(), role)
        })
        .collect()
}

/// One account by position, if it exists.
#[must_use]
pub fn account(provider: Provider, index: usize) -> Option<Identity> {
    accounts(provider).into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_provider_has_two_of_each_role() {
        for provider in Provider::ALL {
            let list = accounts(provider);
            assert_eq!(list.len(), 4);
            assert_eq!(list.iter().filter(|i| i.is_sponsor()).count(), 2);
            assert_eq!(list.iter().filter(|i| i.is_investigator()).count(), 2);
            assert!(
                list.iter()
                    .all(|i| i.organization() == provider.organization())
            );
        }
    }

    #[test]
    fn catalog_is_stable_across_calls() {
        assert_eq!(accounts(Provider::Google), accounts(Provider::Google));
    }

    #[test]
    fn first_google_account_is_sarah() {
        let sarah = account(Provider::Google, 0).unwrap();
        assert_eq!(sarah.full_name(), "Sarah Johnson");
        assert_eq!(sarah.email(), "sarah.johnson@regeneron.com");
        assert_eq!(sarah.display_name(), "Sponsor - Google");
    }

    #[test]
    fn out_of_range_index_is_none() {
        assert_eq!(account(Provider::Medidata, 4), None);
    }
}
