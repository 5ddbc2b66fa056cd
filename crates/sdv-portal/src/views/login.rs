use sdv_auth::Provider;
use sdv_auth::provider::Branding;
use sdv_core::Identity;

/// The account-selection step of a provider's modal.
#[must_use]
pub fn render_accounts(provider: Provider, branding: Branding, accounts: &[Identity]) -> String {
    let mut lines = vec![
        format!("Sign in with {}", provider.display_name()),
        branding.subtitle.to_string(),
        String::new(),
    ];
    lines.extend(accounts.iter().enumerate().map(|(index, account)| {
        format!(
            "  [{index}] {:<22}{:<36}{}",
            account.full_name(),
            account.email(),
            account.role()
        )
    }));
    lines.push(String::new());
    lines.push(format!(
        "Choose one with: sdv login --provider {} --account <n>",
        provider.key()
    ));
    lines.join("\n")
}

/// The consent step, shown while the round trip runs.
#[must_use]
pub fn render_consent(provider: Provider, branding: Branding, account: &Identity) -> String {
    [
        provider.consent_heading(),
        format!("  {} <{}>", account.full_name(), account.email()),
        "  • Name and profile picture".to_string(),
        "  • Email address".to_string(),
        "  • Organization and role".to_string(),
        format!("{}...", branding.confirm_label),
    ]
    .join("\n")
}
