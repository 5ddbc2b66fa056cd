use sdv_auth::EdcSystem;
use sdv_core::Identity;

/// Top bar: platform title with the EDC badge, then the profile line.
#[must_use]
pub fn render(identity: Option<&Identity>, edc: EdcSystem) -> String {
    let (initials, name, email) = identity.map_or_else(
        || ("U".to_string(), "User".to_string(), "user@example.com".to_string()),
        |user| {
            let initials = user.initials();
            (
                if initials.is_empty() { "U".to_string() } else { initials },
                user.full_name(),
                user.email().to_string(),
            )
        },
    );
    format!(
        "SDV Platform  {} {}\n[{initials}] {name} <{email}>  Sign Out: sdv logout",
        edc.icon, edc.name
    )
}
