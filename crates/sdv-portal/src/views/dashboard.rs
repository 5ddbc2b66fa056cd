use sdv_core::Identity;

/// One entry point offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub label: &'static str,
    pub command: &'static str,
}

const VIEW_STUDIES: Action = Action {
    label: "View Studies",
    command: "sdv studies",
};

const CREATE_STUDY: Action = Action {
    label: "Create Study",
    command: "sdv create-study --title <title>",
};

/// Sponsors may also create studies.
#[must_use]
pub fn actions(identity: &Identity) -> Vec<Action> {
    if identity.is_sponsor() {
        vec![VIEW_STUDIES, CREATE_STUDY]
    } else {
        vec![VIEW_STUDIES]
    }
}

#[must_use]
pub fn render(identity: &Identity) -> String {
    let mut lines = vec![
        "Welcome to SDV Platform".to_string(),
        "Your clinical trial data management dashboard".to_string(),
        String::new(),
    ];
    lines.extend(
        actions(identity)
            .into_iter()
            .map(|action| format!("  {:<14}{}", action.label, action.command)),
    );
    lines.push(String::new());
    lines.push(format!("Logged in as: {}", identity.full_name()));
    lines.push(format!("Role: {}", identity.role()));
    lines.push(format!("Company: {}", identity.organization()));
    lines.join("\n")
}
