use sdv_config::SdvConfig;

/// Sections that can be set from the environment, with an example key each.
const SECTIONS: [(&str, &str); 4] = [
    ("SDV_PORTAL", "SDV_PORTAL__BASE_URL"),
    ("SDV_TRIAL_SITE", "SDV_TRIAL_SITE__BASE_URL"),
    ("SDV_SSO", "SDV_SSO__ROUND_TRIP_MS"),
    ("SDV_SESSION", "SDV_SESSION__DIR"),
];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &SdvConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SdvConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let defaults = SdvConfig::default();

    let untouched = |prefix: &str| match prefix {
        "SDV_PORTAL" => {
            config.portal.base_url == defaults.portal.base_url
                && config.portal.timeout_secs == defaults.portal.timeout_secs
        }
        "SDV_TRIAL_SITE" => {
            config.trial_site.base_url == defaults.trial_site.base_url
                && config.trial_site.poll_interval_secs == defaults.trial_site.poll_interval_secs
        }
        "SDV_SSO" => config.sso.round_trip_ms == defaults.sso.round_trip_ms,
        "SDV_SESSION" => config.session.dir == defaults.session.dir,
        _ => false,
    };

    SECTIONS
        .iter()
        .filter(|(prefix, _)| untouched(prefix) && has_single_underscore_key(&env_keys, prefix))
        .map(|(prefix, example)| {
            format!(
                "{prefix}* env vars exist but the section is still at its defaults. Use double underscores (example: {example})."
            )
        })
        .collect()
}

/// `SDV_PORTAL_BASE_URL` instead of `SDV_PORTAL__BASE_URL`.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
