//! Trial-site (hospital document browser) API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:5500".to_string()
}

/// Site-side poll for a pending access request.
const fn default_poll_interval_secs() -> u64 {
    5
}

/// Sponsor-side poll for the site's answer.
const fn default_response_poll_interval_secs() -> u64 {
    1
}

const fn default_response_max_attempts() -> u32 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrialSiteConfig {
    /// Base URL of the trial-site API (patients, documents, access requests).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Interval between access-request polls, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Interval between access-response polls, in seconds.
    #[serde(default = "default_response_poll_interval_secs")]
    pub response_poll_interval_secs: u64,

    /// Number of access-response polls before giving up.
    #[serde(default = "default_response_max_attempts")]
    pub response_max_attempts: u32,
}

impl Default for TrialSiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_secs: default_poll_interval_secs(),
            response_poll_interval_secs: default_response_poll_interval_secs(),
            response_max_attempts: default_response_max_attempts(),
        }
    }
}
