//! Mock single-sign-on configuration.

use serde::{Deserialize, Serialize};

const fn default_round_trip_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SsoConfig {
    /// Simulated provider round trip between "Continue" and the session write.
    #[serde(default = "default_round_trip_ms")]
    pub round_trip_ms: u64,
}

impl Default for SsoConfig {
    fn default() -> Self {
        Self {
            round_trip_ms: default_round_trip_ms(),
        }
    }
}

impl SsoConfig {
    #[must_use]
    pub const fn round_trip(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.round_trip_ms)
    }
}
