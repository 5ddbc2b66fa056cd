//! # sdv-config
//!
//! Layered configuration loading for the SDV platform using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SDV_*` prefix, `__` as separator)
//! 2. Project-level `.sdv/config.toml`
//! 3. User-level `~/.config/sdv/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SDV_PORTAL__BASE_URL` -> `portal.base_url`,
//! `SDV_SSO__ROUND_TRIP_MS` -> `sso.round_trip_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sdv_config::SdvConfig;
//!
//! let config = SdvConfig::load_with_dotenv().expect("config");
//! println!("portal API: {}", config.portal.base_url);
//! ```

mod error;
mod portal;
mod session;
mod sso;
mod trial_site;

pub use error::ConfigError;
pub use portal::PortalConfig;
pub use session::SessionConfig;
pub use sso::SsoConfig;
pub use trial_site::TrialSiteConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SdvConfig {
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub trial_site: TrialSiteConfig,
    #[serde(default)]
    pub sso: SsoConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl SdvConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".sdv/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SDV_").split("__"))
    }

    /// Reject values the clients can't work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("portal.base_url", &self.portal.base_url)?;
        check_url("trial_site.base_url", &self.trial_site.base_url)?;
        check_positive("portal.timeout_secs", self.portal.timeout_secs)?;
        check_positive(
            "trial_site.poll_interval_secs",
            self.trial_site.poll_interval_secs,
        )?;
        check_positive(
            "trial_site.response_poll_interval_secs",
            self.trial_site.response_poll_interval_secs,
        )?;
        check_positive(
            "trial_site.response_max_attempts",
            u64::from(self.trial_site.response_max_attempts),
        )?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sdv").join("config.toml"))
    }

    /// Load `.env` from the workspace root, or the current directory.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

fn check_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected an http(s) URL, got '{value}'"),
        })
    }
}

fn check_positive(field: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be greater than zero".to_string(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SdvConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sso.round_trip_ms, 2000);
        assert!(config.session.dir.is_empty());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = SdvConfig::figment();
        let config: SdvConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.trial_site.poll_interval_secs, 5);
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let mut config = SdvConfig::default();
        config.portal.base_url = "localhost:5001".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "portal.base_url"));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = SdvConfig::default();
        config.trial_site.poll_interval_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("trial_site.poll_interval_secs"));
    }
}
