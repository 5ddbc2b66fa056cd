//! Local session storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory holding the session keys. Empty means the platform data
    /// directory (`~/.local/share/sdv/session` on Linux).
    #[serde(default)]
    pub dir: String,
}

impl SessionConfig {
    /// Resolve the session directory, falling back to the platform data dir.
    #[must_use]
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        if self.dir.is_empty() {
            dirs::data_dir().map(|p| p.join("sdv").join("session"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = SessionConfig {
            dir: "/tmp/sdv-session".into(),
        };
        assert_eq!(
            config.resolve_dir(),
            Some(PathBuf::from("/tmp/sdv-session"))
        );
    }

    #[test]
    fn empty_dir_falls_back_to_data_dir() {
        let config = SessionConfig::default();
        if let Some(path) = config.resolve_dir() {
            assert!(path.ends_with("sdv/session"));
        }
    }
}
