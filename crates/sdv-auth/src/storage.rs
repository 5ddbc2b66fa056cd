//! Key-value backends for the session.
//!
//! [`Storage`] is the seam the [`SessionStore`](crate::session_store::SessionStore)
//! writes through: [`FileStorage`] keeps one file per key on disk, and
//! [`MemoryStorage`] keeps everything in a map for tests and embedding.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::AuthError;

/// A string key-value store, the local equivalent of browser storage.
pub trait Storage: Send + Sync {
    /// Read a key. Absent keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the backend can't be read.
    fn read(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// Write a key, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the backend can't be written.
    fn write(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Remove a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the backend can't be modified.
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, AuthError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AuthError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        (**self).remove(key)
    }
}

// --- File backend ---

/// One file per key under a private directory (0700, files 0600 on Unix).
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Build from configuration, falling back to the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if no directory can be resolved.
    pub fn from_config(config: &sdv_config::SessionConfig) -> Result<Self, AuthError> {
        config.resolve_dir().map(Self::new).ok_or_else(|| {
            AuthError::SessionStore("data directory not found; set SDV_SESSION__DIR".into())
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn ensure_dir(&self) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AuthError::SessionStore(format!("mkdir {}: {e}", self.dir.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, AuthError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::SessionStore(format!(
                "read {}: {e}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.ensure_dir()?;
        let path = self.key_path(key);
        fs::write(&path, value)
            .map_err(|e| AuthError::SessionStore(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::SessionStore(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::SessionStore(format!(
                "failed to delete {}: {e}",
                path.display()
            ))),
        }
    }
}

// --- Memory backend ---

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, AuthError> {
        self.entries
            .lock()
            .map_err(|_| AuthError::SessionStore("memory storage lock poisoned".into()))
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.entries()?.remove(key);
        Ok(())
    }
}
