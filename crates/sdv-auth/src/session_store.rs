use sdv_core::Identity;

use crate::error::AuthError;
use crate::storage::Storage;

/// Key holding the serialized identity.
pub const USER_KEY: &str = "user";
/// Key holding the plain auth-method label (e.g. `"Google SSO"`).
pub const AUTH_METHOD_KEY: &str = "authMethod";

/// The single "currently signed in" identity plus its auth-method label.
///
/// Every read goes to the backend; nothing is cached, so two stores over the
/// same backend always agree.
#[derive(Debug, Clone)]
pub struct SessionStore<B> {
    backend: B,
}

impl<B: Storage> SessionStore<B> {
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Persist the identity's stored fields, replacing any previous session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the backend write fails.
    pub fn store(&self, identity: &Identity) -> Result<(), AuthError> {
        let record = serde_json::to_string(identity)
            .map_err(|e| AuthError::SessionStore(format!("serialize identity: {e}")))?;
        self.backend.write(USER_KEY, &record)
    }

    /// Rebuild the stored identity, or `None` if nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CorruptSession` if the stored record is not a valid
    /// identity, or `AuthError::SessionStore` if the backend can't be read.
    pub fn get(&self) -> Result<Option<Identity>, AuthError> {
        let Some(record) = self.backend.read(USER_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&record)
            .map(Some)
            .map_err(|e| AuthError::CorruptSession(e.to_string()))
    }

    /// Like [`get`](Self::get), but a missing session is an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if nobody is signed in.
    pub fn require(&self) -> Result<Identity, AuthError> {
        self.get()?.ok_or(AuthError::NotAuthenticated)
    }

    /// Remove the identity and the auth-method label. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if a key can't be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.backend.remove(USER_KEY)?;
        self.backend.remove(AUTH_METHOD_KEY)
    }

    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the backend write fails.
    pub fn set_auth_method(&self, label: &str) -> Result<(), AuthError> {
        self.backend.write(AUTH_METHOD_KEY, label)
    }

    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the backend can't be read.
    pub fn auth_method(&self) -> Result<Option<String>, AuthError> {
        Ok(self
            .backend
            .read(AUTH_METHOD_KEY)?
            .map(|label| label.trim().to_string()))
    }

    /// Write both halves of a session. If the label can't be written the
    /// identity is removed again, so a failed sign-in leaves nobody signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if either write fails.
    pub fn sign_in(&self, identity: &Identity, auth_method: &str) -> Result<(), AuthError> {
        self.store(identity)?;
        if let Err(error) = self.set_auth_method(auth_method) {
            if let Err(rollback) = self.backend.remove(USER_KEY) {
                tracing::warn!(%rollback, "could not remove identity after failed sign-in");
            }
            return Err(error);
        }
        tracing::debug!(
            user = %identity.full_name(),
            auth_method,
            "session stored"
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`get`](Self::get): a corrupt record is `CorruptSession`, not
    /// a signed-in user.
    pub fn is_signed_in(&self) -> Result<bool, AuthError> {
        Ok(self.get()?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use sdv_core::Role;

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    fn robert() -> Identity {
        Identity::new(
            "Robert",
            "Brown",
            "robert.brown@site.com",
            "Veera Vault",
            Role::Investigator,
        )
    }

    #[test]
    fn store_then_get_roundtrips_fields() {
        let store = store();
        store.store(&robert()).unwrap();

        let loaded = store.get().unwrap().expect("session present");
        assert_eq!(loaded.first_name(), "Robert");
        assert_eq!(loaded.last_name(), "Brown");
        assert_eq!(loaded.email(), "robert.brown@site.com");
        assert_eq!(loaded.organization(), "Veera Vault");
        assert_eq!(loaded.role(), Role::Investigator);
        assert_eq!(loaded.initials(), "RB");
    }

    #[test]
    fn store_overwrites_previous_identity() {
        let store = store();
        store.store(&robert()).unwrap();
        let lisa = Identity::new(
            "Lisa",
            "Davis",
            "lisa.davis@regeneron.com",
            "Veera Vault",
            Role::Sponsor,
        );
        store.store(&lisa).unwrap();
        assert_eq!(store.get().unwrap(), Some(lisa));
    }

    #[test]
    fn get_without_session_is_none() {
        assert_eq!(store().get().unwrap(), None);
        assert!(matches!(
            store().require(),
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[test]
    fn clear_removes_both_keys_and_is_idempotent() {
        let store = store();
        store.sign_in(&robert(), "Veera Vault SSO").unwrap();
        assert!(store.is_signed_in().unwrap());

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(store.auth_method().unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn malformed_record_is_corrupt_session() {
        let store = store();
        store.backend().write(USER_KEY, "{not json").unwrap();
        assert!(matches!(store.get(), Err(AuthError::CorruptSession(_))));
    }

    #[test]
    fn record_with_unknown_role_is_corrupt_session() {
        let store = store();
        store
            .backend()
            .write(
                USER_KEY,
                r#"{"firstName":"A","lastName":"B","emailAddress":"a@b","companyAssociation":"X","role":"Monitor"}"#,
            )
            .unwrap();
        assert!(matches!(store.get(), Err(AuthError::CorruptSession(_))));
    }

    #[test]
    fn is_signed_in_agrees_with_get_on_corrupt_record() {
        let store = store();
        store.backend().write(USER_KEY, "{not json").unwrap();
        assert!(matches!(
            store.is_signed_in(),
            Err(AuthError::CorruptSession(_))
        ));
    }

    /// Accepts every write except the auth-method label.
    #[derive(Default)]
    struct LabelWriteFails(MemoryStorage);

    impl Storage for LabelWriteFails {
        fn read(&self, key: &str) -> Result<Option<String>, AuthError> {
            self.0.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<(), AuthError> {
            if key == AUTH_METHOD_KEY {
                return Err(AuthError::SessionStore("disk full".into()));
            }
            self.0.write(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), AuthError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn failed_label_write_rolls_back_identity() {
        let store = SessionStore::new(LabelWriteFails::default());
        assert!(matches!(
            store.sign_in(&robert(), "Veera Vault SSO"),
            Err(AuthError::SessionStore(ref msg)) if msg == "disk full"
        ));
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(store.auth_method().unwrap(), None);
        assert!(!store.is_signed_in().unwrap());
    }

    #[test]
    fn stored_record_has_no_derived_fields() {
        let store = store();
        store.store(&robert()).unwrap();
        let raw = store.backend().read(USER_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("initials").is_none());
        assert!(value.get("fullName").is_none());
        assert_eq!(value["emailAddress"], "robert.brown@site.com");
    }
}
