//! # sdv-auth
//!
//! Mock single-sign-on for the SDV platform.
//!
//! A [`SessionStore`] keeps the signed-in [`Identity`](sdv_core::Identity)
//! plus its auth-method label in a [`Storage`] backend ([`FileStorage`] on
//! disk, [`MemoryStorage`] in tests). A [`LoginFlow`] walks one of the three
//! fictitious [`Provider`]s through account selection and consent, then writes
//! the session after a simulated round trip. [`Guard`] decides, on every
//! navigation, whether a [`Route`] renders or redirects.

pub mod catalog;
pub mod error;
pub mod guard;
pub mod login_flow;
pub mod provider;
pub mod session_store;
pub mod storage;

pub use error::AuthError;
pub use guard::{Access, Guard, GuardDecision, Route};
pub use login_flow::{FlowState, LoginFlow, SignInOutcome};
pub use provider::{EdcSystem, Provider};
pub use session_store::SessionStore;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Open the session stored on disk at the configured location.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if no session directory can be resolved.
pub fn file_session(
    config: &sdv_config::SessionConfig,
) -> Result<SessionStore<FileStorage>, AuthError> {
    FileStorage::from_config(config).map(SessionStore::new)
}

/// Sign out: remove the stored identity and auth method.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if the backend can't be modified.
pub fn logout<B: Storage>(store: &SessionStore<B>) -> Result<(), AuthError> {
    store.clear()?;
    tracing::info!("signed out");
    Ok(())
}
