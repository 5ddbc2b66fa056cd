use std::time::Duration;

use anyhow::Context;
use sdv_auth::{AuthError, EdcSystem, FileStorage, Guard, GuardDecision, Route, SessionStore};
use sdv_config::SdvConfig;
use sdv_core::Identity;
use sdv_gateway::{PortalClient, TrialSiteClient};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: SdvConfig,
    pub session: SessionStore<FileStorage>,
    pub portal: PortalClient,
    pub trial_site: TrialSiteClient,
}

impl AppContext {
    /// Open the on-disk session and build both API clients.
    pub fn init(config: SdvConfig) -> anyhow::Result<Self> {
        let session =
            sdv_auth::file_session(&config.session).context("failed to open the session store")?;
        let timeout = Duration::from_secs(config.portal.timeout_secs);
        let portal = PortalClient::new(config.portal.base_url.clone(), timeout);
        let trial_site = TrialSiteClient::new(config.trial_site.base_url.clone(), timeout);

        tracing::debug!(
            portal = %config.portal.base_url,
            trial_site = %config.trial_site.base_url,
            session_dir = %session.backend().dir().display(),
            "application context ready"
        );

        Ok(Self {
            config,
            session,
            portal,
            trial_site,
        })
    }

    /// The signed-in identity. A record that can't be read back is treated
    /// as signed out and removed.
    pub fn current_identity(&self) -> anyhow::Result<Option<Identity>> {
        recover_session(&self.session, SessionStore::get)
    }

    /// EDC badge for the stored auth method.
    pub fn edc(&self) -> anyhow::Result<EdcSystem> {
        let label = self.session.auth_method()?;
        Ok(EdcSystem::for_auth_method(label.as_deref()))
    }

    /// Run the route guard against the stored session.
    pub fn navigate(&self, route: Route) -> anyhow::Result<GuardDecision> {
        recover_session(&self.session, |store| Guard::evaluate(route.clone(), store))
    }

    /// Identity for a protected route, or an error telling the user to sign in.
    pub fn require_identity(&self, route: Route) -> anyhow::Result<Identity> {
        let decision = self.navigate(route)?;
        if decision.is_redirect() {
            anyhow::bail!("not signed in. Run `sdv login --provider <google|veera|medidata>` first");
        }
        self.current_identity()?
            .context("session disappeared while reading it")
    }
}

/// Run `read` against the store; on a corrupt record, clear it and retry once.
fn recover_session<B, T, F>(store: &SessionStore<B>, read: F) -> anyhow::Result<T>
where
    B: sdv_auth::Storage,
    F: Fn(&SessionStore<B>) -> Result<T, AuthError>,
{
    match read(store) {
        Err(AuthError::CorruptSession(reason)) => {
            tracing::warn!(%reason, "stored session is unreadable; signing out");
            store.clear()?;
            Ok(read(store)?)
        }
        other => Ok(other?),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sdv_auth::session_store::USER_KEY;
    use sdv_auth::{MemoryStorage, Storage};
    use sdv_core::Role;

    use super::*;

    #[test]
    fn corrupt_session_is_cleared_and_reads_as_signed_out() {
        let store = SessionStore::new(MemoryStorage::new());
        store.backend().write(USER_KEY, "{broken").unwrap();
        store.set_auth_method("Google SSO").unwrap();

        let identity = recover_session(&store, SessionStore::get).unwrap();
        assert_eq!(identity, None);
        assert_eq!(store.backend().read(USER_KEY).unwrap(), None);
        assert_eq!(store.auth_method().unwrap(), None);
    }

    #[test]
    fn corrupt_session_redirects_protected_route_to_login() {
        let store = SessionStore::new(MemoryStorage::new());
        store.backend().write(USER_KEY, "42").unwrap();

        let decision =
            recover_session(&store, |s| Guard::evaluate(Route::Studies, s)).unwrap();
        assert_eq!(decision, GuardDecision::Redirect(Route::Login));
    }

    #[test]
    fn valid_session_passes_through() {
        let store = SessionStore::new(MemoryStorage::new());
        let david = Identity::new("David", "Kim", "david.kim@site.com", "Google", Role::Investigator);
        store.sign_in(&david, "Google SSO").unwrap();

        assert_eq!(recover_session(&store, SessionStore::get).unwrap(), Some(david));
    }

    #[test]
    fn context_uses_configured_session_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SdvConfig::default();
        config.session.dir = dir.path().display().to_string();

        let ctx = AppContext::init(config).unwrap();
        assert_eq!(ctx.session.backend().dir(), dir.path());
        assert_eq!(ctx.current_identity().unwrap(), None);
        assert_eq!(ctx.edc().unwrap().name, "EDC");
        assert!(ctx.require_identity(Route::Dashboard).is_err());
    }
}
