//! Routes and the session-based guard in front of them.

use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;
use crate::session_store::SessionStore;
use crate::storage::Storage;

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Studies,
    CreateStudy,
    StudyDetail(String),
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Signed-in users only.
    Protected,
    /// Signed-out users only.
    PublicOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

impl GuardDecision {
    /// The route that ends up on screen.
    #[must_use]
    pub const fn route(&self) -> &Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

impl Route {
    /// Where a signed-in user lands when sent away from a public-only page.
    pub const AUTHENTICATED_LANDING: Self = Self::Dashboard;

    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Login => Access::PublicOnly,
            Self::Dashboard | Self::Studies | Self::CreateStudy | Self::StudyDetail(_) => {
                Access::Protected
            }
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Studies => "/studies".to_string(),
            Self::CreateStudy => "/create-study".to_string(),
            Self::StudyDetail(id) => format!("/study/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route matches '{0}'")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    /// Accepts paths with or without the leading slash. `/` maps to Login.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('/').trim_end_matches('/');
        match trimmed {
            "" | "login" => Ok(Self::Login),
            "dashboard" => Ok(Self::Dashboard),
            "studies" => Ok(Self::Studies),
            "create-study" => Ok(Self::CreateStudy),
            other => other
                .strip_prefix("study/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Self::StudyDetail(id.to_string()))
                .ok_or_else(|| UnknownRoute(s.to_string())),
        }
    }
}

/// Stateless gate; every decision reads the store afresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct Guard;

impl Guard {
    /// Decide whether `route` renders for the current session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CorruptSession` if the stored identity can't be
    /// read back, or `AuthError::SessionStore` if the backend fails.
    pub fn evaluate<B: Storage>(
        route: Route,
        store: &SessionStore<B>,
    ) -> Result<GuardDecision, AuthError> {
        let signed_in = store.get()?.is_some();
        let decision = match (route.access(), signed_in) {
            (Access::Protected, true) | (Access::PublicOnly, false) => GuardDecision::Render(route),
            (Access::Protected, false) => GuardDecision::Redirect(Route::Login),
            (Access::PublicOnly, true) => GuardDecision::Redirect(Route::AUTHENTICATED_LANDING),
        };
        if let GuardDecision::Redirect(ref to) = decision {
            tracing::debug!(to = %to, "route guard redirect");
        }
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_store::USER_KEY;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sdv_core::{Identity, Role};

    fn signed_in() -> SessionStore<MemoryStorage> {
        let store = SessionStore::new(MemoryStorage::new());
        store
            .sign_in(
                &Identity::new("Amanda", "Taylor", "amanda.taylor@regeneron.com", "Medidata", Role::Sponsor),
                "Medidata SSO",
            )
            .unwrap();
        store
    }

    fn signed_out() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    #[rstest]
    #[case(Route::Dashboard)]
    #[case(Route::Studies)]
    #[case(Route::CreateStudy)]
    #[case(Route::StudyDetail("STD-001".into()))]
    fn protected_routes(#[case] route: Route) {
        assert_eq!(
            Guard::evaluate(route.clone(), &signed_in()).unwrap(),
            GuardDecision::Render(route.clone())
        );
        assert_eq!(
            Guard::evaluate(route, &signed_out()).unwrap(),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn login_is_public_only() {
        assert_eq!(
            Guard::evaluate(Route::Login, &signed_out()).unwrap(),
            GuardDecision::Render(Route::Login)
        );
        assert_eq!(
            Guard::evaluate(Route::Login, &signed_in()).unwrap(),
            GuardDecision::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn guard_sees_sign_out_immediately() {
        let store = signed_in();
        assert!(!Guard::evaluate(Route::Studies, &store).unwrap().is_redirect());
        store.clear().unwrap();
        assert!(Guard::evaluate(Route::Studies, &store).unwrap().is_redirect());
    }

    #[test]
    fn corrupt_session_is_an_error() {
        let store = signed_out();
        store.backend().write(USER_KEY, "garbage").unwrap();
        assert!(matches!(
            Guard::evaluate(Route::Dashboard, &store),
            Err(AuthError::CorruptSession(_))
        ));
    }

    #[rstest]
    #[case("/", Route::Login)]
    #[case("login", Route::Login)]
    #[case("/studies/", Route::Studies)]
    #[case("/create-study", Route::CreateStudy)]
    #[case("/study/STD-002", Route::StudyDetail("STD-002".into()))]
    fn parses_paths(#[case] raw: &str, #[case] expected: Route) {
        assert_eq!(raw.parse::<Route>().unwrap(), expected);
    }

    #[rstest]
    #[case("/study/")]
    #[case("/settings")]
    #[case("/study/a/b")]
    fn rejects_unknown_paths(#[case] raw: &str) {
        assert!(raw.parse::<Route>().is_err());
    }

    #[test]
    fn display_matches_path() {
        assert_eq!(Route::StudyDetail("STD-9".into()).to_string(), "/study/STD-9");
    }
}
