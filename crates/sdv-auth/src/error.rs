use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in; run `sdv login`")]
    NotAuthenticated,

    /// The stored session record could not be parsed.
    #[error("stored session is corrupt: {0}")]
    CorruptSession(String),

    #[error("session store error: {0}")]
    SessionStore(String),

    #[error("unknown SSO provider '{0}' (expected google, veera or medidata)")]
    UnknownProvider(String),

    #[error("{provider} has no account #{index}")]
    UnknownAccount { provider: String, index: usize },

    #[error("cannot {action} while the login flow is {state}")]
    InvalidFlowState {
        action: &'static str,
        state: &'static str,
    },

    #[error("sign-in was cancelled before the provider answered")]
    SignInCancelled,
}
