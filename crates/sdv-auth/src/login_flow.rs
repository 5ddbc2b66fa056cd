//! The mock SSO modal as a state machine.
//!
//! ```text
//!             select_account          confirm
//! AccountSelection ──────▶ Consent ──────▶ SigningIn ──complete()──▶ (closed, session written)
//!        ▲                   │                 │
//!        └──────── back ─────┘                 │
//!   close() from any state discards the selection; a pending complete() then
//!   returns SignInCancelled and the session store is never touched.
//! ```
//!
//! One `LoginFlow` serves every provider: the provider decides the account
//! list, the modal text and the auth-method label written on success.

use std::sync::Arc;
use std::time::Duration;

use sdv_core::Identity;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::catalog;
use crate::error::AuthError;
use crate::guard::Route;
use crate::provider::{Branding, Provider};
use crate::session_store::SessionStore;
use crate::storage::Storage;

/// Default delay of the fake provider round trip.
pub const DEFAULT_ROUND_TRIP: Duration = Duration::from_secs(2);

/// The delayed "provider answered" event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedRoundTrip {
    deadline: Instant,
}

impl SimulatedRoundTrip {
    #[must_use]
    pub fn start(duration: Duration) -> Self {
        Self {
            deadline: Instant::now() + duration,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    async fn wait(self) {
        tokio::time::sleep_until(self.deadline).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    AccountSelection,
    Consent { selected: usize },
    SigningIn {
        selected: usize,
        round_trip: SimulatedRoundTrip,
    },
}

impl FlowState {
    const fn name(&self) -> &'static str {
        match self {
            Self::AccountSelection => "selecting an account",
            Self::Consent { .. } => "awaiting consent",
            Self::SigningIn { .. } => "signing in",
        }
    }
}

/// What a finished sign-in produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    pub identity: Identity,
    pub auth_method: &'static str,
    /// Where the host navigates next.
    pub landing: Route,
}

/// Closes a flow from another task while `complete()` is pending.
#[derive(Debug, Clone)]
pub struct FlowCloser {
    closed: Arc<watch::Sender<bool>>,
}

impl FlowCloser {
    pub fn close(&self) {
        self.closed.send_replace(true);
    }
}

#[derive(Debug)]
pub struct LoginFlow<B> {
    provider: Provider,
    accounts: Vec<Identity>,
    store: SessionStore<B>,
    round_trip: Duration,
    state: FlowState,
    open: bool,
    cancelled: bool,
    closed: Arc<watch::Sender<bool>>,
}

impl<B: Storage> LoginFlow<B> {
    #[must_use]
    pub fn new(provider: Provider, store: SessionStore<B>, round_trip: Duration) -> Self {
        let (closed, _) = watch::channel(true);
        Self {
            provider,
            accounts: catalog::accounts(provider),
            store,
            round_trip,
            state: FlowState::AccountSelection,
            open: false,
            cancelled: false,
            closed: Arc::new(closed),
        }
    }

    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub const fn branding(&self) -> Branding {
        self.provider.branding()
    }

    #[must_use]
    pub fn accounts(&self) -> &[Identity] {
        &self.accounts
    }

    #[must_use]
    pub const fn state(&self) -> FlowState {
        self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore<B> {
        &self.store
    }

    /// The account picked in the current flow, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Identity> {
        match self.state {
            FlowState::AccountSelection => None,
            FlowState::Consent { selected } | FlowState::SigningIn { selected, .. } => {
                self.accounts.get(selected)
            }
        }
    }

    #[must_use]
    pub fn closer(&self) -> FlowCloser {
        FlowCloser {
            closed: Arc::clone(&self.closed),
        }
    }

    /// Show the modal on the account list.
    pub fn open(&mut self) {
        self.open = true;
        self.cancelled = false;
        self.state = FlowState::AccountSelection;
        // Closers handed out before this open must not reach the new flow.
        self.closed = Arc::new(watch::channel(false).0);
        tracing::debug!(provider = self.provider.key(), "login modal opened");
    }

    /// # Errors
    ///
    /// `InvalidFlowState` unless an account list is showing;
    /// `UnknownAccount` if `index` is past the end of it.
    pub fn select_account(&mut self, index: usize) -> Result<&Identity, AuthError> {
        self.expect_open("select an account")?;
        if self.state != FlowState::AccountSelection {
            return Err(self.invalid("select an account"));
        }
        if index >= self.accounts.len() {
            return Err(AuthError::UnknownAccount {
                provider: self.provider.display_name().to_string(),
                index,
            });
        }
        self.state = FlowState::Consent { selected: index };
        Ok(&self.accounts[index])
    }

    /// "Cancel" on the consent step.
    ///
    /// # Errors
    ///
    /// `InvalidFlowState` unless the flow is awaiting consent.
    pub fn back(&mut self) -> Result<(), AuthError> {
        self.expect_open("go back")?;
        match self.state {
            FlowState::Consent { .. } => {
                self.state = FlowState::AccountSelection;
                Ok(())
            }
            _ => Err(self.invalid("go back")),
        }
    }

    /// Accept the consent screen and start the round trip.
    ///
    /// # Errors
    ///
    /// `InvalidFlowState` unless the flow is awaiting consent.
    pub fn confirm(&mut self) -> Result<SimulatedRoundTrip, AuthError> {
        self.expect_open("confirm")?;
        let FlowState::Consent { selected } = self.state else {
            return Err(self.invalid("confirm"));
        };
        let round_trip = SimulatedRoundTrip::start(self.round_trip);
        self.state = FlowState::SigningIn {
            selected,
            round_trip,
        };
        Ok(round_trip)
    }

    /// Wait for the provider, then persist the session and close the modal.
    ///
    /// Nothing is written if the flow is closed first, or if this future is
    /// dropped before it resolves.
    ///
    /// # Errors
    ///
    /// `SignInCancelled` if the flow was closed during the round trip;
    /// `InvalidFlowState` if no sign-in was started; `SessionStore` if the
    /// session can't be written, in which case the modal is closed and no
    /// session is left behind.
    pub async fn complete(&mut self) -> Result<SignInOutcome, AuthError> {
        let FlowState::SigningIn {
            selected,
            round_trip,
        } = self.state
        else {
            if self.cancelled {
                return Err(AuthError::SignInCancelled);
            }
            return Err(self.invalid("complete sign-in"));
        };

        let mut closed = self.closed.subscribe();
        let cancelled = tokio::select! {
            () = round_trip.wait() => false,
            res = closed.wait_for(|closed| *closed) => res.is_ok(),
        } || *self.closed.borrow();
        if cancelled {
            self.discard();
            tracing::debug!(provider = self.provider.key(), "sign-in cancelled");
            return Err(AuthError::SignInCancelled);
        }

        let identity = self.accounts[selected].clone();
        let auth_method = self.provider.auth_method();
        if let Err(error) = self.store.sign_in(&identity, auth_method) {
            self.closed.send_replace(true);
            self.open = false;
            self.state = FlowState::AccountSelection;
            tracing::warn!(%error, provider = self.provider.key(), "sign-in not saved");
            return Err(error);
        }

        self.open = false;
        self.state = FlowState::AccountSelection;
        self.closed.send_replace(true);
        tracing::info!(
            user = %identity.full_name(),
            auth_method,
            "signed in"
        );

        Ok(SignInOutcome {
            identity,
            auth_method,
            landing: Route::Studies,
        })
    }

    /// The ✕ button. Valid in every state, never touches the session.
    pub fn close(&mut self) {
        self.closed.send_replace(true);
        self.discard();
    }

    fn discard(&mut self) {
        if matches!(self.state, FlowState::SigningIn { .. }) {
            self.cancelled = true;
        }
        self.open = false;
        self.state = FlowState::AccountSelection;
    }

    fn expect_open(&self, action: &'static str) -> Result<(), AuthError> {
        if self.open {
            Ok(())
        } else {
            Err(AuthError::InvalidFlowState {
                action,
                state: "closed",
            })
        }
    }

    const fn invalid(&self, action: &'static str) -> AuthError {
        AuthError::InvalidFlowState {
            action,
            state: self.state.name(),
        }
    }
}
