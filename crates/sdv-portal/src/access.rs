//! The access-request handshake between a sponsor and a trial site.
//!
//! ```text
//! sponsor                         trial-site API                     site
//! AccessHandshake::run ──POST request-access──▶ prompt active
//!                                               ◀──GET check-access-request── AccessWatcher (every 5 s)
//!                                               ◀──POST access-response────── AccessWatcher::answer
//!        poll check-access-response (1 s, 60x) ─▶ granted | denied
//! ```
//!
//! Both sides talk to the site through [`AccessChannel`], which
//! [`TrialSiteClient`] implements.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sdv_core::entities::Study;
use sdv_gateway::{
    AccessAck, AccessPrompt, AccessRequest, AccessStatus, GatewayError, TrialSiteClient,
};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Prompt text when the site sends an empty message.
pub const DEFAULT_PROMPT: &str = "Give access to the system?";

/// The four access-request endpoints of a trial site.
pub trait AccessChannel: Send + Sync + 'static {
    fn check_access_request(
        &self,
    ) -> impl Future<Output = Result<AccessPrompt, GatewayError>> + Send;

    fn respond_access(
        &self,
        granted: bool,
    ) -> impl Future<Output = Result<AccessAck, GatewayError>> + Send;

    fn request_access(
        &self,
        request: &AccessRequest,
    ) -> impl Future<Output = Result<AccessAck, GatewayError>> + Send;

    fn check_access_response(
        &self,
    ) -> impl Future<Output = Result<AccessStatus, GatewayError>> + Send;
}

impl AccessChannel for TrialSiteClient {
    async fn check_access_request(&self) -> Result<AccessPrompt, GatewayError> {
        Self::check_access_request(self).await
    }

    async fn respond_access(&self, granted: bool) -> Result<AccessAck, GatewayError> {
        Self::respond_access(self, granted).await
    }

    async fn request_access(&self, request: &AccessRequest) -> Result<AccessAck, GatewayError> {
        Self::request_access(self, request).await
    }

    async fn check_access_response(&self) -> Result<AccessStatus, GatewayError> {
        Self::check_access_response(self).await
    }
}

// ── Site side ──────────────────────────────────────────────────────

/// Polls the site for pending access requests in the background.
///
/// Every tick spawns its own fetch, so a slow response never delays the next
/// poll; overlapping fetches land in whatever order they finish. The current
/// prompt (or `None`) is published on a watch channel.
pub struct AccessWatcher<S> {
    site: Arc<S>,
    prompt: Arc<watch::Sender<Option<String>>>,
    task: JoinHandle<()>,
}

impl<S: AccessChannel> AccessWatcher<S> {
    /// Start polling. The first poll happens one interval from now.
    pub fn spawn(site: Arc<S>, poll_interval: Duration) -> Self {
        let (prompt, _) = watch::channel(None);
        let prompt = Arc::new(prompt);
        let task = tokio::spawn(poll_loop(
            Arc::clone(&site),
            Arc::clone(&prompt),
            poll_interval,
        ));
        tracing::debug!(?poll_interval, "access watcher started");
        Self { site, prompt, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.prompt.subscribe()
    }

    /// Send the answer and dismiss the prompt. The prompt is dismissed even
    /// when the answer can't be delivered.
    pub async fn answer(&self, granted: bool) -> Result<AccessAck, GatewayError> {
        let result = self.site.respond_access(granted).await;
        self.prompt.send_replace(None);
        result
    }
}

impl<S> Drop for AccessWatcher<S> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop<S: AccessChannel>(
    site: Arc<S>,
    prompt: Arc<watch::Sender<Option<String>>>,
    period: Duration,
) {
    let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticks.tick().await;
        tokio::spawn(poll_once(Arc::clone(&site), Arc::clone(&prompt)));
    }
}

async fn poll_once<S: AccessChannel>(site: Arc<S>, prompt: Arc<watch::Sender<Option<String>>>) {
    match site.check_access_request().await {
        Ok(AccessPrompt {
            active: true,
            message,
        }) => {
            let message = if message.trim().is_empty() {
                DEFAULT_PROMPT.to_string()
            } else {
                message
            };
            prompt.send_if_modified(|current| {
                if current.as_deref() == Some(message.as_str()) {
                    return false;
                }
                tracing::info!(%message, "access request received");
                *current = Some(message);
                true
            });
        }
        Ok(_) => {}
        Err(error) => tracing::warn!(%error, "access request poll failed"),
    }
}

// ── Sponsor side ───────────────────────────────────────────────────

/// How a sponsor's access request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HandshakeOutcome {
    /// The study has no PI to ask.
    NoInvestigator,
    /// The site refused to raise the prompt.
    NotSent { message: String },
    Granted { investigator: String },
    Denied { investigator: String },
    TimedOut { investigator: String },
}

impl HandshakeOutcome {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::NoInvestigator => "⚠️ No Investigator",
            Self::NotSent { .. } => "❌ Error",
            Self::Granted { .. } => "✅ Access Granted",
            Self::Denied { .. } => "❌ Access Denied",
            Self::TimedOut { .. } => "⏱️ Request Timeout",
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NoInvestigator => "Please add an investigator first before connecting.".into(),
            Self::NotSent { .. } => "Failed to send access request. Please try again.".into(),
            Self::Granted { investigator } => format!("Access GRANTED by {investigator}"),
            Self::Denied { investigator } => format!("Access DENIED by {investigator}"),
            Self::TimedOut { .. } => "No response received from investigator. The request may have timed out.".into(),
        }
    }

    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}

/// Sends one access request and waits for the site's answer.
pub struct AccessHandshake<S> {
    site: Arc<S>,
    poll_interval: Duration,
    max_attempts: u32,
}

impl<S: AccessChannel> AccessHandshake<S> {
    pub const fn new(site: Arc<S>, poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            site,
            poll_interval,
            max_attempts,
        }
    }

    /// What to show while waiting, if the study has someone to wait for.
    #[must_use]
    pub fn waiting_message(study: &Study) -> Option<String> {
        study.principal_investigator.as_ref().map(|pi| {
            format!(
                "Access request sent to {}\n\nWaiting for their response...",
                pi.name
            )
        })
    }

    /// Ask the study's PI for access and poll for the answer.
    ///
    /// Poll failures are logged and count as an unanswered attempt.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] only if the request itself can't be sent.
    pub async fn run(&self, study: &Study) -> Result<HandshakeOutcome, GatewayError> {
        let Some(pi) = &study.principal_investigator else {
            return Ok(HandshakeOutcome::NoInvestigator);
        };
        let request = AccessRequest {
            study_id: study.id.clone(),
            investigator: pi.name.clone(),
            message: format!("Access request for {}", study.title),
        };
        let ack = self.site.request_access(&request).await?;
        if !ack.success {
            tracing::warn!(study = %study.id, message = %ack.message, "site refused access request");
            return Ok(HandshakeOutcome::NotSent {
                message: ack.message,
            });
        }
        tracing::info!(study = %study.id, investigator = %pi.name, "access request sent");
        Ok(self.await_answer(&pi.name).await)
    }

    async fn await_answer(&self, investigator: &str) -> HandshakeOutcome {
        let mut ticks =
            tokio::time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for attempt in 1..=self.max_attempts {
            ticks.tick().await;
            match self.site.check_access_response().await {
                Ok(AccessStatus::Granted) => {
                    return HandshakeOutcome::Granted {
                        investigator: investigator.to_string(),
                    };
                }
                Ok(AccessStatus::Denied) => {
                    return HandshakeOutcome::Denied {
                        investigator: investigator.to_string(),
                    };
                }
                Ok(AccessStatus::Pending) => tracing::debug!(attempt, "access still pending"),
                Err(error) => tracing::warn!(%error, attempt, "access response poll failed"),
            }
        }
        tracing::warn!(attempts = self.max_attempts, "access request timed out");
        HandshakeOutcome::TimedOut {
            investigator: investigator.to_string(),
        }
    }
}
