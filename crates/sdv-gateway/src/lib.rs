//! # sdv-gateway
//!
//! HTTP clients for the two external APIs the SDV platform reads from:
//! - the study-management portal API ([`PortalClient`]): users, studies,
//!   investigators, CRF templates and database statistics
//! - the trial-site document API ([`TrialSiteClient`]): patients, their
//!   documents, and the access-request handshake
//!
//! Responses are decoded into the [`wire`] shapes and then converted by the
//! pure functions in [`mapping`] into `sdv-core` domain objects. No retries,
//! no caching: every call is one request.

pub mod mapping;
pub mod portal;
pub mod trial_site;
pub mod wire;

mod error;
mod http;

pub use error::GatewayError;
pub use portal::{PortalClient, StudyFilter, StudyPage, UserFilter, UserPage};
pub use trial_site::TrialSiteClient;
pub use wire::{
    AccessAck, AccessPrompt, AccessRequest, AccessStatus, CrfFile, DatabaseStats, HealthStatus,
    NewStudy,
};

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────

/// A trial-site patient and the source documents on file for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub documents: Vec<PatientDocument>,
}

/// One document served by the trial-site API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDocument {
    pub filename: String,
    /// Server-relative path, e.g. `/patients/P001/visit1.docx`.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Build the shared reqwest client.
///
/// # Panics
///
/// Panics if the underlying `reqwest::Client` fails to build.
fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("sdv/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .expect("reqwest client should build")
}

/// Join a base URL and a path without doubling or dropping the slash.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
