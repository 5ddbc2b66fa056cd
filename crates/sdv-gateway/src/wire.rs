//! JSON shapes exactly as the two APIs send them.
//!
//! Statuses, roles and timestamps stay raw strings here; [`crate::mapping`]
//! turns them into domain values and rejects anything out of range. Extra
//! fields the API adds (`fullName`, `totalSites`, ...) are ignored.

use std::collections::BTreeMap;

use sdv_core::entities::PrincipalInvestigator;
use serde::{Deserialize, Serialize};

// ── Portal API ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub company_association: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(default)]
    pub uploaded_by: String,
    pub uploaded_at: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSite {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub investigator: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub e_source_files: Vec<WireFile>,
    #[serde(default)]
    pub crf_files: Vec<WireFile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStudy {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub sponsor: String,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub sites: Vec<WireSite>,
    #[serde(default)]
    pub principal_investigator: Option<PrincipalInvestigator>,
    #[serde(default)]
    pub e_source_files: Vec<WireFile>,
    #[serde(default)]
    pub crf_files: Vec<WireFile>,
}

#[derive(Debug, Deserialize)]
pub struct UsersEnvelope {
    pub users: Vec<WireUser>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct StudiesEnvelope {
    pub studies: Vec<WireStudy>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

/// `{study}` from GET, and `{message, study}` from the POST endpoints.
#[derive(Debug, Deserialize)]
pub struct StudyEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub study: WireStudy,
}

#[derive(Debug, Deserialize)]
pub struct StatsEnvelope {
    pub statistics: DatabaseStats,
}

/// Counts reported by `/api/database/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub total_users: u64,
    pub total_studies: u64,
    #[serde(default)]
    pub users_by_company: BTreeMap<String, u64>,
    #[serde(default)]
    pub studies_by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub studies_without_investigator: u64,
}

/// One entry of the CRF template list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrfFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CrfEnvelope {
    pub files: Vec<CrfFile>,
}

/// Body of `POST /api/studies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudy {
    pub title: String,
    pub protocol: String,
    pub sponsor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_investigator: Option<PrincipalInvestigator>,
}

/// Free-form health payload; only `status` is common to both APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "active" | "ok")
    }
}

// ── Trial-site API ─────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct WirePatientFile {
    pub filename: String,
    /// `file_path` in the listing, `file_url` in the per-patient view.
    #[serde(alias = "file_url")]
    pub file_path: String,
    #[serde(default)]
    pub file_size: u64,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub modified: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePatient {
    pub patient_id: String,
    #[serde(default)]
    pub files: Vec<WirePatientFile>,
}

#[derive(Debug, Deserialize)]
pub struct PatientsEnvelope {
    pub patients: BTreeMap<String, WirePatient>,
}

/// Pending access prompt on the site side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPrompt {
    pub active: bool,
    #[serde(default)]
    pub message: String,
}

/// A sponsor's request to read a site's documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRequest {
    pub study_id: String,
    pub investigator: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessAck {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessStatus {
    Pending,
    Granted,
    Denied,
}

#[derive(Debug, Deserialize)]
pub struct AccessResponseEnvelope {
    pub status: AccessStatus,
}
