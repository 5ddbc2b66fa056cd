//! Client for the study-management portal API.

use std::time::Duration;

use sdv_core::entities::{PrincipalInvestigator, Study};
use sdv_core::enums::StudyStatus;
use sdv_core::{Identity, Role};
use serde::Serialize;

use crate::error::GatewayError;
use crate::http::read_json;
use crate::mapping::{study_from_wire, user_to_identity};
use crate::wire::{
    CrfEnvelope, CrfFile, DatabaseStats, HealthStatus, NewStudy, StatsEnvelope, StudiesEnvelope,
    StudyEnvelope, UsersEnvelope,
};

/// Query parameters for `GET /api/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub company: Option<String>,
    pub role: Option<Role>,
}

/// Query parameters for `GET /api/studies`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyFilter {
    pub status: Option<StudyStatus>,
    pub sponsor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPage {
    pub users: Vec<Identity>,
    pub total_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyPage {
    pub studies: Vec<Study>,
    pub total_count: usize,
}

impl UserFilter {
    fn query(&self) -> String {
        query_string(&[
            ("company", self.company.as_deref()),
            ("role", self.role.map(Role::as_str)),
        ])
    }
}

impl StudyFilter {
    fn query(&self) -> String {
        query_string(&[
            ("status", self.status.map(StudyStatus::as_str)),
            ("sponsor", self.sponsor.as_deref()),
        ])
    }
}

/// `?a=1&b=2` over the present pairs, or empty.
fn query_string(pairs: &[(&str, Option<&str>)]) -> String {
    let parts: Vec<String> = pairs
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={}", urlencoding::encode(v))))
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

/// HTTP client for the portal API.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: crate::http_client(timeout),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        crate::join_url(&self.base_url, path)
    }

    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the API is unhealthy
    /// enough to answer with an error status.
    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        read_json(self.http.get(self.url("/health")).send().await?).await
    }

    /// List users, optionally filtered by company and role.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the HTTP request fails, the API returns a
    /// non-success status, or a user record is invalid.
    pub async fn users(&self, filter: &UserFilter) -> Result<UserPage, GatewayError> {
        let url = format!("{}{}", self.url("/api/users"), filter.query());
        self.fetch_users(&url).await
    }

    /// # Errors
    ///
    /// Same as [`users`](Self::users).
    pub async fn users_by_company(&self, company: &str) -> Result<UserPage, GatewayError> {
        let url = self.url(&format!("/api/users/{}", urlencoding::encode(company)));
        self.fetch_users(&url).await
    }

    /// # Errors
    ///
    /// Same as [`users`](Self::users).
    pub async fn users_by_role(&self, role: Role) -> Result<UserPage, GatewayError> {
        self.users(&UserFilter {
            company: None,
            role: Some(role),
        })
        .await
    }

    async fn fetch_users(&self, url: &str) -> Result<UserPage, GatewayError> {
        let envelope: UsersEnvelope = read_json(self.http.get(url).send().await?).await?;
        let total_count = envelope.total_count.unwrap_or(envelope.users.len());
        let users = envelope
            .users
            .into_iter()
            .map(user_to_identity)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UserPage { users, total_count })
    }

    /// List studies, optionally filtered by status and sponsor.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the HTTP request fails, the API returns a
    /// non-success status, or a study record is invalid.
    pub async fn studies(&self, filter: &StudyFilter) -> Result<StudyPage, GatewayError> {
        let url = format!("{}{}", self.url("/api/studies"), filter.query());
        let envelope: StudiesEnvelope = read_json(self.http.get(&url).send().await?).await?;
        let total_count = envelope.total_count.unwrap_or(envelope.studies.len());
        let studies = envelope
            .studies
            .into_iter()
            .map(study_from_wire)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = studies.len(), "fetched studies");
        Ok(StudyPage {
            studies,
            total_count,
        })
    }

    /// # Errors
    ///
    /// Returns `GatewayError::Api` with status 404 if no such study exists.
    pub async fn study(&self, id: &str) -> Result<Study, GatewayError> {
        let url = self.url(&format!("/api/studies/{}", urlencoding::encode(id)));
        let envelope: StudyEnvelope = read_json(self.http.get(&url).send().await?).await?;
        study_from_wire(envelope.study)
    }

    /// Create a study; the API assigns its id and initial status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the API rejects the study or the created
    /// record is invalid.
    pub async fn create_study(&self, study: &NewStudy) -> Result<Study, GatewayError> {
        let resp = self
            .http
            .post(self.url("/api/studies"))
            .json(study)
            .send()
            .await?;
        let envelope: StudyEnvelope = read_json(resp).await?;
        if let Some(message) = &envelope.message {
            tracing::info!(id = %envelope.study.id, %message, "study created");
        }
        study_from_wire(envelope.study)
    }

    /// Attach a principal investigator to an existing study.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the study does not exist or the API rejects
    /// the investigator.
    pub async fn add_investigator(
        &self,
        study_id: &str,
        investigator: &PrincipalInvestigator,
    ) -> Result<Study, GatewayError> {
        let url = self.url(&format!(
            "/api/studies/{}/investigator",
            urlencoding::encode(study_id)
        ));
        let resp = self.http.post(&url).json(investigator).send().await?;
        let envelope: StudyEnvelope = read_json(resp).await?;
        study_from_wire(envelope.study)
    }

    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the body is malformed.
    pub async fn database_stats(&self) -> Result<DatabaseStats, GatewayError> {
        let envelope: StatsEnvelope =
            read_json(self.http.get(self.url("/api/database/stats")).send().await?).await?;
        Ok(envelope.statistics)
    }

    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the body is malformed.
    pub async fn crf_files(&self) -> Result<Vec<CrfFile>, GatewayError> {
        let envelope: CrfEnvelope =
            read_json(self.http.get(self.url("/api/files/crf")).send().await?).await?;
        Ok(envelope.files)
    }

    /// Where a CRF template can be previewed or downloaded.
    #[must_use]
    pub fn crf_file_url(&self, filename: &str) -> String {
        self.url(&format!("/api/files/crf/{}", urlencoding::encode(filename)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_filter_has_no_query() {
        assert_eq!(StudyFilter::default().query(), "");
        assert_eq!(UserFilter::default().query(), "");
    }

    #[test]
    fn filters_encode_values() {
        let filter = StudyFilter {
            status: Some(StudyStatus::OnHold),
            sponsor: Some("Biogen Inc.".into()),
        };
        assert_eq!(filter.query(), "?status=on-hold&sponsor=Biogen%20Inc.");

        let filter = UserFilter {
            company: Some("Veera Vault".into()),
            role: Some(Role::Investigator),
        };
        assert_eq!(filter.query(), "?company=Veera%20Vault&role=Investigator");
    }

    #[test]
    fn crf_url_is_under_files_endpoint() {
        let client = PortalClient::new("http://localhost:5001/", Duration::from_secs(1));
        assert_eq!(
            client.crf_file_url("Adverse Events.pdf"),
            "http://localhost:5001/api/files/crf/Adverse%20Events.pdf"
        );
    }

    #[test]
    fn new_study_body_uses_portal_field_names() {
        let body = NewStudy {
            title: "Phase II Study".into(),
            protocol: "protocol.txt".into(),
            sponsor: "Regeneron".into(),
            principal_investigator: Some(PrincipalInvestigator {
                name: "Dr. Test PI".into(),
                email: "test.pi@hospital.com".into(),
                institution: "Test Medical Center".into(),
                specialty: "Internal Medicine".into(),
            }),
            ..NewStudy::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["principalInvestigator"]["name"], "Dr. Test PI");
        assert!(value.get("phase").is_none());
        assert!(value.get("indication").is_none());
    }

    #[tokio::test]
    async fn unreachable_api_is_transient_http_error() {
        // port 9 (discard) is closed on any sane test host
        let client = PortalClient::new("http://127.0.0.1:9", Duration::from_secs(2));
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, GatewayError::Http(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn parse_stats_fixture() {
        let envelope: StatsEnvelope = serde_json::from_str(
            r#"{"statistics": {
                "total_users": 12,
                "total_studies": 3,
                "users_by_company": {"Google": 4, "Medidata": 4, "Veera Vault": 4},
                "studies_by_status": {"active": 1, "draft": 1, "on-hold": 1},
                "studies_without_investigator": 2
            }}"#,
        )
        .unwrap();
        assert_eq!(envelope.statistics.total_users, 12);
        assert_eq!(envelope.statistics.users_by_company["Veera Vault"], 4);
        assert_eq!(envelope.statistics.studies_without_investigator, 2);
    }

    #[test]
    fn parse_crf_fixture() {
        let envelope: CrfEnvelope = serde_json::from_str(
            r#"{"files": [
                {"id": "crf-1", "name": "Demographics.pdf", "type": "pdf", "description": "Baseline demographics"},
                {"id": "crf-2", "name": "Vitals.pdf", "type": "pdf"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(envelope.files.len(), 2);
        assert_eq!(envelope.files[1].description, None);
    }
}
