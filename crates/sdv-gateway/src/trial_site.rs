//! Client for the trial-site document API.

use std::time::Duration;

use serde::Serialize;

use crate::error::GatewayError;
use crate::http::read_json;
use crate::mapping::patient_from_wire;
use crate::wire::{
    AccessAck, AccessPrompt, AccessRequest, AccessResponseEnvelope, AccessStatus, HealthStatus,
    PatientsEnvelope, WirePatient,
};
use crate::Patient;

#[derive(Serialize)]
struct AccessAnswer {
    granted: bool,
}

/// HTTP client for the trial-site API.
#[derive(Debug, Clone)]
pub struct TrialSiteClient {
    http: reqwest::Client,
    base_url: String,
}

impl TrialSiteClient {
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

    fn url(&self, path: &str) -> String {
        crate::join_url(&self.base_url, path)
    }

    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails.
    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        read_json(self.http.get(self.url("/health")).send().await?).await
    }

    /// Every patient with at least one document, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the body is malformed.
    pub async fn patients(&self) -> Result<Vec<Patient>, GatewayError> {
        let envelope: PatientsEnvelope =
            read_json(self.http.get(self.url("/api/patients")).send().await?).await?;
        Ok(envelope
            .patients
            .into_values()
            .map(patient_from_wire)
            .collect())
    }

    /// # Errors
    ///
    /// Returns `GatewayError::Api` with status 404 for an unknown patient.
    pub async fn patient(&self, id: &str) -> Result<Patient, GatewayError> {
        let url = self.url(&format!("/api/patients/{}", urlencoding::encode(id)));
        let patient: WirePatient = read_json(self.http.get(&url).send().await?).await?;
        Ok(patient_from_wire(patient))
    }

    /// Absolute URL of a served document path.
    #[must_use]
    pub fn file_url(&self, path: &str) -> String {
        self.url(path)
    }

    /// Is a sponsor waiting for an answer?
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the body is malformed.
    pub async fn check_access_request(&self) -> Result<AccessPrompt, GatewayError> {
        read_json(
            self.http
                .get(self.url("/api/check-access-request"))
                .send()
                .await?,
        )
        .await
    }

    /// Answer the pending access request.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the API rejects it.
    pub async fn respond_access(&self, granted: bool) -> Result<AccessAck, GatewayError> {
        let resp = self
            .http
            .post(self.url("/api/access-response"))
            .json(&AccessAnswer { granted })
            .send()
            .await?;
        let ack: AccessAck = read_json(resp).await?;
        tracing::info!(granted, message = %ack.message, "access response sent");
        Ok(ack)
    }

    /// Raise an access prompt on the site side.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the API rejects it.
    pub async fn request_access(&self, request: &AccessRequest) -> Result<AccessAck, GatewayError> {
        let resp = self
            .http
            .post(self.url("/api/request-access"))
            .json(request)
            .send()
            .await?;
        read_json(resp).await
    }

    /// Where the last access request stands.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the status is not one
    /// of `pending`, `granted`, `denied`.
    pub async fn check_access_response(&self) -> Result<AccessStatus, GatewayError> {
        let envelope: AccessResponseEnvelope = read_json(
            self.http
                .get(self.url("/api/check-access-response"))
                .send()
                .await?,
        )
        .await?;
        Ok(envelope.status)
    }
}
