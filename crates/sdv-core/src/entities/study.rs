use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{PrincipalInvestigator, Site, StudyFile};
use crate::enums::StudyStatus;

/// A clinical study with its sites and documents.
///
/// Built fresh from wire data; the `add_*` methods exist for that
/// construction step only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    pub id: String,
    pub title: String,
    pub protocol: String,
    pub sponsor: String,
    pub status: StudyStatus,
    pub created_at: DateTime<Utc>,
    pub sites: Vec<Site>,
    pub principal_investigator: Option<PrincipalInvestigator>,
    pub e_source_files: Vec<StudyFile>,
    pub crf_files: Vec<StudyFile>,
}

impl Study {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        protocol: impl Into<String>,
        sponsor: impl Into<String>,
        status: StudyStatus,
        created_at: DateTime<Utc>,
        principal_investigator: Option<PrincipalInvestigator>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            protocol: protocol.into(),
            sponsor: sponsor.into(),
            status,
            created_at,
            sites: Vec::new(),
            principal_investigator,
            e_source_files: Vec::new(),
            crf_files: Vec::new(),
        }
    }

    pub fn add_site(&mut self, site: Site) {
        self.sites.push(site);
    }

    pub fn add_esource_file(&mut self, file: StudyFile) {
        self.e_source_files.push(file);
    }

    pub fn add_crf_file(&mut self, file: StudyFile) {
        self.crf_files.push(file);
    }

    #[must_use]
    pub fn total_sites(&self) -> usize {
        self.sites.len()
    }

    /// Number of sites whose status is `active`.
    #[must_use]
    pub fn active_sites(&self) -> usize {
        self.sites.iter().filter(|site| site.is_active()).count()
    }

    #[must_use]
    pub const fn has_principal_investigator(&self) -> bool {
        self.principal_investigator.is_some()
    }

    /// Sites run by `full_name`, in study order.
    pub fn sites_run_by<'a>(&'a self, full_name: &'a str) -> impl Iterator<Item = &'a Site> + 'a {
        self.sites.iter().filter(move |site| site.is_run_by(full_name))
    }
}
