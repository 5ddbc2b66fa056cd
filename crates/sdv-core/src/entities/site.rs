use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::StudyFile;
use crate::enums::SiteStatus;

/// A hospital or clinic taking part in a study.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    /// Display name of the site investigator (e.g. `"Dr. Sarah Johnson"`).
    pub investigator: String,
    pub location: String,
    pub status: SiteStatus,
    pub e_source_files: Vec<StudyFile>,
    pub crf_files: Vec<StudyFile>,
}

impl Site {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        investigator: impl Into<String>,
        location: impl Into<String>,
        status: SiteStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            investigator: investigator.into(),
            location: location.into(),
            status,
            e_source_files: Vec::new(),
            crf_files: Vec::new(),
        }
    }

    pub fn add_esource_file(&mut self, file: StudyFile) {
        self.e_source_files.push(file);
    }

    pub fn add_crf_file(&mut self, file: StudyFile) {
        self.crf_files.push(file);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SiteStatus::Active
    }

    /// Whether `full_name` runs this site. Names are compared exactly.
    #[must_use]
    pub fn is_run_by(&self, full_name: &str) -> bool {
        self.investigator == full_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mayo(investigator: &str) -> Site {
        Site::new(
            "SITE-002",
            "Mayo Clinic",
            investigator,
            "Rochester, MN",
            SiteStatus::Active,
        )
    }

    #[test]
    fn investigator_match_is_exact() {
        assert!(mayo("Michael Chen").is_run_by("Michael Chen"));
        assert!(!mayo("Michael Chen").is_run_by("Michael Cheng"));
    }

    #[test]
    fn case_or_title_differences_do_not_match() {
        assert!(!mayo("Michael Chen").is_run_by("michael chen"));
        assert!(!mayo("Dr. Michael Chen").is_run_by("Michael Chen"));
    }
}
