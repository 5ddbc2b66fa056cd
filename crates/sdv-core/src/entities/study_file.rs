use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FileStatus, FileType};

/// A document (protocol, eSource or CRF) uploaded to a study or site.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudyFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: FileStatus,
    /// Size in bytes.
    pub size: u64,
}

impl StudyFile {
    /// Build a file record with the defaults new uploads get: `pending`, size 0.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        file_type: FileType,
        uploaded_by: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file_type,
            uploaded_by: uploaded_by.into(),
            uploaded_at,
            status: FileStatus::default(),
            size: 0,
        }
    }

    /// Whether `full_name` uploaded this file. Names are compared exactly.
    #[must_use]
    pub fn is_uploaded_by(&self, full_name: &str) -> bool {
        self.uploaded_by == full_name
    }
}
