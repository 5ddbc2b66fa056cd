//! Pure conversions from wire records to domain objects. No I/O.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sdv_core::entities::{Site, Study, StudyFile};
use sdv_core::enums::{FileStatus, FileType, SiteStatus, StudyStatus};
use sdv_core::{CoreError, Identity, Role};

use crate::error::GatewayError;
use crate::wire::{WireFile, WirePatient, WirePatientFile, WireSite, WireStudy, WireUser};
use crate::{Patient, PatientDocument};

fn invalid(kind: &'static str) -> impl Fn(CoreError) -> GatewayError {
    move |e| GatewayError::InvalidRecord {
        kind,
        reason: e.to_string(),
    }
}

/// Parse an API timestamp.
///
/// Accepts RFC 3339, ISO-8601 without an offset (read as UTC, which is what
/// Python's `isoformat()` emits for naive datetimes) and a bare date.
///
/// # Errors
///
/// Returns `GatewayError::InvalidRecord` if none of the forms match.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, GatewayError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(GatewayError::InvalidRecord {
        kind: "timestamp",
        reason: format!("unrecognized timestamp '{raw}'"),
    })
}

/// # Errors
///
/// Returns `GatewayError::InvalidRecord` if the role is not Sponsor or Investigator.
pub fn user_to_identity(user: WireUser) -> Result<Identity, GatewayError> {
    let role: Role = user.role.parse().map_err(invalid("user"))?;
    Ok(Identity::new(
        user.first_name,
        user.last_name,
        user.email_address,
        user.company_association,
        role,
    ))
}

/// Missing status means `pending`.
///
/// # Errors
///
/// Returns `GatewayError::InvalidRecord` on an unknown type, status or timestamp.
pub fn file_from_wire(file: WireFile) -> Result<StudyFile, GatewayError> {
    let file_type: FileType = file.file_type.parse().map_err(invalid("file"))?;
    let status = file
        .status
        .as_deref()
        .map(str::parse::<FileStatus>)
        .transpose()
        .map_err(invalid("file"))?
        .unwrap_or_default();
    Ok(StudyFile {
        id: file.id,
        name: file.name,
        file_type,
        uploaded_by: file.uploaded_by,
        uploaded_at: parse_timestamp(&file.uploaded_at)?,
        status,
        size: file.size,
    })
}

/// # Errors
///
/// Returns `GatewayError::InvalidRecord` if the site or any nested file is invalid.
pub fn site_from_wire(site: WireSite) -> Result<Site, GatewayError> {
    let status = site
        .status
        .as_deref()
        .map(str::parse::<SiteStatus>)
        .transpose()
        .map_err(invalid("site"))?
        .unwrap_or_default();
    let mut out = Site::new(site.id, site.name, site.investigator, site.location, status);
    for file in site.e_source_files {
        out.add_esource_file(file_from_wire(file)?);
    }
    for file in site.crf_files {
        out.add_crf_file(file_from_wire(file)?);
    }
    Ok(out)
}

/// Site and file order is preserved.
///
/// # Errors
///
/// Returns `GatewayError::InvalidRecord` if the study or anything nested in it
/// is invalid.
pub fn study_from_wire(study: WireStudy) -> Result<Study, GatewayError> {
    let status: StudyStatus = study.status.parse().map_err(invalid("study"))?;
    let mut out = Study::new(
        study.id,
        study.title,
        study.protocol,
        study.sponsor,
        status,
        parse_timestamp(&study.created_at)?,
        study.principal_investigator,
    );
    for site in study.sites {
        out.add_site(site_from_wire(site)?);
    }
    for file in study.e_source_files {
        out.add_esource_file(file_from_wire(file)?);
    }
    for file in study.crf_files {
        out.add_crf_file(file_from_wire(file)?);
    }
    Ok(out)
}

#[must_use]
pub fn patient_from_wire(patient: WirePatient) -> Patient {
    Patient {
        id: patient.patient_id,
        documents: patient.files.into_iter().map(document_from_wire).collect(),
    }
}

fn document_from_wire(file: WirePatientFile) -> PatientDocument {
    #[allow(clippy::cast_possible_truncation)]
    let modified = file
        .modified
        .filter(|secs| secs.is_finite())
        .and_then(|secs| DateTime::from_timestamp_millis((secs * 1000.0) as i64));
    PatientDocument {
        filename: file.filename,
        path: file.file_path,
        size: file.file_size,
        modified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const STUDY: &str = r#"{
        "id": "STD-001",
        "title": "Phase III Clinical Trial: Novel Diabetes Treatment",
        "protocol": "A randomized, double-blind study.",
        "sponsor": "Regeneron Pharmaceuticals",
        "status": "active",
        "createdAt": "2024-01-15T00:00:00",
        "sites": [
            {
                "id": "SITE-001",
                "name": "Johns Hopkins Hospital",
                "investigator": "Dr. Michael Chen",
                "location": "Baltimore, MD",
                "status": "active",
                "eSourceFiles": [
                    {
                        "id": "FILE-001",
                        "name": "eSource_Template_v2.1.pdf",
                        "type": "esource",
                        "uploadedBy": "Dr. Sarah Johnson",
                        "uploadedAt": "2024-01-20T00:00:00",
                        "status": "approved",
                        "size": 2048576
                    }
                ],
                "crfFiles": []
            },
            {
                "id": "SITE-002",
                "name": "Mayo Clinic",
                "investigator": "Dr. Robert Brown",
                "location": "Rochester, MN",
                "status": "pending"
            }
        ],
        "principalInvestigator": {
            "name": "Dr. Michael Chen",
            "email": "michael.chen@site.com",
            "institution": "Johns Hopkins Hospital",
            "specialty": "Endocrinology"
        },
        "totalSites": 2,
        "activeSites": 1,
        "hasPrincipalInvestigator": true
    }"#;

    fn wire_study(json: &str) -> WireStudy {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn maps_nested_study() {
        let study = study_from_wire(wire_study(STUDY)).unwrap();
        assert_eq!(study.status, StudyStatus::Active);
        assert_eq!(
            study.created_at,
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(study.total_sites(), 2);
        assert_eq!(study.active_sites(), 1);
        assert!(study.has_principal_investigator());
        assert_eq!(study.sites[1].status, SiteStatus::Pending);
        assert!(study.sites[1].e_source_files.is_empty());

        let file = &study.sites[0].e_source_files[0];
        assert_eq!(file.file_type, FileType::Esource);
        assert_eq!(file.status, FileStatus::Approved);
        assert_eq!(file.size, 2_048_576);
    }

    #[test]
    fn absent_lists_and_investigator_are_empty() {
        let study = study_from_wire(wire_study(
            r#"{"id":"STD-9","title":"T","status":"draft","createdAt":"2024-03-01","principalInvestigator":null}"#,
        ))
        .unwrap();
        assert!(study.sites.is_empty());
        assert!(study.e_source_files.is_empty());
        assert!(study.crf_files.is_empty());
        assert!(!study.has_principal_investigator());
    }

    #[test]
    fn unknown_study_status_is_invalid_record() {
        let err = study_from_wire(wire_study(
            r#"{"id":"S","title":"T","status":"paused","createdAt":"2024-01-01T00:00:00"}"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::InvalidRecord { kind: "study", ref reason } if reason.contains("paused")
        ));
    }

    #[test]
    fn bad_nested_file_fails_the_study() {
        let json = STUDY.replace("\"approved\"", "\"archived\"");
        assert!(matches!(
            study_from_wire(wire_study(&json)),
            Err(GatewayError::InvalidRecord { kind: "file", .. })
        ));
    }

    #[rstest]
    #[case("2024-01-15T00:00:00", 2024, 1, 15, 0)]
    #[case("2024-01-15T09:30:00.123456", 2024, 1, 15, 9)]
    #[case("2024-01-15T10:00:00+01:00", 2024, 1, 15, 9)]
    #[case("2024-01-15T09:00:00Z", 2024, 1, 15, 9)]
    #[case("2024-01-15", 2024, 1, 15, 0)]
    fn parses_timestamp_forms(
        #[case] raw: &str,
        #[case] y: i32,
        #[case] m: u32,
        #[case] d: u32,
        #[case] h: u32,
    ) {
        let ts = parse_timestamp(raw).unwrap();
        assert_eq!(
            ts.date_naive(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        );
        assert_eq!(chrono::Timelike::hour(&ts), h);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(GatewayError::InvalidRecord { kind: "timestamp", .. })
        ));
    }

    #[test]
    fn maps_user_and_rejects_unknown_role() {
        let user: WireUser = serde_json::from_str(
            r#"{"firstName":"Lisa","lastName":"Davis","emailAddress":"lisa.davis@regeneron.com",
                "companyAssociation":"Veera Vault","role":"Sponsor","fullName":"Lisa Davis","initials":"LD"}"#,
        )
        .unwrap();
        let identity = user_to_identity(user.clone()).unwrap();
        assert_eq!(identity.initials(), "LD");
        assert!(identity.is_sponsor());

        let monitor = WireUser {
            role: "Monitor".into(),
            ..user
        };
        assert!(matches!(
            user_to_identity(monitor),
            Err(GatewayError::InvalidRecord { kind: "user", .. })
        ));
    }

    #[test]
    fn maps_patient_documents() {
        let patient: WirePatient = serde_json::from_str(
            r#"{"patient_id":"P001","file_count":2,"files":[
                {"filename":"visit1.docx","file_path":"/patients/P001/visit1.docx","file_type":"document","file_size":20480,"modified":1700000000.5},
                {"filename":"labs.docx","file_url":"/patients/P001/labs.docx","file_size":1024}
            ]}"#,
        )
        .unwrap();
        let patient = patient_from_wire(patient);
        assert_eq!(patient.id, "P001");
        assert_eq!(patient.documents.len(), 2);
        assert_eq!(patient.documents[1].path, "/patients/P001/labs.docx");
        assert_eq!(patient.documents[1].modified, None);
        assert_eq!(
            patient.documents[0].modified.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }
}
