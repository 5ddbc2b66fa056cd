//! The studies list.
//!
//! Sponsors see every study. Investigators see only studies with a site they
//! run ("my sites"), and their own uploads per study.

use sdv_auth::EdcSystem;
use sdv_core::Identity;
use sdv_core::entities::{Site, Study, StudyFile};

use crate::views::badges::{short_date, study_status_label};

/// Studies the identity gets to see. `mine` narrows sponsors the same way
/// investigators are always narrowed.
#[must_use]
pub fn visible<'a>(studies: &'a [Study], identity: &Identity, mine: bool) -> Vec<&'a Study> {
    let restrict = mine || identity.is_investigator();
    let full_name = identity.full_name();
    studies
        .iter()
        .filter(|study| !restrict || my_site(study, &full_name).is_some())
        .collect()
}

/// First site of `study` run by `full_name`.
#[must_use]
pub fn my_site<'a>(study: &'a Study, full_name: &str) -> Option<&'a Site> {
    study.sites.iter().find(|site| site.is_run_by(full_name))
}

/// Files in `files` uploaded by `full_name`.
#[must_use]
pub fn uploads_by(files: &[StudyFile], full_name: &str) -> usize {
    files
        .iter()
        .filter(|file| file.is_uploaded_by(full_name))
        .count()
}

/// `Dr. James Wilson (UCLA Medical Center • Oncology)` or the missing marker.
#[must_use]
pub fn investigator_line(study: &Study) -> String {
    study.principal_investigator.as_ref().map_or_else(
        || "⚠️ Missing Investigator".to_string(),
        |pi| format!("{} ({} • {})", pi.name, pi.institution, pi.specialty),
    )
}

#[must_use]
pub fn render(studies: &[&Study], identity: &Identity, edc: EdcSystem) -> String {
    let mut out = vec![
        "Clinical Studies".to_string(),
        "Manage your clinical trials and source data verification".to_string(),
    ];
    if studies.is_empty() {
        out.push(String::new());
        out.push(if identity.is_investigator() {
            "No studies assigned to you.".to_string()
        } else {
            "No studies found.".to_string()
        });
        return out.join("\n");
    }

    let full_name = identity.full_name();
    for study in studies {
        out.push(String::new());
        out.push(study.title.clone());
        out.push(format!("  {}  {}", study.id, study_status_label(study.status)));
        if identity.is_investigator() {
            if let Some(site) = my_site(study, &full_name) {
                out.push(format!("  Your Site: {}", site.name));
            }
            out.push(format!("  Sponsor: {}", study.sponsor));
            out.push(format!(
                "  Your Uploads: eSource Files {}, CRF Files {}",
                uploads_by(&study.e_source_files, &full_name),
                uploads_by(&study.crf_files, &full_name)
            ));
        } else {
            out.push(format!("  Sponsor: {}", study.sponsor));
            out.push(format!(
                "  Sites: {}/{} active",
                study.active_sites(),
                study.total_sites()
            ));
            out.push(format!("  Created: {}", short_date(&study.created_at)));
            out.push(format!("  Principal Investigator: {}", investigator_line(study)));
            out.push(format!("  EDC: {} connected via {}", edc.icon, edc.name));
        }
    }
    out.join("\n")
}
