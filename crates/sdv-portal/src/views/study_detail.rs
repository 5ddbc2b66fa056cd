use sdv_core::Identity;
use sdv_core::entities::{Study, StudyFile};

use crate::views::badges::{file_status, human_size, short_date, site_status, study_status_label};
use crate::views::studies::investigator_line;

#[must_use]
pub fn render(study: &Study, identity: &Identity) -> String {
    let full_name = identity.full_name();
    let mut out = vec![
        study.title.clone(),
        format!("{}  {}", study.id, study_status_label(study.status)),
        format!("Sponsor: {}", study.sponsor),
        format!("Created: {}", short_date(&study.created_at)),
        format!("Principal Investigator: {}", investigator_line(study)),
    ];
    if let Some(pi) = &study.principal_investigator {
        out.push(format!("  Email: {}", pi.email));
    }

    out.push(String::new());
    out.push("Protocol".to_string());
    out.push(if study.protocol.trim().is_empty() {
        "  (none)".to_string()
    } else {
        format!("  {}", study.protocol.trim())
    });

    out.push(String::new());
    out.push(format!(
        "Sites ({}/{} active)",
        study.active_sites(),
        study.total_sites()
    ));
    for site in &study.sites {
        let marker = if site.is_run_by(&full_name) {
            "  (your site)"
        } else {
            ""
        };
        out.push(format!(
            "  {} {} [{}] {}, {}{marker}",
            site_status(site.status),
            site.name,
            site.id,
            site.location,
            site.investigator
        ));
        let files = site.e_source_files.len() + site.crf_files.len();
        if files > 0 {
            out.push(format!(
                "      {} eSource, {} CRF",
                site.e_source_files.len(),
                site.crf_files.len()
            ));
        }
    }

    push_files(&mut out, "eSource Files", &study.e_source_files);
    push_files(&mut out, "CRF Files", &study.crf_files);
    out.join("\n")
}

fn push_files(out: &mut Vec<String>, heading: &str, files: &[StudyFile]) {
    out.push(String::new());
    out.push(format!("{heading} ({})", files.len()));
    for file in files {
        out.push(format!(
            "  {} {}  {}  {}  by {} on {}",
            file_status(file.status),
            file.name,
            human_size(file.size),
            file.status,
            file.uploaded_by,
            short_date(&file.uploaded_at)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::{draft_study, michael, oncology_study, sarah};

    #[test]
    fn detail_lists_sites_and_files_with_sizes() {
        let out = render(&oncology_study(), &sarah());
        assert!(out.starts_with("Phase III Trial: Novel Cancer Treatment\nSTD-001  🟢 ACTIVE"));
        assert!(out.contains("Sites (2/3 active)"));
        assert!(out.contains("🟡 Cleveland Clinic [SITE-003] Cleveland, OH, Dr. Emily Davis"));
        assert!(out.contains("eSource Files (2)"));
        assert!(out.contains("patient_001_visit1.pdf  1.5 MB  approved  by Michael Chen on 3/5/2024"));
        assert!(out.contains("crf_patient_001.pdf  512 B"));
        assert!(!out.contains("(your site)"));
    }

    #[test]
    fn investigator_sees_their_site_marked() {
        let out = render(&oncology_study(), &michael());
        assert!(out.contains("Mayo Clinic [SITE-002] Rochester, MN, Michael Chen  (your site)"));
    }

    #[test]
    fn draft_without_pi_or_files() {
        let out = render(&draft_study(), &sarah());
        assert!(out.contains("Principal Investigator: ⚠️ Missing Investigator"));
        assert!(out.contains("eSource Files (0)"));
        assert!(out.contains("CRF Files (0)"));
    }
}
