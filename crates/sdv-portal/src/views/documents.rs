//! The trial-site document browser.

use sdv_gateway::Patient;

use crate::views::badges::{short_date, size_kb};

/// Files listed on a patient card before collapsing the rest.
const CARD_PREVIEW: usize = 3;

const HEADER: [&str; 2] = [
    "🏥 Hospital Document Management System",
    "Mock Trial Site - Patient Source Documents",
];

#[must_use]
pub fn render_patients(patients: &[Patient]) -> String {
    let mut out: Vec<String> = HEADER.iter().map(ToString::to_string).collect();
    if patients.is_empty() {
        out.push(String::new());
        out.push("No patients found.".to_string());
        return out.join("\n");
    }
    for patient in patients {
        out.push(String::new());
        out.extend(card(patient));
    }
    out.join("\n")
}

fn card(patient: &Patient) -> Vec<String> {
    let mut lines = vec![
        patient.id.clone(),
        format!("  {} documents", patient.documents.len()),
    ];
    lines.extend(
        patient
            .documents
            .iter()
            .take(CARD_PREVIEW)
            .map(|doc| format!("  📄 {}", doc.filename)),
    );
    let hidden = patient.documents.len().saturating_sub(CARD_PREVIEW);
    if hidden > 0 {
        lines.push(format!("  +{hidden} more"));
    }
    lines
}

#[must_use]
pub fn render_patient(patient: &Patient) -> String {
    let mut out = vec![format!("Patient: {}", patient.id)];
    if patient.documents.is_empty() {
        out.push("  No documents on file.".to_string());
    }
    for doc in &patient.documents {
        out.push(String::new());
        out.push(format!("  📄 {}", doc.filename));
        out.push(format!("     Size: {}", size_kb(doc.size)));
        if let Some(modified) = &doc.modified {
            out.push(format!("     Modified: {}", short_date(modified)));
        }
        out.push(format!("     Download: sdv download {}", doc.path));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdv_gateway::PatientDocument;

    fn patient(id: &str, files: usize) -> Patient {
        Patient {
            id: id.to_string(),
            documents: (1..=files)
                .map(|n| PatientDocument {
                    filename: format!("visit{n}.docx"),
                    path: format!("/patients/{id}/visit{n}.docx"),
                    size: 20_480,
                    modified: None,
                })
                .collect(),
        }
    }

    #[test]
    fn card_shows_three_files_then_more() {
        let out = render_patients(&[patient("P001", 5)]);
        assert!(out.starts_with("🏥 Hospital Document Management System"));
        assert!(out.contains("P001\n  5 documents"));
        assert!(out.contains("📄 visit3.docx"));
        assert!(!out.contains("📄 visit4.docx"));
        assert!(out.contains("+2 more"));
    }

    #[test]
    fn small_card_has_no_more_line() {
        let out = render_patients(&[patient("P002", 3)]);
        assert!(!out.contains("more"));
    }

    #[test]
    fn detail_lists_sizes_in_kb_and_download_paths() {
        let out = render_patient(&patient("P001", 2));
        assert!(out.starts_with("Patient: P001"));
        assert!(out.contains("Size: 20.00 KB"));
        assert!(out.contains("Download: sdv download /patients/P001/visit2.docx"));
    }

    #[test]
    fn no_patients_message() {
        assert!(render_patients(&[]).ends_with("No patients found."));
    }
}
