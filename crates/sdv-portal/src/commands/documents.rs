use anyhow::Context;
use sdv_gateway::Patient;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::commands::{DocumentsArgs, DownloadArgs};
use crate::context::AppContext;
use crate::output::output_view;
use crate::views;

#[derive(Serialize)]
struct PatientsResponse {
    patients: Vec<Patient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct DownloadResponse {
    url: String,
    opened: bool,
}

/// The trial-site document browser: every patient, or one in detail.
pub async fn browse(args: &DocumentsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let site = &ctx.trial_site;
    let fetched = match &args.patient {
        Some(id) => site.patient(id).await.map(|patient| vec![patient]),
        None => site.patients().await,
    };
    let response = match fetched {
        Ok(patients) => PatientsResponse {
            patients,
            error: None,
        },
        Err(error) => {
            tracing::warn!(%error, "failed to load patient documents");
            let message = match &args.patient {
                Some(id) if error.is_not_found() => format!("Patient {id} not found."),
                _ => "Failed to load patient documents.".to_string(),
            };
            PatientsResponse {
                patients: Vec::new(),
                error: Some(message),
            }
        }
    };

    let detail = args.patient.is_some();
    output_view(&response, flags.format, |r| {
        if let Some(error) = &r.error {
            return error.clone();
        }
        match r.patients.first() {
            Some(patient) if detail => views::documents::render_patient(patient),
            _ => views::documents::render_patients(&r.patients),
        }
    })
}

/// Hand a document URL to the system browser.
pub fn download(args: &DownloadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let url = if args.crf {
        ctx.portal.crf_file_url(&args.path)
    } else {
        ctx.trial_site.file_url(&args.path)
    };

    if !args.print {
        open::that(&url).with_context(|| format!("failed to open {url} in the browser"))?;
        tracing::info!(%url, "opened document");
    }

    let response = DownloadResponse {
        opened: !args.print,
        url,
    };
    output_view(&response, flags.format, |r| {
        if r.opened {
            format!("Opened {}", r.url)
        } else {
            r.url.clone()
        }
    })
}
