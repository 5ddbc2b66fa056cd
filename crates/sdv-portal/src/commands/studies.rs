use anyhow::Context;
use sdv_auth::Route;
use sdv_core::entities::Study;
use sdv_gateway::StudyFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::commands::{AddInvestigatorArgs, CreateStudyArgs, StudiesArgs};
use crate::context::AppContext;
use crate::output::output_view;
use crate::views;

#[derive(Serialize)]
struct StudiesResponse {
    studies: Vec<Study>,
    total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct StudyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    study: Option<Study>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct WriteResponse {
    message: &'static str,
    study: Study,
}

/// The studies page. A failed fetch renders an empty page with the error.
pub async fn list(args: &StudiesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity(Route::Studies)?;
    let edc = ctx.edc()?;
    let filter = StudyFilter {
        status: args.status,
        sponsor: args.sponsor.clone(),
    };

    let (studies, error) = match ctx.portal.studies(&filter).await {
        Ok(page) => (page.studies, None),
        Err(error) => {
            tracing::warn!(%error, "failed to load studies");
            (Vec::new(), Some("Failed to load studies. Please try again.".to_string()))
        }
    };
    let shown: Vec<Study> = views::studies::visible(&studies, &identity, args.mine)
        .into_iter()
        .cloned()
        .collect();

    let response = StudiesResponse {
        total_count: shown.len(),
        studies: shown,
        error,
    };
    output_view(&response, flags.format, |r| {
        let refs: Vec<&Study> = r.studies.iter().collect();
        let mut text = views::studies::render(&refs, &identity, edc);
        if let Some(error) = &r.error {
            text.push_str(&format!("\n\n{error}"));
        }
        text
    })
}

/// One study, behind the same guard as the list.
pub async fn detail(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity(Route::StudyDetail(id.to_string()))?;

    let response = match ctx.portal.study(id).await {
        Ok(study) => StudyResponse {
            study: Some(study),
            error: None,
        },
        Err(error) => {
            tracing::warn!(%error, id, "failed to load study");
            let message = if error.is_not_found() {
                format!("Study {id} not found.")
            } else {
                format!("Failed to load study {id}. Please try again.")
            };
            StudyResponse {
                study: None,
                error: Some(message),
            }
        }
    };

    output_view(&response, flags.format, |r| match (&r.study, &r.error) {
        (Some(study), _) => views::study_detail::render(study, &identity),
        (None, error) => error.clone().unwrap_or_default(),
    })
}

pub async fn create(args: &CreateStudyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity(Route::CreateStudy)?;
    let request = views::forms::new_study(args, &identity)?;

    let study = ctx
        .portal
        .create_study(&request)
        .await
        .context("Failed to create study. Please try again.")?;

    let response = WriteResponse {
        message: "Study created successfully!",
        study,
    };
    output_view(&response, flags.format, |r| {
        format!(
            "{}\n\n{}",
            r.message,
            views::study_detail::render(&r.study, &identity)
        )
    })
}

pub async fn add_investigator(
    args: &AddInvestigatorArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = ctx.require_identity(Route::StudyDetail(args.study_id.clone()))?;
    if !identity.is_sponsor() {
        anyhow::bail!("Only sponsors can add investigators.");
    }
    let investigator = views::forms::investigator(args)?;

    let study = ctx
        .portal
        .add_investigator(&args.study_id, &investigator)
        .await
        .context("Failed to add investigator. Please try again.")?;

    let response = WriteResponse {
        message: "Investigator added successfully!",
        study,
    };
    output_view(&response, flags.format, |r| {
        format!(
            "{}\nPrincipal Investigator: {}",
            r.message,
            views::studies::investigator_line(&r.study)
        )
    })
}
