//! Portal lookups that sit outside the signed-in pages: users, CRF
//! templates, statistics and health.

use sdv_gateway::{DatabaseStats, GatewayError, HealthStatus, UserFilter};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::commands::UsersArgs;
use crate::context::AppContext;
use crate::output::{Column, Tabular, output_rows, output_view};

#[derive(Serialize)]
struct UserRow {
    name: String,
    email: String,
    company: String,
    role: String,
}

impl Tabular for UserRow {
    const COLUMNS: &'static [Column] = &[
        Column::text("name"),
        Column::wide("email"),
        Column::text("company"),
        Column::text("role"),
    ];
    const EMPTY: &'static str = "No users found.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.company.clone(),
            self.role.clone(),
        ]
    }
}

#[derive(Serialize)]
struct CrfRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    file_type: String,
    url: String,
}

impl Tabular for CrfRow {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::text("name"),
        Column::text("type"),
        Column::wide("url"),
    ];
    const EMPTY: &'static str = "No CRF files available.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.file_type.clone(),
            self.url.clone(),
        ]
    }
}

#[derive(Serialize)]
struct ServiceHealth {
    service: &'static str,
    url: String,
    healthy: bool,
    status: String,
}

impl Tabular for ServiceHealth {
    const COLUMNS: &'static [Column] = &[
        Column::text("service"),
        Column::wide("url"),
        Column::status("healthy"),
        Column::wide("status"),
    ];
    const EMPTY: &'static str = "No services configured.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.service.to_string(),
            self.url.clone(),
            if self.healthy { "yes" } else { "no" }.to_string(),
            self.status.clone(),
        ]
    }
}

pub async fn users(args: &UsersArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = UserFilter {
        company: args.company.clone(),
        role: args.role,
    };
    let rows: Vec<UserRow> = match ctx.portal.users(&filter).await {
        Ok(page) => page
            .users
            .iter()
            .map(|user| UserRow {
                name: user.full_name(),
                email: user.email().to_string(),
                company: user.organization().to_string(),
                role: user.role().to_string(),
            })
            .collect(),
        Err(error) => {
            tracing::warn!(%error, "failed to load users");
            Vec::new()
        }
    };
    output_rows(&rows, flags.format)
}

pub async fn crf_files(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<CrfRow> = match ctx.portal.crf_files().await {
        Ok(files) => files
            .into_iter()
            .map(|file| CrfRow {
                url: ctx.portal.crf_file_url(&file.name),
                id: file.id,
                name: file.name,
                file_type: file.file_type,
            })
            .collect(),
        Err(error) => {
            tracing::warn!(%error, "failed to load CRF files");
            Vec::new()
        }
    };
    output_rows(&rows, flags.format)
}

pub async fn stats(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = match ctx.portal.database_stats().await {
        Ok(stats) => stats,
        Err(error) => {
            tracing::warn!(%error, "failed to load database statistics");
            DatabaseStats::default()
        }
    };
    output_view(&stats, flags.format, render_stats)
}

fn render_stats(stats: &DatabaseStats) -> String {
    let mut lines = vec![
        format!("Users: {}", stats.total_users),
        format!("Studies: {}", stats.total_studies),
        format!(
            "Studies without investigator: {}",
            stats.studies_without_investigator
        ),
    ];
    if !stats.users_by_company.is_empty() {
        lines.push("Users by company:".to_string());
        lines.extend(
            stats
                .users_by_company
                .iter()
                .map(|(company, count)| format!("  {company:<24}{count:>4}")),
        );
    }
    if !stats.studies_by_status.is_empty() {
        lines.push("Studies by status:".to_string());
        lines.extend(
            stats
                .studies_by_status
                .iter()
                .map(|(status, count)| format!("  {status:<24}{count:>4}")),
        );
    }
    lines.join("\n")
}

/// Ping both APIs; an unreachable service is reported, not raised.
pub async fn health(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (portal, trial_site) = tokio::join!(ctx.portal.health(), ctx.trial_site.health());
    let rows = vec![
        service_health("portal", ctx.portal.base_url(), portal),
        service_health("trial-site", &ctx.config.trial_site.base_url, trial_site),
    ];
    output_rows(&rows, flags.format)
}

fn service_health(
    service: &'static str,
    url: &str,
    result: Result<HealthStatus, GatewayError>,
) -> ServiceHealth {
    let (healthy, status) = match result {
        Ok(health) => (health.is_healthy(), health.status),
        Err(error) => {
            tracing::warn!(%error, service, "health check failed");
            (false, error.to_string())
        }
    };
    ServiceHealth {
        service,
        url: url.to_string(),
        healthy,
        status,
    }
}
