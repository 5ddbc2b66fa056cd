use sdv_auth::{GuardDecision, Route};
use serde::Serialize;

use crate::cli::commands::StudiesArgs;
use crate::cli::GlobalFlags;
use crate::commands;
use crate::context::AppContext;
use crate::output::output_json;
use crate::views;

#[derive(Serialize)]
struct NavigationResponse {
    requested: String,
    rendered: String,
    redirected: bool,
}

/// `sdv open <route>`: run the guard, then render whatever it lets through.
pub async fn handle(route: Route, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let requested = route.path();
    let decision = ctx.navigate(route)?;

    if flags.format.is_machine() {
        return output_json(
            &NavigationResponse {
                requested,
                rendered: decision.route().path(),
                redirected: decision.is_redirect(),
            },
            flags.format,
        );
    }

    if let GuardDecision::Redirect(to) = &decision {
        println!("{requested} redirected to {to}\n");
    }
    render(decision.route(), ctx, flags).await
}

async fn render(route: &Route, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match route {
        Route::Login => {
            println!("{}", commands::auth::login_screen());
            Ok(())
        }
        Route::Dashboard => {
            let identity = ctx.require_identity(Route::Dashboard)?;
            println!("{}\n", views::navbar::render(Some(&identity), ctx.edc()?));
            println!("{}", views::dashboard::render(&identity));
            Ok(())
        }
        Route::Studies => {
            let args = StudiesArgs {
                status: None,
                sponsor: None,
                mine: false,
            };
            commands::studies::list(&args, ctx, flags).await
        }
        Route::CreateStudy => {
            let identity = ctx.require_identity(Route::CreateStudy)?;
            println!("{}", create_study_help(identity.is_sponsor()));
            Ok(())
        }
        Route::StudyDetail(id) => commands::studies::detail(id, ctx, flags).await,
    }
}

fn create_study_help(is_sponsor: bool) -> String {
    if !is_sponsor {
        return "Access Denied\nOnly sponsors can create studies.".to_string();
    }
    [
        "Create New Study",
        "  sdv create-study --title <title>",
        "      [--protocol <text>] [--sponsor <name>] [--phase <phase>] [--indication <text>]",
        "      [--pi-name <name> --pi-email <email> --pi-institution <name> --pi-specialty <field>]",
        "The sponsor defaults to your organization; the PI is sent only with --pi-name.",
    ]
    .join("\n")
}
