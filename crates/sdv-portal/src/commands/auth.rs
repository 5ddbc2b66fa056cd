use sdv_auth::{EdcSystem, GuardDecision, LoginFlow, Provider, Route, catalog};
use sdv_core::Identity;
use serde::Serialize;

use crate::cli::commands::LoginArgs;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_view;
use crate::views;

#[derive(Serialize)]
struct AccountList {
    provider: &'static str,
    accounts: Vec<Identity>,
}

#[derive(Serialize)]
struct LoginResponse {
    user: Identity,
    auth_method: &'static str,
    edc: &'static str,
    landing: String,
}

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
}

#[derive(Serialize)]
struct WhoamiResponse {
    signed_in: bool,
    user: Option<Identity>,
    auth_method: Option<String>,
    edc: &'static str,
}

/// Walk the provider modal: list accounts, or sign in as one of them.
pub async fn login(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let GuardDecision::Redirect(to) = ctx.navigate(Route::Login)? {
        let who = ctx
            .current_identity()?
            .map_or_else(String::new, |user| format!(" as {}", user.full_name()));
        anyhow::bail!("already signed in{who} (see {to}). Run `sdv logout` to switch accounts");
    }

    let provider = args.provider;
    let mut flow = LoginFlow::new(provider, ctx.session.clone(), ctx.config.sso.round_trip());
    flow.open();

    let Some(index) = args.account else {
        let list = AccountList {
            provider: provider.key(),
            accounts: flow.accounts().to_vec(),
        };
        return output_view(&list, flags.format, |list| {
            views::login::render_accounts(provider, flow.branding(), &list.accounts)
        });
    };

    let account = flow.select_account(index)?.clone();
    let round_trip = flow.confirm()?;
    if !flags.format.is_machine() && !flags.quiet {
        println!(
            "{}",
            views::login::render_consent(provider, flow.branding(), &account)
        );
    }
    tracing::debug!(remaining = ?round_trip.remaining(), "waiting for provider");

    let closer = flow.closer();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            closer.close();
        }
    });
    let result = flow.complete().await;
    interrupt.abort();
    let outcome = result?;

    let response = LoginResponse {
        edc: EdcSystem::for_provider(provider).name,
        user: outcome.identity,
        auth_method: outcome.auth_method,
        landing: outcome.landing.path(),
    };
    output_view(&response, flags.format, |r| {
        format!(
            "Signed in as {} ({}) via {}.\nNext: sdv open {}",
            r.user.full_name(),
            r.user.display_name(),
            r.auth_method,
            r.landing
        )
    })
}

pub fn logout(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    sdv_auth::logout(&ctx.session)?;
    output_view(&LogoutResponse { cleared: true }, flags.format, |_| {
        "Signed out.".to_string()
    })
}

pub fn whoami(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = ctx.current_identity()?;
    let edc = ctx.edc()?;
    let response = WhoamiResponse {
        signed_in: user.is_some(),
        auth_method: ctx.session.auth_method()?,
        user,
        edc: edc.name,
    };
    output_view(&response, flags.format, |r| {
        views::navbar::render(r.user.as_ref(), edc)
    })
}

/// Login screen: the three provider buttons.
pub fn login_screen() -> String {
    let mut lines = vec![
        "SDV Platform".to_string(),
        "Sign in to continue".to_string(),
        String::new(),
    ];
    lines.extend(Provider::ALL.into_iter().map(|provider| {
        format!(
            "  Continue with {:<12} sdv login --provider {}  ({} accounts)",
            provider.display_name(),
            provider.key(),
            catalog::accounts(provider).len()
        )
    }));
    lines.join("\n")
}
