use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sdv_auth::Route;
use sdv_gateway::TrialSiteClient;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::access::{AccessHandshake, AccessWatcher, HandshakeOutcome};
use crate::cli::commands::{RequestAccessArgs, WatchAccessArgs};
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_view;
use crate::ui;

#[derive(Serialize)]
struct AnswerResponse {
    prompt: String,
    granted: bool,
    delivered: bool,
    message: String,
}

#[derive(Serialize)]
struct RequestResponse {
    study_id: String,
    granted: bool,
    #[serde(flatten)]
    outcome: HandshakeOutcome,
}

/// Site side: show each incoming access request and answer it.
pub async fn watch(args: &WatchAccessArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.answer.is_none() && !ui::prefs().interactive {
        anyhow::bail!("stdin is not a terminal; pass --answer yes|no to answer automatically");
    }

    let config = &ctx.config.trial_site;
    let watcher = AccessWatcher::spawn(
        Arc::new(ctx.trial_site.clone()),
        Duration::from_secs(config.poll_interval_secs),
    );
    let mut prompts = watcher.subscribe();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let text = !flags.format.is_machine();

    if text && !flags.quiet {
        println!(
            "Watching {} for access requests every {}s (Ctrl-C to stop)",
            config.base_url, config.poll_interval_secs
        );
    }

    loop {
        let prompt = tokio::select! {
            changed = prompts.wait_for(Option::is_some) => changed?.clone(),
            _ = tokio::signal::ctrl_c() => break,
        };
        let Some(prompt) = prompt else { continue };

        if text {
            println!("\nAccess Request\n{prompt}");
        }
        let granted = match args.answer {
            Some(answer) => answer.granted(),
            None => match ask(&mut stdin).await? {
                Some(granted) => granted,
                None => break,
            },
        };

        let response = match watcher.answer(granted).await {
            Ok(ack) => AnswerResponse {
                prompt,
                granted,
                delivered: ack.success,
                message: ack.message,
            },
            Err(error) => {
                tracing::warn!(%error, "failed to send access response");
                AnswerResponse {
                    prompt,
                    granted,
                    delivered: false,
                    message: error.to_string(),
                }
            }
        };
        output_view(&response, flags.format, |r| {
            let verdict = if r.granted { "granted" } else { "denied" };
            if r.delivered {
                format!("Access {verdict}.")
            } else {
                format!("Access {verdict}, but the answer was not delivered: {}", r.message)
            }
        })?;

        if args.once {
            break;
        }
    }
    Ok(())
}

/// Read Yes/No from the terminal. `None` on Ctrl-C or end of input.
async fn ask(stdin: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<Option<bool>> {
    loop {
        println!("Give access? [y]es / [n]o:");
        let line = tokio::select! {
            line = stdin.next_line() => line.context("failed to read answer")?,
            _ = tokio::signal::ctrl_c() => return Ok(None),
        };
        let Some(line) = line else { return Ok(None) };
        if let Some(granted) = parse_answer(&line) {
            return Ok(Some(granted));
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Sponsor side: ask the study's investigator for access and wait.
pub async fn request(args: &RequestAccessArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity(Route::StudyDetail(args.study_id.clone()))?;
    if !identity.is_sponsor() {
        anyhow::bail!("Only sponsors can request site access.");
    }
    let study = ctx
        .portal
        .study(&args.study_id)
        .await
        .with_context(|| format!("failed to load study {}", args.study_id))?;

    let config = &ctx.config.trial_site;
    let handshake = AccessHandshake::new(
        Arc::new(ctx.trial_site.clone()),
        Duration::from_secs(config.response_poll_interval_secs),
        config.response_max_attempts,
    );
    if !flags.format.is_machine()
        && !flags.quiet
        && let Some(waiting) = AccessHandshake::<TrialSiteClient>::waiting_message(&study)
    {
        println!("{waiting}\n");
    }

    let outcome = handshake
        .run(&study)
        .await
        .context("Failed to connect to investigator site. Please try again.")?;

    let response = RequestResponse {
        study_id: study.id,
        granted: outcome.is_granted(),
        outcome,
    };
    output_view(&response, flags.format, |r| {
        format!("{}\n{}", r.outcome.title(), r.outcome.message())
    })
}

#[cfg(test)]
mod tests {
    use super::parse_answer;
    use rstest::rstest;

    #[rstest]
    #[case("y", Some(true))]
    #[case(" YES ", Some(true))]
    #[case("n", Some(false))]
    #[case("No", Some(false))]
    #[case("maybe", None)]
    #[case("", None)]
    fn answers(#[case] line: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_answer(line), expected);
    }
}
