use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    /// ANSI status colors in tables.
    pub table_color: bool,
    /// Interactive prompts may read stdin.
    pub interactive: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let is_tty = std::io::stdout().is_terminal();
    let table_color = match flags.color {
        ColorMode::Always => !flags.format.is_machine(),
        ColorMode::Never => false,
        ColorMode::Auto => {
            is_tty
                && !flags.format.is_machine()
                && !flags.quiet
                && std::env::var_os("NO_COLOR").is_none()
        }
    };

    let interactive = std::io::stdin().is_terminal();

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs {
        table_color,
        interactive,
        term_width,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        interactive: false,
        term_width: None,
    })
}
