#![forbid(unsafe_code)]

//! Scriptable harness around the Lumen command palette.
//!
//! Loads a command catalog, replays an intent script against a
//! [`PaletteController`](lumen_widgets::PaletteController) and returns a
//! plain-text transcript with the navigation log.

pub mod cli;
pub mod config;
pub mod navigation;
pub mod render;
pub mod script;
pub mod session;

use std::fs;

use anyhow::{Context, Result};
use lumen_widgets::PaletteController;

pub use cli::Cli;
pub use config::{CatalogFile, ConfigError, Settings};
pub use navigation::NavigationLog;
pub use script::{ScriptError, parse_script};
pub use session::Session;

/// Run the harness and return its output.
pub fn run(cli: &Cli) -> Result<String> {
    let file = cli
        .catalog
        .as_deref()
        .map(CatalogFile::load)
        .transpose()?;
    let settings = Settings::resolve(cli, file);

    let script = match &cli.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            parse_script(&text)
                .with_context(|| format!("invalid script {}", path.display()))?
        }
        None => Vec::new(),
    };

    let log = NavigationLog::new();
    let palette = PaletteController::with_config(settings.commands(&log), settings.palette)
        .context("invalid palette settings")?;
    tracing::info!(
        commands = palette.command_count(),
        max_results = settings.palette.max_results,
        model = settings.palette.score_model.as_str(),
        steps = script.len(),
        "palette ready"
    );

    let mut session = Session::new(palette, log);
    if cli.query.is_some() || script.is_empty() {
        session.open_with(cli.query.as_deref());
        session.snapshot();
    }
    for line in &script {
        session.apply(line);
    }
    Ok(session.finish())
}
