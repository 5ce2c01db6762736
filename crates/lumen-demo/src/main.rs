#![forbid(unsafe_code)]

//! Lumen command palette harness.
//!
//! ```sh
//! lumen-demo --query comp
//! lumen-demo --catalog site.toml --script smoke.txt --verbose
//! RUST_LOG=lumen_widgets=trace lumen-demo --script smoke.txt
//! ```

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lumen_demo::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let output = lumen_demo::run(&cli)?;
    print!("{output}");
    Ok(())
}

/// Log to stderr so stdout carries only the transcript.
fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
