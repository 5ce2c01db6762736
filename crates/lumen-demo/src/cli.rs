#![forbid(unsafe_code)]

//! Command-line arguments for the palette harness.
//!
//! Every option can also come from a `LUMEN_DEMO_*` environment variable.
//! Precedence is flag, then environment, then catalog file, then default.

use std::path::PathBuf;

use clap::Parser;

const AFTER_HELP: &str = "\
SCRIPT COMMANDS:
    open | close | toggle     Palette visibility
    query <text>              Replace the query
    type <text>               Type characters one key at a time
    key <spec>                Send one key, e.g. `key ctrl+n`, `key esc`
    next | prev               Move the selection
    select <n>                Select result n (0-based)
    confirm                   Run the selected command
    # ...                     Comment

ENVIRONMENT VARIABLES:
    LUMEN_DEMO_CATALOG        Override --catalog
    LUMEN_DEMO_MAX_RESULTS    Override --max-results
    LUMEN_DEMO_MIN_SCORE      Override --min-score
    LUMEN_DEMO_GRADED         Override --graded (true|false)
    LUMEN_DEMO_QUERY          Override --query
    RUST_LOG                  Log filter (default: warn, debug with --verbose)";

/// Drive a command palette from the terminal.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "lumen-demo", version, about, after_help = AFTER_HELP)]
pub struct Cli {
    /// TOML catalog of commands and palette settings
    #[arg(long, value_name = "PATH", env = "LUMEN_DEMO_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Maximum number of listed results
    #[arg(long, value_name = "N", env = "LUMEN_DEMO_MAX_RESULTS")]
    pub max_results: Option<usize>,

    /// Commands must score above this to be listed
    #[arg(long, value_name = "SCORE", env = "LUMEN_DEMO_MIN_SCORE")]
    pub min_score: Option<f64>,

    /// Rank loose subsequence matches below tight ones
    #[arg(long, env = "LUMEN_DEMO_GRADED")]
    pub graded: bool,

    /// Open the palette with this query before the script runs
    #[arg(long, value_name = "TEXT", env = "LUMEN_DEMO_QUERY")]
    pub query: Option<String>,

    /// Intent script to replay, one intent per line
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Log palette telemetry to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "lumen-demo",
            "--catalog",
            "site.toml",
            "--max-results",
            "4",
            "--min-score",
            "0.5",
            "--graded",
            "--query",
            "tab",
            "--script",
            "run.txt",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("site.toml")));
        assert_eq!(cli.max_results, Some(4));
        assert_eq!(cli.min_score, Some(0.5));
        assert!(cli.graded);
        assert_eq!(cli.query.as_deref(), Some("tab"));
        assert_eq!(cli.script, Some(PathBuf::from("run.txt")));
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_non_numeric_max_results() {
        assert!(Cli::try_parse_from(["lumen-demo", "--max-results", "lots"]).is_err());
    }

    #[test]
    fn help_lists_env_vars() {
        assert!(AFTER_HELP.contains("LUMEN_DEMO_CATALOG"));
        assert!(AFTER_HELP.contains("LUMEN_DEMO_MAX_RESULTS"));
        assert!(AFTER_HELP.contains("key <spec>"));
    }
}
