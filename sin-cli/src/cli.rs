use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use sin_id::DisplayState;
use sin_validator::{
    DiscoveryMode, FsSourceConfig, InputMode, ValidationConfig, ValueOutcome, validate_fs,
    validate_values,
};
use tracing::{debug, info};

use crate::logging;
use crate::session::run_session;

#[derive(Parser, Debug)]
#[command(name = "sin", version, about = "Canadian Social Insurance Number validator")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `SIN_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate values given on the command line
    Check(CheckArgs),
    /// Validate SINs found in text, CSV and JSON files
    Scan(ScanArgs),
    /// Type values one per line and see the dialog for each
    Session,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Values to validate
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Accept grouped forms such as "046 454 286" and "046-454-286"
    #[arg(long)]
    pub lenient: bool,

    /// Print outcomes as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Glob patterns to exclude (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Accept grouped forms such as "046 454 286" and "046-454-286"
    #[arg(long)]
    pub lenient: bool,

    /// Find SIN-shaped tokens anywhere in free text
    #[arg(long)]
    pub heuristic: bool,

    /// Also list valid values in the report
    #[arg(long)]
    pub report_valid: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Maximum size of a single file in bytes
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    pub follow_links: bool,
}

impl CheckArgs {
    fn validation_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig::default();
        if self.lenient {
            config.input_mode = InputMode::Lenient;
        }
        config
    }
}

impl ScanArgs {
    fn validation_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig::default();
        if self.lenient {
            config.input_mode = InputMode::Lenient;
        }
        if self.heuristic {
            config.discovery_mode = DiscoveryMode::Heuristic;
        }
        config.report_valid = self.report_valid;
        config
    }

    fn fs_config(&self) -> FsSourceConfig {
        let mut config = FsSourceConfig::default();
        config.paths.clone_from(&self.paths);
        config.exclude.clone_from(&self.exclude);
        config.follow_links = self.follow_links;
        if let Some(max) = self.max_file_size {
            config.max_file_size = max;
        }
        config
    }
}

/// Parse arguments from the process, set up logging and run the command.
///
/// # Errors
///
/// Returns an error if the command fails or finds invalid values.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    if !logging::init(cli.verbose) {
        debug!(verbose = cli.verbose, "global subscriber already installed, keeping it");
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let color = io::stdout().is_terminal();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    execute(&cli.command, &mut input, &mut out, interactive, color)
}

/// Run a parsed command against the given streams.
///
/// # Errors
///
/// Returns an error on I/O failure, when `check` finds an invalid value, or
/// when `scan` produces a report that is not ok.
pub fn execute(
    command: &Commands,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    interactive: bool,
    color: bool,
) -> Result<()> {
    match command {
        Commands::Check(args) => check(args, out, color),
        Commands::Scan(args) => scan(args, out),
        Commands::Session => {
            let summary = run_session(input, out, interactive)?;
            info!(
                committed = summary.committed,
                valid = summary.valid,
                "session finished"
            );
            Ok(())
        }
    }
}

fn styled(outcome: &ValueOutcome, color: bool) -> String {
    let text = outcome.display_text;
    if !color {
        return text.to_owned();
    }
    match outcome.display_state() {
        DisplayState::Valid => text.green().to_string(),
        DisplayState::Invalid => text.red().to_string(),
    }
}

fn check(args: &CheckArgs, out: &mut dyn Write, color: bool) -> Result<()> {
    let outcomes = validate_values(&args.values, &args.validation_config());
    info!(values = outcomes.len(), "checked values");

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&outcomes)?)?;
    } else {
        for outcome in &outcomes {
            match &outcome.error {
                Some(reason) => writeln!(
                    out,
                    "{}:{} ({reason})",
                    outcome.value,
                    styled(outcome, color)
                )?,
                None => writeln!(out, "{}:{}", outcome.value, styled(outcome, color))?,
            }
        }
    }

    let invalid = outcomes
        .iter()
        .filter(|o| !o.validity.is_valid())
        .count();
    if invalid > 0 {
        bail!("{invalid} invalid SIN number(s)");
    }
    Ok(())
}

fn scan(args: &ScanArgs, out: &mut dyn Write) -> Result<()> {
    let report = validate_fs(&args.fs_config(), &args.validation_config())?;

    match args.format {
        OutputFormat::Human => sin_validator::output::write_human(&report, out)?,
        OutputFormat::Json => sin_validator::output::write_json(&report, out)?,
    }

    if !report.ok {
        bail!(
            "{} invalid SIN number(s), {} file(s) not scanned",
            report.errors_count(),
            report.failed_files
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["sin", "-vv", "check", "--lenient", "046454286", "1"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert!(args.lenient);
        assert!(!args.json);
        assert_eq!(args.values, vec!["046454286", "1"]);
        assert_eq!(args.validation_config().input_mode, InputMode::Lenient);
    }

    #[test]
    fn test_parse_check_requires_values() {
        assert!(Cli::try_parse_from(["sin", "check"]).is_err());
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from([
            "sin",
            "scan",
            "exports",
            "--exclude",
            "archive/*",
            "--heuristic",
            "--format",
            "json",
            "--max-file-size",
            "2048",
        ])
        .unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.validation_config().discovery_mode, DiscoveryMode::Heuristic);
        let fs_config = args.fs_config();
        assert_eq!(fs_config.paths, vec![PathBuf::from("exports")]);
        assert_eq!(fs_config.exclude, vec!["archive/*"]);
        assert_eq!(fs_config.max_file_size, 2048);
        assert!(!fs_config.follow_links);
    }

    #[test]
    fn test_parse_session() {
        let cli = Cli::try_parse_from(["sin", "session"]).unwrap();
        assert!(matches!(cli.command, Commands::Session));
    }

    #[test]
    fn test_parse_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["sin", "scan", ".", "--format", "xml"]).is_err());
    }
}
