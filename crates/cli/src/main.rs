// parkval CLI - headless field reconciliation for valuation report forms

mod cycle;
mod exit_codes;
mod review;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "parkval")]
#[command(about = "Form-field reconciliation for valuation reports (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one provider fetch cycle to saved form state
    #[command(after_help = "\
Exit code 0 on success; preserved user edits are not an error.

Examples:
  parkval refresh --defaults defaults.toml --state state.json --fetched fetched.json
  parkval refresh --defaults defaults.toml --state state.json --fetched fetched.json \\
      --snapshot snapshot.json
  parkval refresh --defaults defaults.toml --state state.json --fetched fetched.json \\
      --out merged.json --decisions decisions.json --json")]
    Refresh {
        /// TOML defaults config (the form's placeholder values)
        #[arg(long)]
        defaults: PathBuf,

        /// Current form state (JSON object of field → scalar)
        #[arg(long)]
        state: PathBuf,

        /// Freshly fetched provider values (JSON object of field → scalar)
        #[arg(long)]
        fetched: PathBuf,

        /// Snapshot persisted from the prior cycle (missing file = empty)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Where to write the merged state (default: overwrite --state)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Where to write the new snapshot (default: the --snapshot path)
        #[arg(long)]
        snapshot_out: Option<PathBuf>,

        /// Write the per-field decision log as JSON
        #[arg(long)]
        decisions: Option<PathBuf>,

        /// Print the full cycle result as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Flag fields that disagree with an authoritative reference (exit 3 = discrepancies)
    #[command(after_help = "\
Discrepancies are flagged for human review, never auto-applied.

Examples:
  parkval review --state state.json --reference rent-roll.json
  parkval review --state state.json --reference rent-roll.json --json
  parkval review --state state.json --reference rent-roll.json --output report.json")]
    Review {
        /// Current form state (JSON object of field → scalar)
        #[arg(long)]
        state: PathBuf,

        /// Authoritative reference values (JSON object of field → scalar)
        #[arg(long)]
        reference: PathBuf,

        /// Write the review report as JSON to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the review report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a defaults config without running
    #[command(after_help = "\
Examples:
  parkval validate defaults.toml")]
    Validate {
        /// Path to the TOML defaults config
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Refresh {
            defaults,
            state,
            fetched,
            snapshot,
            out,
            snapshot_out,
            decisions,
            json,
        } => cycle::cmd_refresh(defaults, state, fetched, snapshot, out, snapshot_out, decisions, json),
        Commands::Review { state, reference, output, json } => {
            review::cmd_review(state, reference, output, json)
        }
        Commands::Validate { config } => cycle::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
