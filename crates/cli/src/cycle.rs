//! `parkval refresh` — apply one provider fetch cycle to saved form
//! state. Also `parkval validate` for checking a defaults config without
//! running.
//!
//! The fetch itself happens elsewhere; this command consumes a JSON file
//! of already-fetched values and merges it under the engine's policy:
//! fill blanks, refresh untouched defaults and earlier auto-fills, keep
//! user edits.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parkval_reconcile::{run_cycle, DefaultsConfig, ProviderSnapshot};

use crate::exit_codes::{EXIT_REFRESH_CONFIG, EXIT_REFRESH_IO, EXIT_REFRESH_PARSE};
use crate::state::{load_value_map, write_atomic, write_value_map_atomic};
use crate::CliError;

fn refresh_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn load_defaults(path: &Path) -> Result<DefaultsConfig, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| refresh_err(EXIT_REFRESH_IO, format!("cannot read {}: {e}", path.display())))?;
    DefaultsConfig::from_toml(&content)
        .map_err(|e| refresh_err(EXIT_REFRESH_CONFIG, format!("{}: {e}", path.display())))
}

/// Execute `parkval refresh`.
pub fn cmd_refresh(
    defaults: PathBuf,
    state_path: PathBuf,
    fetched: PathBuf,
    snapshot: Option<PathBuf>,
    out: Option<PathBuf>,
    snapshot_out: Option<PathBuf>,
    decisions: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let config = load_defaults(&defaults)?;
    let state = load_value_map(&state_path, EXIT_REFRESH_IO, EXIT_REFRESH_PARSE)?;
    let fetched_map = load_value_map(&fetched, EXIT_REFRESH_IO, EXIT_REFRESH_PARSE)?;

    // The first cycle of a session has no snapshot yet; a missing file
    // behaves as an empty mapping rather than an error.
    let previous: ProviderSnapshot = match snapshot {
        Some(ref path) if path.exists() => {
            load_value_map(path, EXIT_REFRESH_IO, EXIT_REFRESH_PARSE)?
        }
        Some(ref path) => {
            eprintln!("note: no snapshot at {}, starting empty", path.display());
            BTreeMap::new()
        }
        None => BTreeMap::new(),
    };

    let result = run_cycle(&config, &state, &fetched_map, &previous);

    // Merged state: --out, defaulting to in-place.
    let out_path = out.unwrap_or_else(|| state_path.clone());
    write_value_map_atomic(&out_path, &result.state, EXIT_REFRESH_IO)?;
    eprintln!("wrote {}", out_path.display());

    // New snapshot: --snapshot-out, falling back to the --snapshot path.
    // With neither, the snapshot is not persisted and the next cycle
    // cannot tell auto-fills from user edits.
    match snapshot_out.or(snapshot) {
        Some(path) => {
            write_value_map_atomic(&path, &result.snapshot, EXIT_REFRESH_IO)?;
            eprintln!("wrote {}", path.display());
        }
        None => eprintln!("note: snapshot not persisted (pass --snapshot or --snapshot-out)"),
    }

    if let Some(path) = decisions {
        let body = serde_json::to_string_pretty(&result.decisions)
            .map_err(|e| refresh_err(EXIT_REFRESH_IO, format!("JSON serialization error: {e}")))?;
        write_atomic(&path, &body, EXIT_REFRESH_IO)?;
        eprintln!("wrote {}", path.display());
    }

    if json {
        let body = serde_json::to_string_pretty(&result)
            .map_err(|e| refresh_err(EXIT_REFRESH_IO, format!("JSON serialization error: {e}")))?;
        println!("{body}");
    }

    let s = &result.summary;
    eprintln!(
        "cycle '{}': {} fields — {} applied, {} kept user edits, {} skipped empty",
        result.meta.config_name, s.total_fields, s.applied, s.kept_user_edits, s.skipped_empty,
    );

    Ok(())
}

/// Execute `parkval validate`.
pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_defaults(&config_path)?;
    eprintln!(
        "valid: defaults '{}' with {} field(s)",
        config.name,
        config.fields.len(),
    );
    Ok(())
}
