//! `parkval review` — flag fields whose current value disagrees with an
//! authoritative reference (e.g. values parsed from a rent roll or tax
//! document). Flags only; nothing is applied.

use std::path::PathBuf;

use parkval_reconcile::discrepancy::{flag_discrepancies, Discrepancy};
use parkval_reconcile::FieldValue;
use serde::Serialize;

use crate::exit_codes::{EXIT_REVIEW_DISCREPANCY, EXIT_REVIEW_PARSE};
use crate::state::{load_value_map, write_atomic};
use crate::CliError;

fn review_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

#[derive(Debug, Serialize)]
struct ReviewReport {
    total_checked: usize,
    discrepancies: Vec<Discrepancy>,
}

fn shown(value: &FieldValue) -> String {
    if value.is_empty() {
        "(empty)".to_string()
    } else {
        value.as_comparable()
    }
}

/// Execute `parkval review`. Exit 0 = state agrees with the reference,
/// exit 3 = discrepancies found (like `diff(1)`, non-zero means "differ").
pub fn cmd_review(
    state_path: PathBuf,
    reference: PathBuf,
    output: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let state = load_value_map(&state_path, EXIT_REVIEW_PARSE, EXIT_REVIEW_PARSE)?;
    let reference_map = load_value_map(&reference, EXIT_REVIEW_PARSE, EXIT_REVIEW_PARSE)?;

    let report = ReviewReport {
        total_checked: reference_map.len(),
        discrepancies: flag_discrepancies(&state, &reference_map),
    };

    if output.is_some() || json {
        let body = serde_json::to_string_pretty(&report)
            .map_err(|e| review_err(EXIT_REVIEW_PARSE, format!("JSON serialization error: {e}")))?;
        if let Some(ref path) = output {
            write_atomic(path, &body, EXIT_REVIEW_PARSE)?;
            eprintln!("wrote {}", path.display());
        }
        if json {
            println!("{body}");
        }
    }

    for d in &report.discrepancies {
        eprintln!("  {}: {:?} vs reference {:?}", d.field, shown(&d.current), shown(&d.reference));
    }
    eprintln!(
        "review: {} field(s) checked, {} discrepancy(ies)",
        report.total_checked,
        report.discrepancies.len(),
    );

    if report.discrepancies.is_empty() {
        Ok(())
    } else {
        Err(review_err(
            EXIT_REVIEW_DISCREPANCY,
            format!("{} discrepancy(ies) found", report.discrepancies.len()),
        ))
    }
}
