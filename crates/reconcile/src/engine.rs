use std::collections::BTreeMap;

use crate::config::DefaultsConfig;
use crate::model::{CycleMeta, CycleResult, CycleSummary, FieldDecision, FieldState};
use crate::policy::decide;
use crate::snapshot::{self, ProviderSnapshot};
use crate::value::FieldValue;

/// Apply one provider fetch cycle to the form state.
///
/// Every field in `fetched` is evaluated against the merge policy using
/// the input `state`, the defaults table, and the snapshot persisted from
/// the prior cycle. Accepted values land in the returned state; the input
/// state is not mutated. Fields the batch does not mention pass through
/// untouched and produce no decision record.
///
/// Decisions are per-field: no field's outcome depends on another field's
/// value or on iteration order.
pub fn run_cycle(
    config: &DefaultsConfig,
    state: &FieldState,
    fetched: &BTreeMap<String, FieldValue>,
    previous: &ProviderSnapshot,
) -> CycleResult {
    let defaults = config.table();

    let mut next_state = state.clone();
    let mut decisions = Vec::with_capacity(fetched.len());

    for (field, next) in fetched {
        let current = state.get(field).cloned().unwrap_or(FieldValue::Absent);
        let action = decide(next, &current, defaults.get(field), previous.get(field));
        if action.applies() {
            next_state.insert(field.clone(), next.clone());
        }
        decisions.push(FieldDecision {
            field: field.clone(),
            action,
            value: next.clone(),
        });
    }

    let summary = compute_summary(&decisions);

    CycleResult {
        meta: CycleMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        decisions,
        state: next_state,
        snapshot: snapshot::sanitize(fetched),
    }
}

/// Count decisions per action.
fn compute_summary(decisions: &[FieldDecision]) -> CycleSummary {
    let mut action_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut applied = 0;
    let mut kept_user_edits = 0;
    let mut skipped_empty = 0;

    for d in decisions {
        *action_counts.entry(d.action.to_string()).or_insert(0) += 1;

        if d.action.applies() {
            applied += 1;
        } else if d.action == crate::model::FieldAction::KeptUserEdit {
            kept_user_edits += 1;
        } else {
            skipped_empty += 1;
        }
    }

    CycleSummary {
        total_fields: decisions.len(),
        applied,
        kept_user_edits,
        skipped_empty,
        action_counts,
    }
}
