use std::collections::BTreeMap;

use serde::Serialize;

use crate::snapshot::ProviderSnapshot;
use crate::value::FieldValue;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// The values a form presently holds, keyed by field.
pub type FieldState = BTreeMap<String, FieldValue>;

// ---------------------------------------------------------------------------
// Per-field decisions
// ---------------------------------------------------------------------------

/// Outcome of the merge policy for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldAction {
    /// The field was empty; the fetched value fills it.
    FilledBlank,
    /// The field still held its configured default; refreshed.
    RefreshedDefault,
    /// The field still held the last auto-filled value; refreshed.
    RefreshedAutoFill,
    /// The user edited the field away from default and auto-fill; kept.
    KeptUserEdit,
    /// The fetched value was empty; nothing to apply.
    SkippedEmpty,
}

impl FieldAction {
    /// Whether the fetched value replaces the current one.
    pub fn applies(&self) -> bool {
        matches!(
            self,
            Self::FilledBlank | Self::RefreshedDefault | Self::RefreshedAutoFill
        )
    }
}

impl std::fmt::Display for FieldAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FilledBlank => write!(f, "filled_blank"),
            Self::RefreshedDefault => write!(f, "refreshed_default"),
            Self::RefreshedAutoFill => write!(f, "refreshed_auto_fill"),
            Self::KeptUserEdit => write!(f, "kept_user_edit"),
            Self::SkippedEmpty => write!(f, "skipped_empty"),
        }
    }
}

/// One field's evaluation within a fetch cycle.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDecision {
    pub field: String,
    pub action: FieldAction,
    /// The fetched value that was evaluated (applied or not).
    pub value: FieldValue,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CycleSummary {
    pub total_fields: usize,
    pub applied: usize,
    pub kept_user_edits: usize,
    pub skipped_empty: usize,
    pub action_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Everything one fetch cycle produces: the merged state, the snapshot to
/// persist for the next cycle, and the per-field decision log.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    pub meta: CycleMeta,
    pub summary: CycleSummary,
    pub decisions: Vec<FieldDecision>,
    pub state: FieldState,
    pub snapshot: ProviderSnapshot,
}
