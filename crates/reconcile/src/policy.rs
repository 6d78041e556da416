use crate::model::FieldAction;
use crate::normalize::normalized_eq;
use crate::value::FieldValue;

/// Classify a field against the merge policy. Rules are evaluated in
/// order; the first match wins:
///
/// 1. fetched value empty → [`FieldAction::SkippedEmpty`]
/// 2. current value empty → [`FieldAction::FilledBlank`]
/// 3. current equals the non-empty configured default → [`FieldAction::RefreshedDefault`]
/// 4. current equals the non-empty previously auto-filled value → [`FieldAction::RefreshedAutoFill`]
/// 5. otherwise → [`FieldAction::KeptUserEdit`]
///
/// `default` and `previous` are per-field lookups; a missing table entry
/// behaves as empty. Equality is normalized (case, whitespace, hyphens).
pub fn decide(
    next: &FieldValue,
    current: &FieldValue,
    default: Option<&FieldValue>,
    previous: Option<&FieldValue>,
) -> FieldAction {
    if next.is_empty() {
        return FieldAction::SkippedEmpty;
    }
    if current.is_empty() {
        return FieldAction::FilledBlank;
    }
    if let Some(default) = default {
        if !default.is_empty() && normalized_eq(current, default) {
            return FieldAction::RefreshedDefault;
        }
    }
    if let Some(previous) = previous {
        if !previous.is_empty() && normalized_eq(current, previous) {
            return FieldAction::RefreshedAutoFill;
        }
    }
    FieldAction::KeptUserEdit
}

/// Whether a freshly fetched value may replace the field's current value.
pub fn should_apply(
    next: &FieldValue,
    current: &FieldValue,
    default: Option<&FieldValue>,
    previous: Option<&FieldValue>,
) -> bool {
    decide(next, current, default, previous).applies()
}
