use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::FieldState;
use crate::normalize::normalized_eq;
use crate::value::FieldValue;

/// A field whose current value disagrees with an authoritative reference
/// value (e.g. one parsed from a rent roll or tax document). Flagged for
/// human review; never auto-corrected.
#[derive(Debug, Clone, Serialize)]
pub struct Discrepancy {
    pub field: String,
    pub current: FieldValue,
    pub reference: FieldValue,
}

/// True iff `reference` is non-empty and its normalized form differs from
/// `current`'s. Independent of the apply policy: flags fire on any
/// mismatch, auto-apply only under the policy rules.
pub fn has_discrepancy(current: &FieldValue, reference: &FieldValue) -> bool {
    !reference.is_empty() && !normalized_eq(current, reference)
}

/// Flag every field where the reference disagrees with the current state.
/// Fields missing from the state compare as empty. Results come back in
/// field-key order.
pub fn flag_discrepancies(
    state: &FieldState,
    reference: &BTreeMap<String, FieldValue>,
) -> Vec<Discrepancy> {
    let mut flagged = Vec::new();
    for (field, ref_value) in reference {
        let current = state.get(field).cloned().unwrap_or(FieldValue::Absent);
        if has_discrepancy(&current, ref_value) {
            flagged.push(Discrepancy {
                field: field.clone(),
                current,
                reference: ref_value.clone(),
            });
        }
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.into())
    }

    #[test]
    fn empty_reference_never_flags() {
        assert!(!has_discrepancy(&text("anything"), &FieldValue::Absent));
        assert!(!has_discrepancy(&text("anything"), &text("  ")));
        assert!(!has_discrepancy(&FieldValue::Absent, &text("")));
    }

    #[test]
    fn normalized_match_does_not_flag() {
        assert!(!has_discrepancy(&text("Oak-Ridge"), &text(" oak ridge ")));
        assert!(!has_discrepancy(&FieldValue::Number(5000.0), &text("5000")));
    }

    #[test]
    fn mismatch_flags() {
        assert!(has_discrepancy(&text("4800"), &text("5000")));
        assert!(has_discrepancy(&FieldValue::Absent, &text("5000")));
    }

    #[test]
    fn batch_flags_in_key_order() {
        let state = FieldState::from([
            ("acreage".to_string(), text("10")),
            ("lot_count".to_string(), text("84")),
        ]);
        let reference = BTreeMap::from([
            ("lot_count".to_string(), text("90")),
            ("acreage".to_string(), text("10")),
            ("taxes_annual".to_string(), text("18200")),
        ]);
        let flagged = flag_discrepancies(&state, &reference);
        assert_eq!(flagged.len(), 2);
        assert_eq!(flagged[0].field, "lot_count");
        assert_eq!(flagged[0].current, text("84"));
        assert_eq!(flagged[1].field, "taxes_annual");
        assert_eq!(flagged[1].current, FieldValue::Absent);
    }
}
