use std::collections::BTreeMap;

use crate::value::FieldValue;

/// Last-known set of provider-sourced values, keyed by field. The caller
/// persists it between fetch cycles and passes it back in; the engine's
/// only memory of "what did we last auto-fill".
///
/// Invariant: never contains an empty value for any key.
pub type ProviderSnapshot = BTreeMap<String, FieldValue>;

/// Drop empty entries from a freshly fetched batch before it becomes the
/// new snapshot. Produces a new mapping; the input is untouched. Empty
/// entries are dropped outright, not stored as explicit empty markers.
pub fn sanitize(raw: &BTreeMap<String, FieldValue>) -> ProviderSnapshot {
    raw.iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_empty_entries() {
        let raw = BTreeMap::from([
            ("a".to_string(), FieldValue::Text("".into())),
            ("b".to_string(), FieldValue::Absent),
            ("c".to_string(), FieldValue::Text("5".into())),
            ("d".to_string(), FieldValue::Text("  ".into())),
        ]);
        let snapshot = sanitize(&raw);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("c"), Some(&FieldValue::Text("5".into())));
    }

    #[test]
    fn idempotent() {
        let raw = BTreeMap::from([
            ("a".to_string(), FieldValue::Absent),
            ("b".to_string(), FieldValue::Number(0.0)),
        ]);
        let once = sanitize(&raw);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn input_not_mutated() {
        let raw = BTreeMap::from([("a".to_string(), FieldValue::Absent)]);
        let _ = sanitize(&raw);
        assert_eq!(raw.len(), 1);
    }
}
