//! End-to-end cycles against a realistic defaults config: two fetch
//! cycles with a user edit in between, plus discrepancy review.

use std::collections::BTreeMap;

use parkval_reconcile::discrepancy::flag_discrepancies;
use parkval_reconcile::{
    run_cycle, DefaultsConfig, FieldAction, FieldState, FieldValue, ProviderSnapshot,
};

const DEFAULTS: &str = r#"
name = "Sunset Palms Valuation"

[form]
title = "Mobile Home Park Valuation Report"
template = "valuation-v3"

[fields]
park_name        = ""
acreage          = "10"
lot_count        = 0
lot_rent         = 0
population_1mile = "0"
median_income    = "0"
"#;

fn text(s: &str) -> FieldValue {
    FieldValue::Text(s.into())
}

#[test]
fn two_cycles_with_user_edit_between() {
    let config = DefaultsConfig::from_toml(DEFAULTS).unwrap();

    // Session start: the form holds its defaults.
    let state = config.table();

    // Cycle 1: provider data arrives for a fresh form.
    let fetched_1 = BTreeMap::from([
        ("park_name".to_string(), text("Sunset Palms MHP")),
        ("acreage".to_string(), text("12.5")),
        ("lot_count".to_string(), FieldValue::Number(84.0)),
        ("population_1mile".to_string(), text("5000")),
        ("median_income".to_string(), FieldValue::Absent),
    ]);
    let cycle_1 = run_cycle(&config, &state, &fetched_1, &ProviderSnapshot::new());

    // Everything lands: blanks fill, defaults refresh.
    assert_eq!(cycle_1.state.get("park_name"), Some(&text("Sunset Palms MHP")));
    assert_eq!(cycle_1.state.get("acreage"), Some(&text("12.5")));
    assert_eq!(cycle_1.state.get("lot_count"), Some(&FieldValue::Number(84.0)));
    assert_eq!(cycle_1.state.get("population_1mile"), Some(&text("5000")));
    // empty fetch leaves the default alone
    assert_eq!(cycle_1.state.get("median_income"), Some(&text("0")));

    // Snapshot records what was fetched, minus the empty entry.
    assert_eq!(cycle_1.snapshot.len(), 4);
    assert!(!cycle_1.snapshot.contains_key("median_income"));

    // The appraiser corrects the lot count by hand.
    let mut state = cycle_1.state.clone();
    state.insert("lot_count".to_string(), text("86"));

    // Cycle 2: refreshed provider data.
    let fetched_2 = BTreeMap::from([
        ("acreage".to_string(), text("12.7")),
        ("lot_count".to_string(), FieldValue::Number(85.0)),
        ("population_1mile".to_string(), text("5200")),
    ]);
    let cycle_2 = run_cycle(&config, &state, &fetched_2, &cycle_1.snapshot);

    // Unedited auto-fills refresh; the hand correction sticks.
    assert_eq!(cycle_2.state.get("acreage"), Some(&text("12.7")));
    assert_eq!(cycle_2.state.get("lot_count"), Some(&text("86")));
    assert_eq!(cycle_2.state.get("population_1mile"), Some(&text("5200")));

    let by_field: BTreeMap<_, _> = cycle_2
        .decisions
        .iter()
        .map(|d| (d.field.as_str(), d.action))
        .collect();
    assert_eq!(by_field["acreage"], FieldAction::RefreshedAutoFill);
    assert_eq!(by_field["lot_count"], FieldAction::KeptUserEdit);
    assert_eq!(by_field["population_1mile"], FieldAction::RefreshedAutoFill);

    assert_eq!(cycle_2.summary.applied, 2);
    assert_eq!(cycle_2.summary.kept_user_edits, 1);
}

#[test]
fn cycle_is_insertion_order_insensitive() {
    let config = DefaultsConfig::from_toml(DEFAULTS).unwrap();
    let state = config.table();

    let pairs = [
        ("acreage", text("12.5")),
        ("lot_count", text("84")),
        ("population_1mile", text("5000")),
    ];

    let forward: BTreeMap<String, FieldValue> =
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    let reverse: BTreeMap<String, FieldValue> =
        pairs.iter().rev().map(|(k, v)| (k.to_string(), v.clone())).collect();

    let a = run_cycle(&config, &state, &forward, &ProviderSnapshot::new());
    let b = run_cycle(&config, &state, &reverse, &ProviderSnapshot::new());

    assert_eq!(a.state, b.state);
    assert_eq!(a.snapshot, b.snapshot);
    assert_eq!(
        a.decisions.iter().map(|d| (&d.field, d.action)).collect::<Vec<_>>(),
        b.decisions.iter().map(|d| (&d.field, d.action)).collect::<Vec<_>>(),
    );
}

#[test]
fn review_flags_what_apply_would_preserve() {
    let config = DefaultsConfig::from_toml(DEFAULTS).unwrap();
    let mut state = config.table();
    state.insert("lot_rent".to_string(), text("425")); // user-edited

    // A parsed rent roll disagrees with the user's entry.
    let reference = BTreeMap::from([
        ("lot_rent".to_string(), text("440")),
        ("acreage".to_string(), text("10")), // matches the default in state
    ]);

    let flagged = flag_discrepancies(&state, &reference);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].field, "lot_rent");

    // The apply policy would NOT touch the same field.
    let fetched = BTreeMap::from([("lot_rent".to_string(), text("440"))]);
    let result = run_cycle(&config, &state, &fetched, &ProviderSnapshot::new());
    assert_eq!(result.state.get("lot_rent"), Some(&text("425")));
}

#[test]
fn result_serializes_to_stable_json_shape() {
    let config = DefaultsConfig::from_toml(DEFAULTS).unwrap();
    let fetched = BTreeMap::from([("acreage".to_string(), text("12.5"))]);
    let result = run_cycle(&config, &config.table(), &fetched, &ProviderSnapshot::new());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["meta"]["config_name"], "Sunset Palms Valuation");
    assert_eq!(json["summary"]["applied"], 1);
    assert_eq!(json["decisions"][0]["action"], "refreshed_default");
    assert_eq!(json["state"]["acreage"], "12.5");
    assert_eq!(json["snapshot"]["acreage"], "12.5");
}
