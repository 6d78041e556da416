//! Loading and saving field-value mappings: JSON objects of loosely-typed
//! scalars, keyed by field.

use std::collections::BTreeMap;
use std::path::Path;

use parkval_reconcile::FieldValue;

use crate::CliError;

/// Read a JSON file holding one object of field → scalar. Values are
/// coerced permissively: strings and numbers keep their type, null is
/// absent, anything else is carried as its JSON text. The caller supplies
/// the exit codes for IO and parse failures (each command owns its range).
pub fn load_value_map(
    path: &Path,
    io_code: u8,
    parse_code: u8,
) -> Result<BTreeMap<String, FieldValue>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError {
        code: io_code,
        message: format!("cannot read {}: {e}", path.display()),
        hint: None,
    })?;

    let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| CliError {
        code: parse_code,
        message: format!("{}: invalid JSON: {e}", path.display()),
        hint: None,
    })?;

    let object = value.as_object().ok_or_else(|| CliError {
        code: parse_code,
        message: format!("{}: expected a top-level JSON object", path.display()),
        hint: Some("field files map field keys to scalar values".into()),
    })?;

    Ok(object
        .iter()
        .map(|(key, raw)| (key.clone(), FieldValue::from_json(raw)))
        .collect())
}

/// Serialize a field mapping and write it atomically (write `.tmp`, then
/// rename over the target).
pub fn write_value_map_atomic(
    path: &Path,
    map: &BTreeMap<String, FieldValue>,
    io_code: u8,
) -> Result<(), CliError> {
    let object: serde_json::Map<String, serde_json::Value> = map
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect();
    let body = serde_json::to_string_pretty(&serde_json::Value::Object(object))
        .map_err(|e| CliError {
            code: io_code,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;
    write_atomic(path, &body, io_code)
}

/// Write a string atomically: `.tmp` sibling first, then rename.
pub fn write_atomic(path: &Path, body: &str, io_code: u8) -> Result<(), CliError> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, body).map_err(|e| CliError {
        code: io_code,
        message: format!("cannot write {}: {e}", tmp.display()),
        hint: None,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| CliError {
        code: io_code,
        message: format!("cannot rename {} to {}: {e}", tmp.display(), path.display()),
        hint: None,
    })
}
