use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ReconcileError;
use crate::value::FieldValue;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// The Default Value Table: what the form pre-populates before any user
/// or provider input. Loaded once per session from TOML.
#[derive(Debug, Deserialize)]
pub struct DefaultsConfig {
    pub name: String,
    #[serde(default)]
    pub form: Option<FormInfo>,
    /// Field key → default value. TOML strings stay text; integers and
    /// floats become numbers; anything else is carried as text.
    #[serde(default)]
    pub fields: BTreeMap<String, toml::Value>,
}

/// Optional report metadata carried alongside the defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct FormInfo {
    #[serde(default)]
    pub title: Option<String>,
    /// Name of the spreadsheet template the assembled report targets.
    #[serde(default)]
    pub template: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl DefaultsConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconcileError> {
        let config: DefaultsConfig =
            toml::from_str(input).map_err(|e| ReconcileError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconcileError> {
        if self.name.trim().is_empty() {
            return Err(ReconcileError::ConfigValidation("name must not be empty".into()));
        }

        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for (key, value) in &self.fields {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(ReconcileError::ConfigValidation(
                    "field key must not be blank".into(),
                ));
            }
            if let Some(first) = seen.insert(trimmed.to_string(), key.as_str()) {
                return Err(ReconcileError::ConfigValidation(format!(
                    "field keys '{first}' and '{key}' collide after trimming"
                )));
            }
            if value.is_array() || value.is_table() {
                return Err(ReconcileError::ConfigValidation(format!(
                    "field '{key}': default must be a scalar"
                )));
            }
        }

        Ok(())
    }

    /// The field key → default value mapping consumed by the engine.
    /// Keys are trimmed; empty-valued defaults are kept here but never
    /// satisfy the policy's default-match rule.
    pub fn table(&self) -> BTreeMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|(key, value)| (key.trim().to_string(), FieldValue::from_toml_value(value)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
