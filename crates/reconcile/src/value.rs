use serde::ser::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Field value
// ---------------------------------------------------------------------------

/// The data a form field holds at a point in time.
///
/// Form state arrives loosely typed: a revenue line may be a JSON number
/// one session and a string the next. The variants keep the source type,
/// but every comparison goes through [`FieldValue::as_comparable`] so
/// `5000` and `"5000"` are the same value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Empty means: absent, or text that is blank after trimming.
    /// Numbers are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Canonical string form used for comparison. Integral numbers render
    /// without a fractional part so `Number(5000.0)` and `Text("5000")`
    /// compare equal.
    pub fn as_comparable(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
        }
    }

    /// Coerce a loosely-typed JSON value. Strings, numbers, and null map
    /// onto the matching variant; booleans and composite values are
    /// carried as their JSON text rather than rejected.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(0.0)),
            other => Self::Text(other.to_string()),
        }
    }

    /// Coerce a TOML value (defaults config entries).
    pub fn from_toml_value(value: &toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Text(s.clone()),
            toml::Value::Integer(i) => Self::Number(*i as f64),
            toml::Value::Float(f) => Self::Number(*f),
            other => Self::Text(other.to_string()),
        }
    }

    /// The JSON representation written back into saved form state.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Absent => serde_json::Value::Null,
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => {
                if is_integral(*n) {
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Value::from(*n)
                }
            }
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => {
                if is_integral(*n) {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15
}

fn format_number(n: f64) -> String {
    if is_integral(n) {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
