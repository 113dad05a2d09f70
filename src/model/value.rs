//! Payload value carried by an incremental unit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed payload of a unit.
///
/// Covers the value kinds produced by incremental pipelines:
/// - Scalars: Bool, Int, Float, String
/// - Containers: List (ordered), Set (sorted, duplicate-free)
/// - `None` for an empty or not-yet-known payload
///
/// `Clone` is a deep copy: no two units ever share payload storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Set(Vec<Value>),
}

// ============================================================================
// Construction from raw text
// ============================================================================

impl Value {
    /// Build a typed value from raw text.
    ///
    /// `"None"` and blank text map to [`Value::None`], `true`/`false` to
    /// booleans, numeric literals to `Int` or `Float`, `[a, b]` to a list and
    /// `{a, b}` to a set. Anything else is kept as a trimmed string.
    pub fn parse(text: &str) -> Value {
        let text = text.trim();
        if text.is_empty() || text == "None" {
            return Value::None;
        }
        if text.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        if looks_numeric(text) {
            if let Ok(i) = text.parse::<i64>() {
                return Value::Int(i);
            }
            if let Ok(f) = text.parse::<f64>() {
                return Value::Float(f);
            }
        }
        if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            return Value::List(split_top_level(inner).into_iter().map(Value::parse).collect());
        }
        if let Some(inner) = text.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
            return Value::set(split_top_level(inner).into_iter().map(Value::parse));
        }
        Value::String(text.to_owned())
    }

    /// Build a set value: elements are sorted by their textual rendering and
    /// duplicates (same rendering) are dropped.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        let mut items: Vec<(String, Value)> = items
            .into_iter()
            .map(|v| (v.to_string(), v))
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        items.dedup_by(|a, b| a.0 == b.0);
        Value::Set(items.into_iter().map(|(_, v)| v).collect())
    }
}

fn looks_numeric(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

/// Split on commas that are not nested inside brackets or braces.
fn split_top_level(inner: &str) -> Vec<&str> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NONE",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::List(_) => "LIST",
            Value::Set(_) => "SET",
        }
    }

    pub fn is_none(&self) -> bool { matches!(self, Value::None) }
    pub fn is_numeric(&self) -> bool { matches!(self, Value::Int(_) | Value::Float(_)) }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempt to extract as f64 (integers widen).
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a list or set, `None` for scalars.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self { Value::None }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::None) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Debug keeps the fractional part, so 1.0 does not read back as an Int
            Value::Float(v) => write!(f, "{v:?}"),
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => write_joined(f, "[", items, "]"),
            Value::Set(items) => write_joined(f, "{", items, "}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 { write!(f, ",")?; }
        write!(f, "{v}")?;
    }
    write!(f, "{close}")
}
