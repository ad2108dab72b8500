//! Typed decoding of single SQL literals
//!
//! Dump files mix several literal shapes in one `VALUES` tuple: `NULL`,
//! quoted strings (with two competing escape conventions), `0x...` binary
//! blobs, and bare numbers. [`decode_value`] classifies one trimmed literal
//! with a fixed decision table instead of a try-and-fall-through cascade.

use serde_json::Value;

/// One decoded SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    /// A `0x...` literal kept verbatim. These columns hold hashes and
    /// serialized blobs that are never interpreted downstream.
    Hex(String),
}

/// A hashable key extracted from an id column, used to join rows across
/// tables during reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JoinKey {
    Integer(i64),
    Text(String),
}

impl SqlValue {
    /// Key for index lookups. Null, float, and hex values never act as
    /// foreign keys, so they produce no key.
    pub fn join_key(&self) -> Option<JoinKey> {
        match self {
            SqlValue::Integer(n) => Some(JoinKey::Integer(*n)),
            SqlValue::Text(s) => Some(JoinKey::Text(s.clone())),
            _ => None,
        }
    }

    /// Convert into a JSON value for the output document.
    pub fn as_json(&self) -> Value {
        match self {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(n) => Value::from(*n),
            SqlValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SqlValue::Text(s) => Value::String(s.clone()),
            SqlValue::Hex(s) => Value::String(s.clone()),
        }
    }
}

/// Extract a join key from an already-built JSON value (used when a
/// document references another document by id).
pub fn json_join_key(value: &Value) -> Option<JoinKey> {
    match value {
        Value::Number(n) => n.as_i64().map(JoinKey::Integer),
        Value::String(s) => Some(JoinKey::Text(s.clone())),
        _ => None,
    }
}

/// Decode one literal substring into a [`SqlValue`].
///
/// Rules, in order: case-insensitive `NULL`; a fully single-quote-wrapped
/// string (unescaped); a `0x` hex literal (kept verbatim); an integer; a
/// float when the text contains a decimal point; anything else falls back
/// to text.
pub fn decode_value(raw: &str) -> SqlValue {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("null") {
        return SqlValue::Null;
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return SqlValue::Text(unescape(&raw[1..raw.len() - 1]));
    }
    if raw.starts_with("0x") {
        return SqlValue::Hex(raw.to_string());
    }
    if let Ok(n) = raw.parse::<i64>() {
        return SqlValue::Integer(n);
    }
    if raw.contains('.') {
        if let Ok(f) = raw.parse::<f64>() {
            return SqlValue::Float(f);
        }
    }
    SqlValue::Text(raw.to_string())
}

/// Collapse escape sequences inside a quoted string body.
///
/// Dumps in the wild mix backslash escaping (`\'`, `\\`) with standard SQL
/// doubled quotes (`''`). A single left-to-right scan handles both: a
/// backslash escapes an immediately following quote or backslash, a doubled
/// quote collapses to one, and any other backslash stays literal. One scan
/// means the two conventions cannot interact retroactively.
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some('\'') | Some('\\') => {
                    out.push(chars.next().unwrap());
                }
                _ => out.push('\\'),
            },
            '\'' => {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                }
                out.push('\'');
            }
            _ => out.push(c),
        }
    }
    out
}
