//! Key-path lookup over loosely-typed JSON.
//!
//! Cost Anomaly Detection payloads arrive in `TitleCase` from SNS and in
//! `camelCase` from EventBridge, so every field is looked up through a list
//! of candidate paths. The first path that resolves to a non-null value wins.

use serde_json::Value;

/// A sequence of object keys to descend through.
pub type KeyPath = &'static [&'static str];

/// Walk a single path. Returns `None` if any step hits a missing key,
/// a non-object, or `null`.
pub fn walk<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.as_object()?.get(*key)?;
        if cur.is_null() {
            return None;
        }
    }
    Some(cur)
}

/// Return the value at the first candidate path that resolves to non-null.
pub fn lookup<'a>(root: &'a Value, paths: &[KeyPath]) -> Option<&'a Value> {
    paths.iter().find_map(|path| walk(root, path))
}

/// Like [`lookup`], falling back to `default` when every path is exhausted.
pub fn lookup_or<'a>(root: &'a Value, paths: &[KeyPath], default: &'a Value) -> &'a Value {
    lookup(root, paths).unwrap_or(default)
}

/// Truthiness as the upstream tooling understands it: `null`, `false`, `0`,
/// empty strings, empty arrays and empty objects are all falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a scalar for display: strings verbatim, anything else as JSON text.
///
/// Non-strings therefore read as JSON (`true`, `1.0`, `{"a":1}`), not as a
/// Python-style `str()` of the value. Real Cost Anomaly Detection payloads
/// only carry strings and numbers in displayed fields, where both agree.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Look up a field and keep it only if it is truthy, rendered as text.
pub fn lookup_text(root: &Value, paths: &[KeyPath]) -> Option<String> {
    lookup(root, paths).filter(|v| is_truthy(v)).map(display)
}

/// Look up a field and keep it only if it is a JSON number.
pub fn lookup_number(root: &Value, paths: &[KeyPath]) -> Option<f64> {
    lookup(root, paths).and_then(Value::as_f64)
}
