//! Tabular query results

use serde_json::Value as JsonValue;

/// One result row: column name to scalar value, in column order
pub type ResultRow = serde_json::Map<String, JsonValue>;

/// Rows in the order the backend returned them
pub type ResultSet = Vec<ResultRow>;

/// Render a cell for human-readable output (strings without quotes)
pub fn value_to_string(v: &JsonValue) -> String {
    match v {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        _ => v.to_string(),
    }
}

/// Interpret a JSON document as a result set.
///
/// Accepts only an array of objects; anything else yields `None`.
pub fn rows_from_json(value: JsonValue) -> Option<ResultSet> {
    match value {
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| match item {
                JsonValue::Object(row) => Some(row),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}
