pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Keys whose value is a list of records worth rendering as rows of their own
/// (rule outcomes, schedule months, document lists).
pub(crate) const ROW_KEYS: [&str; 4] = ["rules", "rows", "schedule", "documents"];

/// The payload of an envelope (`result`), or the value itself.
pub(crate) fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// First list of records under one of [`ROW_KEYS`].
pub(crate) fn record_rows(value: &Value) -> Option<(&'static str, &Vec<Value>)> {
    let map = value.as_object()?;
    ROW_KEYS.iter().find_map(|key| match map.get(*key) {
        Some(Value::Array(rows)) if rows.first().is_some_and(Value::is_object) => {
            Some((*key, rows))
        }
        _ => None,
    })
}

pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
