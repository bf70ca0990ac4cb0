use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{payload, record_rows, scalar_text, ROW_KEYS};

/// Render the command result as tables: one field/value table for the
/// headline figures, then one table for any list of records (rule outcomes,
/// schedule months, documents).
pub fn print_table(value: &Value) {
    let result = payload(value);

    match result {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                if ROW_KEYS.contains(&key.as_str()) && val.is_array() {
                    continue;
                }
                builder.push_record([key.clone(), scalar_text(val)]);
            }
            println!("{}", Table::from(builder));

            if let Some((key, rows)) = record_rows(result) {
                println!("\n{}:", key);
                println!("{}", rows_table(rows));
            }
        }
        Value::Array(rows) => println!("{}", rows_table(rows)),
        _ => println!("{}", scalar_text(result)),
    }

    print_envelope_notes(value);
}

fn rows_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    let headers: Vec<String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => vec!["value".to_string()],
    };
    builder.push_record(headers.iter().map(String::as_str));

    for row in rows {
        let cells: Vec<String> = match row {
            Value::Object(map) => headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect(),
            other => vec![scalar_text(other)],
        };
        builder.push_record(cells);
    }
    Table::from(builder)
}

fn print_envelope_notes(value: &Value) {
    let Some(envelope) = value.as_object() else {
        return;
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
