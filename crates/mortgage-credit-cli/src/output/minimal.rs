use serde_json::Value;

use super::{payload, scalar_text};

/// Headline field per command, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "decision",
    "monthly_payment",
    "valid",
    "formatted",
    "documents",
];

/// Print just the key answer of the command.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = payload(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            match map.get(key) {
                Some(Value::Array(docs)) if key == "documents" => {
                    return docs
                        .iter()
                        .filter_map(|d| d.get("document"))
                        .map(scalar_text)
                        .collect::<Vec<_>>()
                        .join("\n");
                }
                Some(val) if !val.is_null() => return scalar_text(val),
                _ => {}
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, scalar_text(val));
        }
    }

    scalar_text(result)
}
