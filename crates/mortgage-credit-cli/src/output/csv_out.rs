use serde_json::Value;
use std::io;

use super::{payload, record_rows, scalar_text};

/// Write output as CSV to stdout. Record lists (schedule months, rule
/// outcomes) become one row each; otherwise a two-column field/value CSV.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Err(e) = write_csv(&mut wtr, payload(value)) {
        eprintln!("CSV write error: {}", e);
    }
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) -> csv::Result<()> {
    if let Some((_, rows)) = record_rows(result) {
        return write_rows(wtr, rows);
    }

    match result {
        Value::Object(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.clone(), scalar_text(val)])?;
            }
        }
        Value::Array(rows) => write_rows(wtr, rows)?,
        other => wtr.write_record([scalar_text(other)])?,
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            wtr.write_record([scalar_text(row)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        wtr.write_record(&cells)?;
    }
    Ok(())
}
