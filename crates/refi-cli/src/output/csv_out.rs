use serde_json::Value;
use std::io::{self, Write};

use refi_core::export::SCHEDULE_CSV_HEADER;

use super::{row_array, scalar_text};

/// Write exported schedule records under the fixed header.
pub fn write_schedule_csv<W: Write>(writer: W, records: &[[String; 9]]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SCHEDULE_CSV_HEADER)?;
    for record in records {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write output as CSV to stdout: the row table when there is one,
/// otherwise field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match (row_array(value), value) {
        (Some(rows), _) => write_rows(&mut wtr, rows),
        (None, Value::Array(items)) => write_rows(&mut wtr, items),
        (None, Value::Object(map)) => {
            let fields = map
                .get("result")
                .and_then(Value::as_object)
                .unwrap_or(map);
            write_fields(&mut wtr, fields)
        }
        (None, other) => wtr.write_record([scalar_text(other)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        tracing::error!(error = %e, "CSV output failed");
    }
}

fn write_fields<W: Write>(
    wtr: &mut csv::Writer<W>,
    fields: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in fields {
        wtr.write_record([key.as_str(), &scalar_text(val)])?;
    }
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([scalar_text(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| item.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}
