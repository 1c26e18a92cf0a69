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

/// The row array of a schedule or comparison envelope, if the value has one.
pub(crate) fn row_array(value: &Value) -> Option<&Vec<Value>> {
    let result = value.get("result").unwrap_or(value);
    result
        .pointer("/schedule/rows")
        .or_else(|| result.get("rows"))
        .and_then(Value::as_array)
}

/// Plain-text rendering of a scalar JSON value.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
