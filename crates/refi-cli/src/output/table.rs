use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{row_array, scalar_text};

/// Fields of wide row objects shown in the terminal, with their headings.
const SCHEDULE_COLUMNS: [(&str, &str); 8] = [
    ("index", "#"),
    ("annual_rate_percent", "Rate %"),
    ("scheduled_payment", "Payment"),
    ("prepayment_amount", "Extra"),
    ("base_principal_portion", "Principal"),
    ("total_principal_portion", "Total principal"),
    ("interest_portion", "Interest"),
    ("ending_balance", "Balance"),
];

const COMPARISON_COLUMNS: [(&str, &str); 9] = [
    ("name", "Offer"),
    ("monthly_payment", "Monthly"),
    ("window_interest", "Window interest"),
    ("other_costs", "Other costs"),
    ("window_total", "Window total"),
    ("delta_vs_current", "vs current"),
    ("rate_after", "Rate after %"),
    ("payoff_months", "Payoff months"),
    ("is_best", "Best"),
];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(rows) = row_array(value) {
        let is_schedule = rows
            .first()
            .map(|r| r.get("ending_balance").is_some())
            .unwrap_or(false);
        let columns: &[(&str, &str)] = if is_schedule {
            &SCHEDULE_COLUMNS
        } else {
            &COMPARISON_COLUMNS
        };
        print_rows(rows, columns);
        print_trailer(value);
        return;
    }

    match value {
        Value::Object(map) => match map.get("result").and_then(Value::as_object) {
            Some(result) => {
                print_fields(result);
                print_trailer(value);
            }
            None => print_fields(map),
        },
        Value::Array(items) => print_items(items),
        other => println!("{}", scalar_text(other)),
    }
}

fn money_text(value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<rust_decimal::Decimal>() {
            Ok(d) => format!("{:.2}", d.round_dp(2)),
            Err(_) => s.clone(),
        },
        Value::Null => "–".to_string(),
        other => scalar_text(other),
    }
}

fn print_rows(rows: &[Value], columns: &[(&str, &str)]) {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|(_, heading)| heading.to_string()));
    for row in rows {
        builder.push_record(columns.iter().map(|(key, _)| {
            let cell = row.get(*key).unwrap_or(&Value::Null);
            if *key == "name" {
                scalar_text(cell)
            } else {
                money_text(cell)
            }
        }));
    }
    println!("{}", Table::from(builder));
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        let text = match val {
            Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
            other => scalar_text(other),
        };
        builder.push_record([key.clone(), text]);
    }
    println!("{}", Table::from(builder));
}

fn print_items(items: &[Value]) {
    if items.is_empty() {
        println!("(empty)");
        return;
    }
    match items.first() {
        Some(Value::Object(first)) => {
            let keys: Vec<&str> = first.keys().map(String::as_str).collect();
            let mut builder = Builder::default();
            builder.push_record(keys.iter().map(|k| k.to_string()));
            for item in items {
                builder.push_record(keys.iter().map(|k| {
                    let cell = item.get(*k).unwrap_or(&Value::Null);
                    match cell {
                        Value::Array(list) => format!("[{} items]", list.len()),
                        other => scalar_text(other),
                    }
                }));
            }
            println!("{}", Table::from(builder));
        }
        _ => items.iter().for_each(|item| println!("{}", scalar_text(item))),
    }
}

/// Summary totals, warnings and methodology below the main table.
fn print_trailer(envelope: &Value) {
    if let Some(Value::Object(summary)) = envelope.pointer("/result/summary") {
        println!();
        print_fields(summary);
    }

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
