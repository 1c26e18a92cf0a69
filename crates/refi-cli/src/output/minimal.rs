use serde_json::Value;

use super::scalar_text;

/// Print just the headline figure of the output.
///
/// Schedules print their total interest, comparisons the name of the best
/// offer, anything else its first field.
pub fn print_minimal(value: &Value) {
    let result = value.get("result").unwrap_or(value);

    if let Some(interest) = result.pointer("/summary/total_interest") {
        println!("{}", scalar_text(interest));
        return;
    }

    if let Some(best) = result.get("best_index").and_then(Value::as_u64) {
        let name = result
            .pointer(&format!("/rows/{best}/name"))
            .map(scalar_text)
            .unwrap_or_else(|| best.to_string());
        println!("{}", name);
        return;
    }

    match result {
        Value::Object(map) => {
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar_text(val));
            }
        }
        Value::Array(items) => println!("{}", items.len()),
        other => println!("{}", scalar_text(other)),
    }
}
