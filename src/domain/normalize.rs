use serde_json::Value;

pub const LIST_SEPARATOR: &str = "; ";

/// Turns one form value into the string written to its cell.
///
/// Lists are joined with `"; "`, strings lose currency symbols and thousands
/// separators, missing and null values become an empty cell.
pub fn normalize(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| stringify(item).trim().to_string())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        Some(Value::String(text)) => strip_currency(text).trim().to_string(),
        Some(other) => stringify(other).trim().to_string(),
    }
}

fn strip_currency(text: &str) -> String {
    text.replace(['$', ','], "")
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        // Integral floats print without a fraction, so 2.0 becomes "2"
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => float.to_string(),
            _ => number.to_string(),
        },
        // Nested structures are written as compact JSON
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
