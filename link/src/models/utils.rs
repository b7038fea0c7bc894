use serde_json::Value;

/// Render a JSON number as a decimal integer string.
///
/// Integers are rendered verbatim. Floats are rounded to the nearest integer,
/// which is how 17-digit time tokens come back from decoders that only know
/// doubles.
pub fn render_integer(value: &Value) -> Option<String> {
    if let Some(n) = value.as_u64() {
        return Some(n.to_string());
    }
    if let Some(n) = value.as_i64() {
        return Some(n.to_string());
    }
    value.as_f64().filter(|f| f.is_finite()).map(|f| format!("{:.0}", f))
}

/// Accept a string, or a number rendered as a decimal integer.
pub fn string_or_integer(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(_) => render_integer(value),
        _ => None,
    }
}
