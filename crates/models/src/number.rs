use serde_json::Number;

use crate::errors::ModelError;

/// Parse a submitted form value into a JSON number.
///
/// Integers stay integers so `"4"` serializes back as `4`, not `4.0`.
pub fn parse_number(field: &'static str, raw: &str) -> Result<Number, ModelError> {
    let value = raw.trim();
    if let Ok(i) = value.parse::<i64>() {
        return Ok(Number::from(i));
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| ModelError::InvalidNumber { field, value: raw.to_string() })
}

pub(crate) fn required(field: &'static str, value: Option<String>) -> Result<String, ModelError> {
    value.ok_or(ModelError::MissingField(field))
}
