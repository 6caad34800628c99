use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{error::AppError, services::parse_uuid};

pub type JsonObject = Map<String, Value>;

/// Decode a raw request body that must be a JSON object.
///
/// Anything else is a server error, not an invalid argument.
pub fn parse_object(body: &str) -> Result<JsonObject, AppError> {
    Ok(serde_json::from_str(body)?)
}

/// A required string field. Absent or `null` is an invalid argument; a value
/// of another JSON type is a server error.
pub fn required_str<'a>(body: &'a JsonObject, field: &str) -> Result<&'a str, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(AppError::invalid_argument(format!(
            "{} is required",
            field
        ))),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(anyhow::anyhow!("{} must be a string", field).into()),
    }
}

pub fn required_uuid(body: &JsonObject, field: &str) -> Result<Uuid, AppError> {
    parse_uuid(field, required_str(body, field)?)
}

/// An optional typed field; a value that does not decode is an invalid argument
pub fn optional_field<T: DeserializeOwned>(
    body: &JsonObject,
    field: &str,
) -> Result<Option<T>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| AppError::invalid_argument(format!("{} is invalid: {}", field, e))),
    }
}

pub fn required_field<T: DeserializeOwned>(body: &JsonObject, field: &str) -> Result<T, AppError> {
    optional_field(body, field)?
        .ok_or_else(|| AppError::invalid_argument(format!("{} is required", field)))
}
