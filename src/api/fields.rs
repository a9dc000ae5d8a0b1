//! Field-set validation for request bodies

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::types::ApiError;

/// Names present in exactly one of `provided` and `required`, sorted and deduplicated
pub fn difference_between_lists<'a, I>(provided: I, required: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let provided: BTreeSet<&str> = provided.into_iter().collect();
    let required: BTreeSet<&str> = required.iter().copied().collect();

    provided
        .symmetric_difference(&required)
        .map(|name| name.to_string())
        .collect()
}

/// Reject `body` unless it has exactly the `required` fields
pub fn check_fields(body: &Map<String, Value>, required: &[&str]) -> Result<(), ApiError> {
    let difference = difference_between_lists(body.keys().map(String::as_str), required);
    if !difference.is_empty() {
        tracing::warn!(fields = ?difference, "Request fields do not match");
        return Err(ApiError::field_mismatch(difference));
    }

    Ok(())
}

/// Deserialize a body whose field set was already checked
pub fn deserialize_body<T>(body: Map<String, Value>) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(Value::Object(body))
        .map_err(|e| ApiError::invalid_details(e.to_string()))
}

/// Check that `body` has exactly the `required` fields, then deserialize it
pub fn parse_body<T>(body: Map<String, Value>, required: &[&str]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    check_fields(&body, required)?;
    deserialize_body(body)
}
