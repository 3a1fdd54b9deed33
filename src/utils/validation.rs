use serde_json::{json, Value};
use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Flattens validation errors into `{ field: [message, ...] }`, falling back
/// to the error code when a rule carries no message.
pub fn into_details(errors: &ValidationErrors) -> Value {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    json!(fields)
}
