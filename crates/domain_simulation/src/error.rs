//! Typed API errors
//!
//! Each error class the simulations API returns is decoded into its own type
//! so tests can assert on structured content instead of raw bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 404 response: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct NotFoundError {
    pub message: String,
}

impl NotFoundError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A 409 response: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ConflictError {
    pub message: String,
}

impl ConflictError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A 422 response carrying one message per rejected field
///
/// Serializes as `{"errors": {...}}`. Decodes from that shape or from a flat
/// `{ field: message }` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(from = "UnprocessableEntityBody")]
#[error("Validation failed for {}", describe_fields(.errors))]
pub struct UnprocessableEntityError {
    pub errors: BTreeMap<String, String>,
}

impl UnprocessableEntityError {
    pub fn new(errors: BTreeMap<String, String>) -> Self {
        Self { errors }
    }

    /// Field path to validation message
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Message reported for one field path
    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    /// Whether any field reported this message
    pub fn contains_message(&self, message: &str) -> bool {
        self.errors.values().any(|m| m == message)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UnprocessableEntityBody {
    Wrapped { errors: BTreeMap<String, String> },
    Flat(BTreeMap<String, String>),
}

impl From<UnprocessableEntityBody> for UnprocessableEntityError {
    fn from(body: UnprocessableEntityBody) -> Self {
        match body {
            UnprocessableEntityBody::Wrapped { errors } => Self { errors },
            UnprocessableEntityBody::Flat(errors) => Self { errors },
        }
    }
}

fn describe_fields(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(path, message)| format!("{path}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Any of the error classes the simulations API is known to return
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Conflict: {0}")]
    Conflict(#[from] ConflictError),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(#[from] UnprocessableEntityError),
}

impl ApiError {
    /// HTTP status code the error class is returned with
    pub fn status(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::UnprocessableEntity(_) => 422,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_decodes_message() {
        let error: NotFoundError =
            serde_json::from_str(r#"{"message": "CPF 12345678909 not found"}"#).unwrap();
        assert_eq!(error.message(), "CPF 12345678909 not found");
        assert_eq!(error.to_string(), "CPF 12345678909 not found");
    }

    #[test]
    fn test_conflict_decodes_message() {
        let error: ConflictError = serde_json::from_str(r#"{"message": "CPF already exists"}"#).unwrap();
        assert_eq!(error.message(), "CPF already exists");
    }

    #[test]
    fn test_unprocessable_entity_decodes_wrapped_errors() {
        let body = r#"{"errors": {"email": "E-mail must be valid", "installments": "Installments must be equal or less than 48"}}"#;
        let error: UnprocessableEntityError = serde_json::from_str(body).unwrap();

        assert_eq!(error.errors().len(), 2);
        assert_eq!(error.message_for("email"), Some("E-mail must be valid"));
        assert!(error.contains_message("Installments must be equal or less than 48"));
    }

    #[test]
    fn test_unprocessable_entity_decodes_flat_map() {
        let error: UnprocessableEntityError =
            serde_json::from_str(r#"{"name": "Name cannot be empty"}"#).unwrap();
        assert_eq!(error.message_for("name"), Some("Name cannot be empty"));
    }

    #[test]
    fn test_unprocessable_entity_serializes_wrapped() {
        let error = UnprocessableEntityError::new(BTreeMap::from([(
            "name".to_string(),
            "Name cannot be empty".to_string(),
        )]));

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["errors"]["name"], "Name cannot be empty");
        assert_eq!(error.to_string(), "Validation failed for name: Name cannot be empty");
    }

    #[test]
    fn test_api_error_status() {
        assert_eq!(ApiError::from(NotFoundError::new("Name not found")).status(), 404);
        assert_eq!(ApiError::from(ConflictError::new("CPF already exists")).status(), 409);
        assert_eq!(ApiError::from(UnprocessableEntityError::default()).status(), 422);
    }
}
