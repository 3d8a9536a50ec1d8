//! User validation utilities

use serde_json::Value;
use thiserror::Error;

use super::entity::NewUser;

/// Reasons a creation payload is rejected.
///
/// Callers only ever see `Invalid payload.`; the reason is kept for logs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Payload is missing")]
    MissingPayload,

    #[error("Payload must be a JSON object")]
    NotAnObject,

    #[error("Payload is empty")]
    EmptyPayload,

    #[error("Field '{0}' is missing")]
    MissingField(&'static str),

    #[error("Field '{0}' must be a string")]
    NotAString(&'static str),

    #[error("Field '{0}' cannot be blank")]
    BlankField(&'static str),

    #[error("Field '{0}' contains a NUL character")]
    NulCharacter(&'static str),
}

/// Check a creation payload and extract the trimmed username and email.
///
/// Rules:
/// - Payload must be present, a JSON object and non-empty
/// - `username` and `email` must both be present as strings
/// - Neither may be blank once surrounding whitespace is trimmed
/// - Neither may contain NUL, which PostgreSQL text columns reject
///
/// Unknown keys are ignored.
pub fn validate_new_user(payload: Option<&Value>) -> Result<NewUser, UserValidationError> {
    let object = match payload {
        None | Some(Value::Null) => return Err(UserValidationError::MissingPayload),
        Some(Value::Object(object)) => object,
        Some(_) => return Err(UserValidationError::NotAnObject),
    };

    if object.is_empty() {
        return Err(UserValidationError::EmptyPayload);
    }

    let username = required_text(object.get("username"), "username")?;
    let email = required_text(object.get("email"), "email")?;

    Ok(NewUser::new(username, email))
}

/// Validate a username on its own
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    check_text(username, "username")
}

/// Validate an email on its own. Only presence is checked.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    check_text(email, "email")
}

fn required_text(
    value: Option<&Value>,
    field: &'static str,
) -> Result<String, UserValidationError> {
    match value {
        None | Some(Value::Null) => Err(UserValidationError::MissingField(field)),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            check_text(trimmed, field)?;
            Ok(trimmed.to_string())
        }
        Some(_) => Err(UserValidationError::NotAString(field)),
    }
}

fn check_text(value: &str, field: &'static str) -> Result<(), UserValidationError> {
    if value.trim().is_empty() {
        return Err(UserValidationError::BlankField(field));
    }

    if value.contains('\0') {
        return Err(UserValidationError::NulCharacter(field));
    }

    Ok(())
}
