//! API Key validation utilities

use thiserror::Error;

use super::secret::{SECRET_BODY_LEN, SECRET_PREFIX, SECRET_SEPARATOR};

/// Errors that can occur during API key validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("Please enter a key name")]
    EmptyName,

    #[error("API key secret must start with '{0}{1}'")]
    MissingPrefix(&'static str, char),

    #[error("API key secret body must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("API key secret contains invalid character: '{0}'. Only lowercase hex is allowed")]
    InvalidCharacter(char),
}

/// Validate a key name supplied on creation
///
/// The name must contain something other than whitespace. Renames are not
/// validated.
pub fn validate_key_name(name: &str) -> Result<(), ApiKeyValidationError> {
    if name.trim().is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    Ok(())
}

/// Validate that a secret is in canonical form: `tvly-` followed by 64
/// lowercase hex characters
pub fn validate_secret(secret: &str) -> Result<(), ApiKeyValidationError> {
    let body = secret
        .strip_prefix(SECRET_PREFIX)
        .and_then(|rest| rest.strip_prefix(SECRET_SEPARATOR))
        .ok_or(ApiKeyValidationError::MissingPrefix(
            SECRET_PREFIX,
            SECRET_SEPARATOR,
        ))?;

    if let Some(c) = body
        .chars()
        .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(ApiKeyValidationError::InvalidCharacter(c));
    }

    if body.len() != SECRET_BODY_LEN {
        return Err(ApiKeyValidationError::InvalidLength {
            expected: SECRET_BODY_LEN,
            actual: body.len(),
        });
    }

    Ok(())
}
