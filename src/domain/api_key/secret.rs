//! API key secret material

use serde::{Deserialize, Serialize};

use super::validation::{ApiKeyValidationError, validate_secret};

/// Literal identifying the credential class
pub const SECRET_PREFIX: &str = "tvly";

/// Separator between the prefix and the hex body
pub const SECRET_SEPARATOR: char = '-';

/// Number of random bytes behind every secret
pub const SECRET_BYTES: usize = 32;

/// Length of the lowercase hex body
pub const SECRET_BODY_LEN: usize = SECRET_BYTES * 2;

/// Full (unmasked) credential string
///
/// Generated secrets are always canonical. Secrets restored from an external
/// store are kept as they were persisted, canonical or not.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeySecret(String);

impl ApiKeySecret {
    /// Create a secret after checking the canonical format
    pub fn new(secret: impl Into<String>) -> Result<Self, ApiKeyValidationError> {
        let secret = secret.into();
        validate_secret(&secret)?;
        Ok(Self(secret))
    }

    /// Wrap a previously persisted secret without checking its shape
    pub fn from_stored(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Get the full secret
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check whether the secret is in canonical form
    pub fn is_canonical(&self) -> bool {
        validate_secret(&self.0).is_ok()
    }
}

impl std::fmt::Debug for ApiKeySecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKeySecret(<redacted>)")
    }
}
