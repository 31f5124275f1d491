//! API Key generation
//!
//! Generates secrets of the form `tvly-<64 lowercase hex>` from an injected
//! random source.

use std::sync::Arc;

use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::api_key::{ApiKeySecret, SECRET_BYTES, SECRET_PREFIX, SECRET_SEPARATOR};
use crate::domain::{DomainError, RandomSource};

/// Random source backed by the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), DomainError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| DomainError::random(e.to_string()))
    }
}

/// Generator for secure API keys
#[derive(Debug, Clone)]
pub struct ApiKeyGenerator {
    source: Arc<dyn RandomSource>,
}

impl ApiKeyGenerator {
    /// Create a generator drawing from the given random source
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Generator backed by the operating system CSPRNG
    pub fn system() -> Self {
        Self::new(Arc::new(OsRandomSource))
    }

    /// Generate a new secret
    pub fn generate(&self) -> Result<ApiKeySecret, DomainError> {
        let mut random_bytes = [0u8; SECRET_BYTES];
        self.source.fill(&mut random_bytes)?;

        let key = format!(
            "{}{}{}",
            SECRET_PREFIX,
            SECRET_SEPARATOR,
            hex::encode(random_bytes)
        );

        ApiKeySecret::new(key).map_err(|e| DomainError::internal(e.to_string()))
    }
}

impl Default for ApiKeyGenerator {
    fn default() -> Self {
        Self::system()
    }
}
