//! API Key domain
//!
//! This module provides domain types and traits for API key management:
//! the key entity, its secret material, display masking and the storage
//! seam.

mod entity;
mod presenter;
mod repository;
mod secret;
mod validation;

pub use entity::{ApiKey, ApiKeyId};
pub use presenter::{ApiKeyView, MASK_CHAR, MASK_LEN, display_secret, mask_secret};
pub use repository::ApiKeyRepository;
pub use secret::{ApiKeySecret, SECRET_BODY_LEN, SECRET_BYTES, SECRET_PREFIX, SECRET_SEPARATOR};
pub use validation::{ApiKeyValidationError, validate_key_name, validate_secret};

#[cfg(test)]
pub use repository::mock;
