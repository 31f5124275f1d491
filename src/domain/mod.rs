//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod capabilities;
pub mod error;

pub use api_key::{
    ApiKey, ApiKeyId, ApiKeyRepository, ApiKeySecret, ApiKeyValidationError, ApiKeyView,
};
pub use capabilities::{ClipboardWriter, ConfirmationPrompt, RandomSource};
pub use error::DomainError;
