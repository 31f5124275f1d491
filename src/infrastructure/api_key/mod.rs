//! API Key infrastructure implementations
//!
//! This module provides implementations for secret generation, in-memory
//! storage and the session key registry.

mod generator;
mod registry;
mod repository;

pub use generator::{ApiKeyGenerator, OsRandomSource};
pub use registry::ApiKeyRegistry;
pub use repository::InMemoryApiKeyRepository;
