//! apisvc-keys
//!
//! API key lifecycle management for a single administrative session:
//! - Key creation with CSPRNG-backed `tvly-` secrets
//! - Masked and revealed display forms
//! - Rename, reveal toggling and confirmed deletion
//! - Copying secrets through a pluggable clipboard

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use crate::config::{ClipboardConfig, SessionConfig};
use domain::{ClipboardWriter, DomainError};
use infrastructure::{
    api_key::{ApiKeyRegistry, InMemoryApiKeyRepository},
    session::{CommandClipboard, UnavailableClipboard},
};
use tracing::{debug, info};

/// Registry type used by interactive sessions
pub type SessionRegistry = ApiKeyRegistry<InMemoryApiKeyRepository>;

/// Create the session registry, seeding the default key when configured
pub async fn create_registry(config: &SessionConfig) -> Result<Arc<SessionRegistry>, DomainError> {
    let registry = Arc::new(ApiKeyRegistry::new(Arc::new(
        InMemoryApiKeyRepository::new(),
    )));

    if config.seed_default_key {
        registry.seed_default(&config.default_key_name).await?;
    }

    info!("Session registry ready with {} keys", registry.count().await?);

    Ok(registry)
}

/// Create the clipboard writer described by the configuration
pub fn create_clipboard(config: &ClipboardConfig) -> Arc<dyn ClipboardWriter> {
    match &config.command {
        Some(command) => {
            debug!("Using clipboard command: {}", command);
            Arc::new(CommandClipboard::new(command, config.args.clone()))
        }
        None => {
            debug!("No clipboard command configured, copying is unavailable");
            Arc::new(UnavailableClipboard)
        }
    }
}
