//! API Key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::secret::ApiKeySecret;

/// Opaque API key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(Uuid);

impl ApiKeyId {
    /// Create a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::str::FromStr for ApiKeyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// API Key entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique identifier for the key
    id: ApiKeyId,
    /// Display name for the key
    name: String,
    /// The full credential
    secret: ApiKeySecret,
    /// Requests made with this key, maintained by an external meter
    #[serde(default)]
    usage_count: u64,
    /// Whether the UI shows the full secret
    #[serde(default)]
    revealed: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl ApiKey {
    /// Create a new API key
    pub fn new(id: ApiKeyId, name: impl Into<String>, secret: ApiKeySecret) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: name.into(),
            secret,
            usage_count: 0,
            revealed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the usage counter (used when restoring persisted keys)
    pub fn with_usage_count(mut self, usage_count: u64) -> Self {
        self.usage_count = usage_count;
        self
    }

    // Getters

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret(&self) -> &ApiKeySecret {
        &self.secret
    }

    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Flip the visibility flag, returning the new value
    pub fn toggle_revealed(&mut self) -> bool {
        self.revealed = !self.revealed;
        self.touch();
        self.revealed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
