//! API Key registry
//!
//! The authoritative collection of keys for a session. Every mutation goes
//! through here and is serialized behind one lock, so id allocation and
//! existence checks cannot interleave with other writers.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::DomainError;
use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, validate_key_name};

use super::generator::ApiKeyGenerator;

/// Registry of the session's API keys
#[derive(Debug)]
pub struct ApiKeyRegistry<R>
where
    R: ApiKeyRepository,
{
    repository: Arc<R>,
    generator: ApiKeyGenerator,
    /// Every id handed out this session, deleted ones included. Holding this
    /// lock is what serializes mutations.
    issued: Mutex<HashSet<ApiKeyId>>,
}

impl<R: ApiKeyRepository> ApiKeyRegistry<R> {
    /// Create a new registry backed by the system CSPRNG
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: ApiKeyGenerator::system(),
            issued: Mutex::new(HashSet::new()),
        }
    }

    /// Create with a custom generator
    pub fn with_generator(mut self, generator: ApiKeyGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Create a new API key
    ///
    /// The name must not be blank; it is stored trimmed.
    pub async fn create(&self, name: &str) -> Result<ApiKey, DomainError> {
        validate_key_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        let name = name.trim();

        let mut issued = self.issued.lock().await;
        let id = allocate_id(&issued);
        let secret = self.generator.generate()?;

        let created = self.repository.insert(ApiKey::new(id, name, secret)).await?;
        issued.insert(id);

        info!("API key created: id={}, name={}", id, name);

        Ok(created)
    }

    /// Create the key a fresh session starts with
    pub async fn seed_default(&self, name: &str) -> Result<ApiKey, DomainError> {
        debug!("Seeding default API key: name={}", name);
        self.create(name).await
    }

    /// Rename an API key
    ///
    /// The new name is taken as given; blank names are accepted here.
    pub async fn rename(&self, id: &ApiKeyId, new_name: &str) -> Result<ApiKey, DomainError> {
        let _guard = self.issued.lock().await;
        let mut key = self.require(id).await?;

        key.set_name(new_name);
        let updated = self.repository.update(&key).await?;

        info!("API key renamed: id={}, name={}", id, new_name);

        Ok(updated)
    }

    /// Permanently delete an API key
    ///
    /// Callers are responsible for getting the user's confirmation first.
    /// The id stays retired for the rest of the session.
    pub async fn delete(&self, id: &ApiKeyId) -> Result<(), DomainError> {
        let _guard = self.issued.lock().await;

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        info!("API key deleted: id={}", id);

        Ok(())
    }

    /// Flip whether the key's full secret is shown
    pub async fn toggle_reveal(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        let _guard = self.issued.lock().await;
        let mut key = self.require(id).await?;

        let revealed = key.toggle_revealed();
        let updated = self.repository.update(&key).await?;

        debug!("API key visibility toggled: id={}, revealed={}", id, revealed);

        Ok(updated)
    }

    /// Load previously persisted keys at session start
    ///
    /// The whole batch is rejected if any id repeats, was already issued or
    /// is already stored. A storage failure part way through removes the keys
    /// inserted so far.
    pub async fn load(&self, keys: Vec<ApiKey>) -> Result<usize, DomainError> {
        let mut issued = self.issued.lock().await;

        let mut batch = HashSet::with_capacity(keys.len());
        for key in &keys {
            if issued.contains(key.id())
                || !batch.insert(*key.id())
                || self.repository.exists(key.id()).await?
            {
                return Err(DomainError::conflict(format!(
                    "API key with ID '{}' already exists",
                    key.id()
                )));
            }
        }

        let mut inserted = Vec::with_capacity(keys.len());
        for key in keys {
            let id = *key.id();
            if let Err(e) = self.repository.insert(key).await {
                self.roll_back(&inserted).await;
                return Err(e);
            }
            inserted.push(id);
        }

        issued.extend(inserted.iter().copied());
        info!("Loaded {} API keys", inserted.len());

        Ok(inserted.len())
    }

    /// Get an API key by ID
    pub async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        self.repository.get(id).await
    }

    /// Snapshot of all keys in display order
    pub async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        self.repository.list().await
    }

    /// Count API keys
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    async fn roll_back(&self, ids: &[ApiKeyId]) {
        for id in ids {
            if let Err(e) = self.repository.delete(id).await {
                warn!("Failed to roll back loaded API key: id={}, error={}", id, e);
            }
        }
    }

    async fn require(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn allocate_id(issued: &HashSet<ApiKeyId>) -> ApiKeyId {
    loop {
        let id = ApiKeyId::generate();
        if !issued.contains(&id) {
            return id;
        }
    }
}

fn not_found(id: &ApiKeyId) -> DomainError {
    DomainError::not_found(format!("API key '{}' not found", id))
}
