//! In-memory API key repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository};

#[derive(Debug, Default)]
struct Inner {
    keys: HashMap<ApiKeyId, ApiKey>,
    order: Vec<ApiKeyId>,
}

/// In-memory implementation of ApiKeyRepository
///
/// Keys are listed in the order they were inserted.
#[derive(Debug)]
pub struct InMemoryApiKeyRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryApiKeyRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }
}

impl Default for InMemoryApiKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.keys.get(id).cloned())
    }

    async fn insert(&self, api_key: ApiKey) -> Result<ApiKey, DomainError> {
        let mut inner = self.inner.write().await;
        let id = *api_key.id();

        if inner.keys.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "API key with ID '{}' already exists",
                id
            )));
        }

        inner.keys.insert(id, api_key.clone());
        inner.order.push(id);

        Ok(api_key)
    }

    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.keys.get_mut(api_key.id()) {
            Some(slot) => {
                *slot = api_key.clone();
                Ok(api_key.clone())
            }
            None => Err(DomainError::not_found(format!(
                "API key '{}' not found",
                api_key.id()
            ))),
        }
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.keys.remove(id).is_some() {
            inner.order.retain(|k| k != id);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        let inner = self.inner.read().await;

        let result: Vec<ApiKey> = inner
            .order
            .iter()
            .filter_map(|id| inner.keys.get(id))
            .cloned()
            .collect();

        Ok(result)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.inner.read().await.keys.len())
    }
}
