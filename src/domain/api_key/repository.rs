//! API Key repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{ApiKey, ApiKeyId};
use crate::domain::DomainError;

/// Repository trait for API key storage
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// Get an API key by its ID
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError>;

    /// Insert a new API key
    async fn insert(&self, api_key: ApiKey) -> Result<ApiKey, DomainError>;

    /// Replace an existing API key
    async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError>;

    /// Delete an API key, returning whether it existed
    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError>;

    /// List all API keys in insertion order
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError>;

    /// Count API keys
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if an API key ID exists
    async fn exists(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock API key repository for testing
    #[derive(Debug, Default)]
    pub struct MockApiKeyRepository {
        keys: Arc<RwLock<Vec<ApiKey>>>,
        fail_writes: Arc<RwLock<bool>>,
        inserts_left: Arc<RwLock<Option<usize>>>,
    }

    impl MockApiKeyRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether write operations should fail
        pub async fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.write().await = fail;
        }

        /// Let the next `count` inserts succeed and fail every insert after
        pub async fn fail_inserts_after(&self, count: usize) {
            *self.inserts_left.write().await = Some(count);
        }

        async fn check_fail_writes(&self) -> Result<(), DomainError> {
            if *self.fail_writes.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ApiKeyRepository for MockApiKeyRepository {
        async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
            let keys = self.keys.read().await;
            Ok(keys.iter().find(|k| k.id() == id).cloned())
        }

        async fn insert(&self, api_key: ApiKey) -> Result<ApiKey, DomainError> {
            self.check_fail_writes().await?;
            if let Some(left) = self.inserts_left.write().await.as_mut() {
                if *left == 0 {
                    return Err(DomainError::storage("Mock repository insert limit reached"));
                }
                *left -= 1;
            }
            let mut keys = self.keys.write().await;

            if keys.iter().any(|k| k.id() == api_key.id()) {
                return Err(DomainError::conflict(format!(
                    "API key with ID '{}' already exists",
                    api_key.id()
                )));
            }

            keys.push(api_key.clone());
            Ok(api_key)
        }

        async fn update(&self, api_key: &ApiKey) -> Result<ApiKey, DomainError> {
            self.check_fail_writes().await?;
            let mut keys = self.keys.write().await;

            match keys.iter_mut().find(|k| k.id() == api_key.id()) {
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
            self.check_fail_writes().await?;
            let mut keys = self.keys.write().await;
            let before = keys.len();
            keys.retain(|k| k.id() != id);
            Ok(keys.len() != before)
        }

        async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
            Ok(self.keys.read().await.clone())
        }

        async fn count(&self) -> Result<usize, DomainError> {
            Ok(self.keys.read().await.len())
        }
    }

    mod tests {
        use super::*;
        use crate::domain::api_key::ApiKeySecret;

        fn create_test_key(name: &str) -> ApiKey {
            let secret = ApiKeySecret::new(format!("tvly-{}", "c".repeat(64))).unwrap();
            ApiKey::new(ApiKeyId::generate(), name, secret)
        }

        #[tokio::test]
        async fn test_insert_and_exists() {
            let repo = MockApiKeyRepository::new();
            let key = create_test_key("prod");

            repo.insert(key.clone()).await.unwrap();

            assert!(repo.exists(key.id()).await.unwrap());
            assert!(!repo.exists(&ApiKeyId::generate()).await.unwrap());
        }

        #[tokio::test]
        async fn test_fail_writes() {
            let repo = MockApiKeyRepository::new();
            repo.set_fail_writes(true).await;

            let result = repo.insert(create_test_key("prod")).await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
            assert_eq!(repo.count().await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_fail_inserts_after() {
            let repo = MockApiKeyRepository::new();
            repo.fail_inserts_after(1).await;

            repo.insert(create_test_key("first")).await.unwrap();
            let result = repo.insert(create_test_key("second")).await;

            assert!(matches!(result, Err(DomainError::Storage { .. })));
            assert_eq!(repo.count().await.unwrap(), 1);
        }
    }
}
