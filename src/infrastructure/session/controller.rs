//! Session controller
//!
//! Maps user intents onto the key registry. Deletion waits for the user's
//! confirmation; copying goes through the clipboard and reports its outcome
//! without ever touching the registry.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyView};
use crate::domain::{ClipboardWriter, ConfirmationPrompt, DomainError};
use crate::infrastructure::api_key::ApiKeyRegistry;

/// Message shown before a key is deleted
pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this API key? This action cannot be undone.";

/// Result of a delete intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Result of a copy intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed(String),
}

impl CopyOutcome {
    /// Transient notice for the UI
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Copied => "Copied!",
            Self::Failed(_) => "Failed to copy",
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied)
    }
}

/// Orchestrates user intents for one session
pub struct SessionController<R>
where
    R: ApiKeyRepository,
{
    registry: Arc<ApiKeyRegistry<R>>,
    confirmation: Arc<dyn ConfirmationPrompt>,
    clipboard: Arc<dyn ClipboardWriter>,
}

impl<R: ApiKeyRepository> SessionController<R> {
    pub fn new(
        registry: Arc<ApiKeyRegistry<R>>,
        confirmation: Arc<dyn ConfirmationPrompt>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Self {
        Self {
            registry,
            confirmation,
            clipboard,
        }
    }

    /// Rows for the key table
    pub async fn rows(&self) -> Result<Vec<ApiKeyView>, DomainError> {
        let keys = self.registry.list().await?;
        Ok(keys.iter().map(ApiKeyView::from).collect())
    }

    /// Submit the create form
    pub async fn create_key(&self, name: &str) -> Result<ApiKey, DomainError> {
        self.registry.create(name).await
    }

    /// Submit the edit form
    pub async fn rename_key(&self, id: &ApiKeyId, name: &str) -> Result<ApiKey, DomainError> {
        self.registry.rename(id, name).await
    }

    /// Show or hide a key's full secret
    pub async fn toggle_visibility(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        self.registry.toggle_reveal(id).await
    }

    /// Delete a key once the user confirms
    pub async fn delete_key(&self, id: &ApiKeyId) -> Result<DeleteOutcome, DomainError> {
        if self.registry.get(id).await?.is_none() {
            return Err(DomainError::not_found(format!("API key '{}' not found", id)));
        }

        if !self.confirmation.confirm(DELETE_CONFIRMATION).await? {
            info!("API key deletion cancelled: id={}", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.registry.delete(id).await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Copy a key's full secret to the clipboard
    ///
    /// Clipboard failures come back as `CopyOutcome::Failed`, not as errors.
    pub async fn copy_secret(&self, id: &ApiKeyId) -> Result<CopyOutcome, DomainError> {
        let key = self
            .registry
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))?;

        match self.clipboard.write_text(key.secret().expose()).await {
            Ok(()) => Ok(CopyOutcome::Copied),
            Err(e) => {
                warn!("Failed to copy API key: id={}, error={}", id, e);
                Ok(CopyOutcome::Failed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capabilities::mock::SequenceRandomSource;
    use crate::domain::capabilities::{MockClipboardWriter, MockConfirmationPrompt};
    use crate::infrastructure::api_key::{ApiKeyGenerator, InMemoryApiKeyRepository};
    use crate::infrastructure::session::{AutoConfirm, MemoryClipboard, UnavailableClipboard};

    fn create_registry() -> Arc<ApiKeyRegistry<InMemoryApiKeyRepository>> {
        Arc::new(
            ApiKeyRegistry::new(Arc::new(InMemoryApiKeyRepository::new()))
                .with_generator(ApiKeyGenerator::new(Arc::new(SequenceRandomSource::new()))),
        )
    }

    fn create_controller(
        confirmation: Arc<dyn ConfirmationPrompt>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> SessionController<InMemoryApiKeyRepository> {
        SessionController::new(create_registry(), confirmation, clipboard)
    }

    #[tokio::test]
    async fn test_delete_asks_for_confirmation() {
        let mut prompt = MockConfirmationPrompt::new();
        prompt
            .expect_confirm()
            .withf(|message| message.contains("cannot be undone"))
            .times(1)
            .returning(|_| Ok(true));

        let controller = create_controller(Arc::new(prompt), Arc::new(UnavailableClipboard));
        let key = controller.create_key("prod").await.unwrap();

        let outcome = controller.delete_key(key.id()).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(controller.rows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_cancelled_keeps_key() {
        let controller =
            create_controller(Arc::new(AutoConfirm(false)), Arc::new(UnavailableClipboard));
        let key = controller.create_key("prod").await.unwrap();

        let outcome = controller.delete_key(key.id()).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(controller.rows().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_prompt_failure_keeps_key() {
        let mut prompt = MockConfirmationPrompt::new();
        prompt
            .expect_confirm()
            .returning(|_| Err(DomainError::confirmation("stdin closed")));

        let controller = create_controller(Arc::new(prompt), Arc::new(UnavailableClipboard));
        let key = controller.create_key("prod").await.unwrap();

        let result = controller.delete_key(key.id()).await;

        assert!(matches!(result, Err(DomainError::Confirmation { .. })));
        assert_eq!(controller.rows().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_key_skips_prompt() {
        let mut prompt = MockConfirmationPrompt::new();
        prompt.expect_confirm().times(0);

        let controller = create_controller(Arc::new(prompt), Arc::new(UnavailableClipboard));

        let result = controller.delete_key(&ApiKeyId::generate()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_copy_writes_full_secret() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let controller = create_controller(Arc::new(AutoConfirm(true)), clipboard.clone());
        let key = controller.create_key("prod").await.unwrap();

        let outcome = controller.copy_secret(key.id()).await.unwrap();

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(outcome.notice(), "Copied!");
        assert_eq!(
            clipboard.contents().await.as_deref(),
            Some(key.secret().expose())
        );
    }

    #[tokio::test]
    async fn test_copy_failure_is_a_notice() {
        let mut clipboard = MockClipboardWriter::new();
        clipboard
            .expect_write_text()
            .times(1)
            .returning(|_| Err(DomainError::clipboard("permission denied")));

        let controller = create_controller(Arc::new(AutoConfirm(true)), Arc::new(clipboard));
        let key = controller.create_key("prod").await.unwrap();
        let before = controller.rows().await.unwrap();

        let outcome = controller.copy_secret(key.id()).await.unwrap();

        assert!(!outcome.is_copied());
        assert_eq!(outcome.notice(), "Failed to copy");
        assert_eq!(controller.rows().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_copy_unknown_key() {
        let controller =
            create_controller(Arc::new(AutoConfirm(true)), Arc::new(MemoryClipboard::new()));

        let result = controller.copy_secret(&ApiKeyId::generate()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_rows_follow_visibility() {
        let controller =
            create_controller(Arc::new(AutoConfirm(true)), Arc::new(UnavailableClipboard));
        let key = controller.create_key("prod").await.unwrap();
        let secret = key.secret().expose().to_string();

        let rows = controller.rows().await.unwrap();
        assert_ne!(rows[0].key, secret);
        assert!(rows[0].key.contains("************************"));

        controller.toggle_visibility(key.id()).await.unwrap();
        let rows = controller.rows().await.unwrap();
        assert_eq!(rows[0].key, secret);
        assert!(rows[0].revealed);
    }

    #[tokio::test]
    async fn test_rename_key() {
        let controller =
            create_controller(Arc::new(AutoConfirm(true)), Arc::new(UnavailableClipboard));
        let key = controller.create_key("prod").await.unwrap();

        let renamed = controller.rename_key(key.id(), "production").await.unwrap();

        assert_eq!(renamed.name(), "production");
        assert_eq!(controller.rows().await.unwrap()[0].name, "production");
    }
}
