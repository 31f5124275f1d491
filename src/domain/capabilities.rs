//! Capabilities supplied by the environment
//!
//! Randomness, user confirmation and clipboard access are owned by whatever
//! hosts the session. None of them may change registry state on their own.

use async_trait::async_trait;

use super::DomainError;

#[cfg(test)]
use mockall::automock;

/// Source of uniformly random bytes
///
/// Production implementations must be backed by a CSPRNG.
pub trait RandomSource: Send + Sync + std::fmt::Debug {
    /// Fill the buffer with random bytes
    fn fill(&self, buf: &mut [u8]) -> Result<(), DomainError>;
}

/// Asks the user to confirm a destructive action
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Show the message and return whether the user agreed
    async fn confirm(&self, message: &str) -> Result<bool, DomainError>;
}

/// Places text on the system clipboard
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    /// Attempt to write the text, failing with `DomainError::Clipboard`
    async fn write_text(&self, text: &str) -> Result<(), DomainError>;
}
