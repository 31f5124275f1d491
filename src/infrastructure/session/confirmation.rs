//! Confirmation prompts

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncWriteExt, Lines};
use tokio::sync::Mutex;

use crate::domain::{ConfirmationPrompt, DomainError};

/// Line input shared between the session loop and its prompts
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

/// Asks on the terminal and reads the answer from the session's input
///
/// Only `y` or `yes` (any case) confirm. End of input counts as "no".
#[derive(Debug)]
pub struct TerminalConfirmation<R> {
    input: SharedLines<R>,
}

impl<R> TerminalConfirmation<R> {
    pub fn new(input: SharedLines<R>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl<R> ConfirmationPrompt for TerminalConfirmation<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&self, message: &str) -> Result<bool, DomainError> {
        let question = format!("{} [y/N] ", message);
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(question.as_bytes())
            .await
            .map_err(|e| DomainError::confirmation(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| DomainError::confirmation(e.to_string()))?;

        let answer = self
            .input
            .lock()
            .await
            .next_line()
            .await
            .map_err(|e| DomainError::confirmation(e.to_string()))?;

        Ok(answer.as_deref().is_some_and(is_affirmative))
    }
}

/// Prompt with a fixed answer, for non-interactive use
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl ConfirmationPrompt for AutoConfirm {
    async fn confirm(&self, _message: &str) -> Result<bool, DomainError> {
        Ok(self.0)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncBufReadExt;

    fn shared(input: &'static str) -> SharedLines<&'static [u8]> {
        Arc::new(Mutex::new(input.as_bytes().lines()))
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }

    #[tokio::test]
    async fn test_terminal_confirmation_reads_one_line() {
        let input = shared("yes\nno\n");
        let prompt = TerminalConfirmation::new(input.clone());

        assert!(prompt.confirm("Delete?").await.unwrap());
        assert!(!prompt.confirm("Delete?").await.unwrap());
    }

    #[tokio::test]
    async fn test_terminal_confirmation_eof_is_no() {
        let prompt = TerminalConfirmation::new(shared(""));
        assert!(!prompt.confirm("Delete?").await.unwrap());
    }

    #[tokio::test]
    async fn test_auto_confirm() {
        assert!(AutoConfirm(true).confirm("x").await.unwrap());
        assert!(!AutoConfirm(false).confirm("x").await.unwrap());
    }
}
