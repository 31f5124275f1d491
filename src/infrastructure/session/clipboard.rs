//! Clipboard writers

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::domain::{ClipboardWriter, DomainError};

/// Clipboard backed by an external program that reads the text on stdin
/// (`pbcopy`, `wl-copy`, `xclip -selection clipboard`, ...)
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl ClipboardWriter for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), DomainError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::clipboard(format!("failed to run {}: {}", self.program, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DomainError::clipboard("clipboard command has no stdin"))?;

        let written = stdin.write_all(text.as_bytes()).await;
        drop(stdin);

        if let Err(e) = written {
            let _ = child.start_kill();
            let _ = child.wait().await;
            return Err(DomainError::clipboard(format!(
                "failed to write to {}: {}",
                self.program, e
            )));
        }

        let status = child
            .wait()
            .await
            .map_err(|e| DomainError::clipboard(e.to_string()))?;

        if !status.success() {
            return Err(DomainError::clipboard(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }
}

/// Clipboard that keeps the last copied text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text written, if any
    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }
}

#[async_trait]
impl ClipboardWriter for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), DomainError> {
        *self.contents.lock().await = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard for environments without clipboard access
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableClipboard;

#[async_trait]
impl ClipboardWriter for UnavailableClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), DomainError> {
        Err(DomainError::clipboard("no clipboard command configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_clipboard_keeps_last_value() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.contents().await.is_none());

        clipboard.write_text("first").await.unwrap();
        clipboard.write_text("second").await.unwrap();

        assert_eq!(clipboard.contents().await.as_deref(), Some("second"));
    }

    #[test]
    fn test_unavailable_clipboard_fails() {
        let result = tokio_test::block_on(UnavailableClipboard.write_text("secret"));
        assert!(matches!(result, Err(DomainError::Clipboard { .. })));
    }

    #[tokio::test]
    async fn test_command_clipboard_missing_program() {
        let clipboard = CommandClipboard::new("definitely-not-a-clipboard-binary", vec![]);
        let result = clipboard.write_text("secret").await;

        assert!(matches!(result, Err(DomainError::Clipboard { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_clipboard_reports_exit_status() {
        let ok = CommandClipboard::new("sh", vec!["-c".into(), "cat > /dev/null".into()]);
        assert!(ok.write_text("secret").await.is_ok());

        let failing = CommandClipboard::new(
            "sh",
            vec!["-c".into(), "cat > /dev/null; exit 3".into()],
        );
        let result = failing.write_text("secret").await;
        assert!(matches!(result, Err(DomainError::Clipboard { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_clipboard_program_exits_without_reading() {
        let clipboard = CommandClipboard::new("sh", vec!["-c".into(), "exit 0".into()]);
        let text = "x".repeat(1 << 20);

        let result = clipboard.write_text(&text).await;
        assert!(matches!(result, Err(DomainError::Clipboard { .. })));
    }
}
