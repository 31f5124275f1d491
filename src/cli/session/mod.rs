//! Session command - interactive API key console
//!
//! Reads one command per line, applies it through the session controller and
//! re-renders the key table after every change.

mod command;
mod table;

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::DomainError;
use crate::domain::api_key::{ApiKeyId, ApiKeyRepository};
use crate::infrastructure::logging;
use crate::infrastructure::session::{
    CopyOutcome, DeleteOutcome, SessionController, SharedLines, TerminalConfirmation,
};

pub use command::{HELP, KeyRef, SessionCommand, parse_command};
pub use table::render_table;

/// Run the interactive console on stdin/stdout
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let registry = crate::create_registry(&config.session).await?;
    let stdin = BufReader::new(tokio::io::stdin()).lines();
    let input: SharedLines<_> = Arc::new(Mutex::new(stdin));

    let controller = SessionController::new(
        registry,
        Arc::new(TerminalConfirmation::new(input.clone())),
        crate::create_clipboard(&config.clipboard),
    );

    info!("Key session started");

    let mut console = Console::new(controller, tokio::io::stdout());
    console.run(input).await?;

    info!("Key session ended");

    Ok(())
}

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Line-oriented front end over a session controller
pub struct Console<R, W>
where
    R: ApiKeyRepository,
{
    controller: SessionController<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: ApiKeyRepository,
    W: AsyncWrite + Unpin,
{
    pub fn new(controller: SessionController<R>, out: W) -> Self {
        Self { controller, out }
    }

    /// Consume the console, returning its output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read and execute commands until `quit` or end of input
    pub async fn run<I>(&mut self, input: SharedLines<I>) -> anyhow::Result<()>
    where
        I: AsyncBufRead + Unpin,
    {
        self.show_table().await?;

        loop {
            self.write("> ").await?;

            // Released before the command runs; delete prompts read from it too.
            let line = input.lock().await.next_line().await?;
            let Some(line) = line else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    self.writeln(&format!("error: {}", message)).await?;
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(e) => self.writeln(&format!("error: {}", e)).await?,
            }
        }

        Ok(())
    }

    async fn execute(&mut self, command: SessionCommand) -> anyhow::Result<Flow> {
        match command {
            SessionCommand::List { json: false } => self.show_table().await?,
            SessionCommand::List { json: true } => {
                let rows = self.controller.rows().await?;
                let json = serde_json::to_string_pretty(&rows)?;
                self.writeln(&json).await?;
            }
            SessionCommand::Create { name } => {
                let key = self.controller.create_key(&name).await?;
                self.writeln(&format!("Created API key '{}'", key.name()))
                    .await?;
                self.show_table().await?;
            }
            SessionCommand::Rename { key, name } => {
                let id = self.resolve(&key).await?;
                self.controller.rename_key(&id, &name).await?;
                self.show_table().await?;
            }
            SessionCommand::Reveal { key } => {
                let id = self.resolve(&key).await?;
                self.controller.toggle_visibility(&id).await?;
                self.show_table().await?;
            }
            SessionCommand::Copy { key } => {
                let id = self.resolve(&key).await?;
                let outcome = self.controller.copy_secret(&id).await?;
                let notice = match &outcome {
                    CopyOutcome::Copied => outcome.notice().to_string(),
                    CopyOutcome::Failed(reason) => format!("{} ({})", outcome.notice(), reason),
                };
                self.writeln(&notice).await?;
            }
            SessionCommand::Delete { key } => {
                let id = self.resolve(&key).await?;
                match self.controller.delete_key(&id).await? {
                    DeleteOutcome::Deleted => {
                        self.writeln("API key deleted").await?;
                        self.show_table().await?;
                    }
                    DeleteOutcome::Cancelled => self.writeln("Cancelled").await?,
                }
            }
            SessionCommand::Help => self.writeln(HELP).await?,
            SessionCommand::Quit => return Ok(Flow::Stop),
        }

        Ok(Flow::Continue)
    }

    async fn resolve(&self, key: &KeyRef) -> Result<ApiKeyId, DomainError> {
        let ids: Vec<ApiKeyId> = self
            .controller
            .rows()
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect();

        key.resolve(&ids)
            .ok_or_else(|| DomainError::not_found(format!("no API key at {}", key)))
    }

    async fn show_table(&mut self) -> anyhow::Result<()> {
        let rows = self.controller.rows().await?;
        let table = render_table(&rows);
        self.write(&table).await
    }

    async fn writeln(&mut self, text: &str) -> anyhow::Result<()> {
        self.write(&format!("{}\n", text)).await
    }

    async fn write(&mut self, text: &str) -> anyhow::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}
