//! Session infrastructure
//!
//! The controller that turns user intents into registry calls, plus the
//! clipboard and confirmation capabilities a terminal session provides.

mod clipboard;
mod confirmation;
mod controller;

pub use clipboard::{CommandClipboard, MemoryClipboard, UnavailableClipboard};
pub use confirmation::{AutoConfirm, SharedLines, TerminalConfirmation};
pub use controller::{CopyOutcome, DELETE_CONFIRMATION, DeleteOutcome, SessionController};
