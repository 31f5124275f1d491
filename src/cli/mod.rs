//! CLI module for the API key console
//!
//! Provides subcommands:
//! - `session`: interactive key console (default)
//! - `generate`: print a new secret
//! - `mask`: print the display form of a secret

pub mod keys;
pub mod session;

use clap::{Parser, Subcommand};

/// apisvc-keys - create, mask, reveal, copy and revoke API keys
#[derive(Parser)]
#[command(name = "apisvc-keys")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the interactive key console (default mode)
    Session,

    /// Generate a new secret and print it
    Generate,

    /// Print the masked form of a secret
    Mask(keys::MaskArgs),
}
