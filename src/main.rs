use apisvc_keys::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Session) {
        Command::Session => cli::session::run().await,
        Command::Generate => cli::keys::generate(),
        Command::Mask(args) => cli::keys::mask(args),
    }
}
