//! One-shot key commands - generate a secret or mask one

use clap::Args;

use crate::domain::api_key::mask_secret;
use crate::infrastructure::api_key::ApiKeyGenerator;

/// Arguments for the mask command
#[derive(Args, Clone)]
pub struct MaskArgs {
    /// Secret to mask; anything that is not a canonical secret is echoed back
    pub secret: String,
}

/// Print a freshly generated secret
pub fn generate() -> anyhow::Result<()> {
    let secret = ApiKeyGenerator::system().generate()?;
    println!("{}", secret.expose());
    Ok(())
}

/// Print the masked form of a secret
pub fn mask(args: MaskArgs) -> anyhow::Result<()> {
    println!("{}", mask_secret(&args.secret));
    Ok(())
}
