//! Display forms of API keys
//!
//! The masked form keeps the prefix and the first and last four hex
//! characters of the body, replacing the middle with a fixed run of `*`.
//! Nothing here is stored; every view is derived from the entity on demand.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::entity::{ApiKey, ApiKeyId};
use super::secret::{SECRET_BODY_LEN, SECRET_PREFIX, SECRET_SEPARATOR};

/// Character used to hide the middle of a secret
pub const MASK_CHAR: char = '*';

/// Number of mask characters in the masked form
pub const MASK_LEN: usize = 24;

/// Body characters left visible on each side of the mask
const VISIBLE_LEN: usize = 4;

static CANONICAL_SECRET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({}{}[0-9a-f]{{{visible}}})[0-9a-f]{{{hidden}}}([0-9a-f]{{{visible}}})$",
        regex::escape(SECRET_PREFIX),
        regex::escape(&SECRET_SEPARATOR.to_string()),
        visible = VISIBLE_LEN,
        hidden = SECRET_BODY_LEN - 2 * VISIBLE_LEN,
    ))
    .unwrap()
});

/// Mask a secret for display
///
/// Input that is not a canonical secret is returned unchanged.
pub fn mask_secret(secret: &str) -> String {
    match CANONICAL_SECRET.captures(secret) {
        Some(caps) => {
            let mut masked = String::with_capacity(secret.len());
            masked.push_str(&caps[1]);
            masked.extend(std::iter::repeat_n(MASK_CHAR, MASK_LEN));
            masked.push_str(&caps[2]);
            masked
        }
        None => secret.to_string(),
    }
}

/// The secret as the UI should show it given the key's visibility flag
pub fn display_secret(key: &ApiKey) -> String {
    if key.is_revealed() {
        key.secret().expose().to_string()
    } else {
        mask_secret(key.secret().expose())
    }
}

/// A row of the key table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyView {
    pub id: ApiKeyId,
    pub name: String,
    pub usage: u64,
    pub key: String,
    pub revealed: bool,
}

impl From<&ApiKey> for ApiKeyView {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: *key.id(),
            name: key.name().to_string(),
            usage: key.usage_count(),
            key: display_secret(key),
            revealed: key.is_revealed(),
        }
    }
}
