//! Infrastructure layer - Capability and storage implementations

pub mod api_key;
pub mod logging;
pub mod session;
