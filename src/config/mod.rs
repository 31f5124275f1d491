mod app_config;

pub use app_config::{AppConfig, ClipboardConfig, LogFormat, LoggingConfig, SessionConfig};
