//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//!
//! Completion settings come from `ai_core` since the adapter consumes them
//! directly.

mod database;
mod server;

use ai_core::CompletionConfig;
use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Completion backend configuration
    #[serde(default)]
    pub completion: CompletionConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Precedence, lowest to highest: built-in defaults, a `config` file in
    /// the working directory, then `MAILSMITH_*` environment variables
    /// (e.g. `MAILSMITH_SERVER_PORT`). When no completion API key was
    /// configured, `OPENAI_API_KEY` is consulted as a last resort.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("completion.base_url", "https://api.openai.com/v1")?
            .set_default("completion.model", "gpt-3.5-turbo")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("MAILSMITH")
                    .separator("_")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        if config.completion.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                config.completion.api_key = key;
            }
        }

        Ok(config)
    }
}
