//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::core::error::{ReminderError, Result};

/// Bot configuration loaded from environment variables (and `.env` via dotenvy)
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Guild for instant command registration during development
    pub discord_guild_id: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ReminderError::Config("DISCORD_TOKEN must be set".to_string()))?;

        let discord_guild_id = lookup("DISCORD_GUILD_ID").filter(|id| !id.trim().is_empty());
        if let Some(id) = &discord_guild_id {
            if id.trim().parse::<u64>().is_err() {
                return Err(ReminderError::Config(format!(
                    "DISCORD_GUILD_ID must be a numeric id, got '{id}'"
                )));
            }
        }

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Config {
            discord_token,
            discord_guild_id,
            log_level,
        })
    }

    /// Development guild as a numeric id
    pub fn guild_id(&self) -> Option<u64> {
        self.discord_guild_id
            .as_deref()
            .and_then(|id| id.trim().parse().ok())
    }
}
