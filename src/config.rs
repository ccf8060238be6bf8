use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::synctube::DEFAULT_BASE_URL;

pub const DEFAULT_ROOM_NAME: &str = "Synkoboto";
pub const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("unable to load env file: {0}")]
    EnvFile(String),
}

/// Loads variables from an env file into the process environment.
/// Returns `false` when the file does not exist.
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ConfigError::EnvFile(e.to_string())),
    }
}

/// Bot settings, read from the environment
#[derive(Clone)]
pub struct BotConfig {
    pub server_id: String,
    pub app_id: String,
    pub bot_token: String,
    /// Hex-encoded Ed25519 key used to check interaction signatures
    pub public_key: String,
    pub room_name: String,
    pub synctube_url: String,
    pub discord_api_url: String,
    pub bind_addr: SocketAddr,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let bind_addr: SocketAddr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        Ok(Self {
            server_id: required("SERVER_ID")?,
            app_id: required("APP_ID")?,
            bot_token: required("BOT_TOKEN")?,
            public_key: required("PUBLIC_KEY")?,
            room_name: get("ROOM_NAME").unwrap_or_else(|| DEFAULT_ROOM_NAME.to_string()),
            synctube_url: get("SYNCTUBE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            discord_api_url: get("DISCORD_API_URL")
                .unwrap_or_else(|| DEFAULT_DISCORD_API_URL.to_string()),
            bind_addr,
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("server_id", &self.server_id)
            .field("app_id", &self.app_id)
            .field("bot_token", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("room_name", &self.room_name)
            .field("synctube_url", &self.synctube_url)
            .field("discord_api_url", &self.discord_api_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}
