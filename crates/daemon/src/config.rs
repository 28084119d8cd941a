use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Connection parameters for the download manager's RPC endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub tls: bool,
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginConfig {
    pub username: String,
    pub password: String,
}

/// Daemon configuration, loaded once at startup and never reloaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Feed addresses to poll each cycle. May be empty; the daemon then
    /// idles until the file gains entries and the process is restarted.
    pub feeds: Vec<String>,

    pub server: ServerConfig,

    #[serde(default)]
    pub login: Option<LoginConfig>,

    /// Seconds between sync cycles.
    pub update_interval: u64,

    /// Seconds allowed for a single payload download.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,

    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Days to keep ledger entries. Unset means keep them forever.
    #[serde(default)]
    pub retention_days: Option<i64>,
}

fn default_rpc_path() -> String {
    "/transmission/rpc".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

/// Returns the default data path based on build profile
fn default_data_path() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from("./data")
    }
    #[cfg(not(debug_assertions))]
    {
        PathBuf::from("/data")
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }
        if self.update_interval == 0 {
            return Err(ConfigError::Invalid(
                "update_interval must be at least 1 second".into(),
            ));
        }
        if self.fetch_timeout == 0 {
            return Err(ConfigError::Invalid(
                "fetch_timeout must be at least 1 second".into(),
            ));
        }
        if let Some(days) = self.retention_days {
            if days <= 0 {
                return Err(ConfigError::Invalid(
                    "retention_days must be positive when set".into(),
                ));
            }
        }
        Ok(())
    }

    /// Full URL of the download manager's RPC endpoint.
    pub fn rpc_url(&self) -> String {
        let scheme = if self.server.tls { "https" } else { "http" };
        // An explicitly empty rpc_path means unset; fall back to the
        // default rather than pointing at the server root.
        let path = match self.server.rpc_path.trim_start_matches('/') {
            "" => "transmission/rpc",
            p => p,
        };
        format!("{}://{}:{}/{}", scheme, self.server.host, self.server.port, path)
    }

    pub fn database_url(&self) -> String {
        format!(
            "sqlite:{}?mode=rwc",
            self.data_path.join("feedarr.db").display()
        )
    }
}
