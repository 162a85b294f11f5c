//! Settings resolution for the intake services
//!
//! Every setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default, where one exists
//!
//! The sentiment service host has no default: the service refuses to start
//! without one, as does a database folder that cannot be created.

use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the sentiment analysis host
pub const SENTIMENT_HOST_ENV: &str = "INTAKE_SENTIMENT_HOST";
/// Environment variable naming the data folder
pub const DATA_FOLDER_ENV: &str = "INTAKE_DATA_FOLDER";
/// Environment variable naming the listen address
pub const LISTEN_ADDR_ENV: &str = "INTAKE_LISTEN";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DATABASE_FILE_NAME: &str = "intake.db";

/// Contents of the optional TOML config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    data_folder: Option<String>,
    listen: Option<String>,
    sentiment: Option<SentimentSection>,
}

#[derive(Debug, Default, Deserialize)]
struct SentimentSection {
    host: Option<String>,
}

/// Resolved service settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the intake database
    pub data_folder: PathBuf,
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// Base URL of the sentiment analysis service (e.g. `http://localhost:9000`)
    pub sentiment_host: String,
}

impl Settings {
    /// Resolve settings from CLI arguments, environment, config file, and defaults
    pub fn resolve(
        cli_data_folder: Option<&str>,
        cli_listen: Option<&str>,
        cli_sentiment_host: Option<&str>,
    ) -> Result<Self> {
        let file = load_config_file().unwrap_or_default();

        let data_folder = cli_data_folder
            .map(PathBuf::from)
            .or_else(|| std::env::var(DATA_FOLDER_ENV).ok().map(PathBuf::from))
            .or_else(|| file.data_folder.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_data_folder);

        let listen = cli_listen
            .map(str::to_string)
            .or_else(|| std::env::var(LISTEN_ADDR_ENV).ok())
            .or_else(|| file.listen.clone())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen
            .parse()
            .map_err(|_| Error::Config(format!("Invalid listen address: {}", listen)))?;

        let sentiment_host = cli_sentiment_host
            .map(str::to_string)
            .or_else(|| std::env::var(SENTIMENT_HOST_ENV).ok())
            .or_else(|| file.sentiment.and_then(|s| s.host))
            .ok_or_else(|| {
                Error::Config(format!(
                    "Sentiment service host not configured (set {} or pass --sentiment-host)",
                    SENTIMENT_HOST_ENV
                ))
            })?;

        Ok(Self {
            data_folder,
            listen_addr,
            sentiment_host,
        })
    }

    /// Path of the intake database inside the data folder
    pub fn database_path(&self) -> PathBuf {
        self.data_folder.join(DATABASE_FILE_NAME)
    }
}

/// Load the config file if one exists and parses; anything else means "no file"
fn load_config_file() -> Option<ConfigFile> {
    let path = config_file_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unparseable config file");
            None
        }
    }
}

/// User config dir first (~/.config/intake/config.toml), then /etc/intake/config.toml
fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("intake").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }
    let system = PathBuf::from("/etc/intake/config.toml");
    if system.exists() {
        return Some(system);
    }
    None
}

/// OS-dependent default data folder (e.g. ~/.local/share/intake on Linux)
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("intake"))
        .unwrap_or_else(|| PathBuf::from("./intake_data"))
}
