//! Application configuration at ~/.config/eventease/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::error::{EventEaseError, EventEaseResult};

static DEFAULT_BASE_URL: &str = "http://localhost:3000";
static DEFAULT_SESSION_TTL: &str = "7days";
static DEFAULT_CREATE_DELAY: &str = "1s";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_session_ttl() -> String {
    DEFAULT_SESSION_TTL.to_string()
}

fn default_create_delay() -> String {
    DEFAULT_CREATE_DELAY.to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    /// Where the session storage file lives. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Site root used to build share links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How long a login stays valid (e.g. "7days", "12h")
    #[serde(default = "default_session_ttl")]
    pub session_ttl: String,

    /// Simulated backend latency when creating events
    #[serde(default = "default_create_delay")]
    pub create_delay: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: None,
            base_url: default_base_url(),
            session_ttl: default_session_ttl(),
            create_delay: default_create_delay(),
        }
    }
}

impl AppConfig {
    /// Load the config file (creating a commented default if missing),
    /// with `EVENTEASE_*` environment variables taking precedence.
    pub fn load() -> EventEaseResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EventEaseResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("EVENTEASE"))
            .build()
            .map_err(|e| EventEaseError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventEaseError::Config(e.to_string()))
    }

    pub fn config_path() -> EventEaseResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventEaseError::Config("Could not determine config directory".into()))?
            .join("eventease");

        Ok(config_dir.join("config.toml"))
    }

    /// Storage directory with `~` expanded.
    pub fn data_path(&self) -> EventEaseResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).into_owned(),
            )),
            None => dirs::data_dir()
                .map(|dir| dir.join("eventease"))
                .ok_or_else(|| EventEaseError::Config("Could not determine data directory".into())),
        }
    }

    pub fn session_ttl(&self) -> EventEaseResult<chrono::Duration> {
        let ttl = parse_duration("session_ttl", &self.session_ttl)?;
        chrono::Duration::from_std(ttl)
            .map_err(|_| EventEaseError::Config(format!("session_ttl too large: {}", self.session_ttl)))
    }

    pub fn create_delay(&self) -> EventEaseResult<Duration> {
        parse_duration("create_delay", &self.create_delay)
    }

    /// Public link to an event page.
    pub fn share_url(&self, event_id: &str) -> EventEaseResult<Url> {
        let mut base = Url::parse(&self.base_url)
            .map_err(|e| EventEaseError::Config(format!("Invalid base_url '{}': {}", self.base_url, e)))?;

        base.path_segments_mut()
            .map_err(|_| EventEaseError::Config(format!("base_url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["events", event_id]);

        Ok(base)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventEaseResult<()> {
        let contents = format!(
            "\
# eventease configuration

# Where the login session is stored (defaults to your platform data directory):
# data_dir = \"~/.local/share/eventease\"

# Site root used for share links:
# base_url = \"{}\"

# How long a login stays valid:
# session_ttl = \"{}\"

# Simulated delay when creating events:
# create_delay = \"{}\"
",
            DEFAULT_BASE_URL, DEFAULT_SESSION_TTL, DEFAULT_CREATE_DELAY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventEaseError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventEaseError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn parse_duration(key: &str, value: &str) -> EventEaseResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| EventEaseError::Config(format!("Invalid {} '{}': {}", key, value, e)))
}
