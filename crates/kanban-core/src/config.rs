//! Configuration loaded from `kanban.toml`.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup. Command-line flags override what is read here.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{KanbanError, KanbanResult};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "kanban.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub board: BoardConfig,
}

/// Where the web server listens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

/// Defaults for newly created board items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// New columns are titled `"{column_prefix} N"`.
    pub column_prefix: String,
    /// New tasks get the content `"{task_prefix} N"`.
    pub task_prefix: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            column_prefix: "Column".to_string(),
            task_prefix: "Task".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn column_title(&self, n: usize) -> String {
        format!("{} {}", self.column_prefix, n)
    }

    pub fn task_content(&self, n: usize) -> String {
        format!("{} {}", self.task_prefix, n)
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> KanbanResult<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> KanbanResult<Self> {
        debug!(path = %path.display(), "Loading configuration");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load from `path` if given, else from `kanban.toml` if it exists, else defaults.
    ///
    /// An explicitly given path must exist.
    pub fn load_or_default(path: Option<&Path>) -> KanbanResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    debug!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> KanbanResult<String> {
        toml::to_string_pretty(self).map_err(|e| KanbanError::config(e.to_string()))
    }

    fn validate(&self) -> KanbanResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(KanbanError::config("server.host must not be empty"));
        }
        Ok(())
    }
}
