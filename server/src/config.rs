//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present.
//! Unset variables fall back to defaults; malformed ones are an error.

use std::fmt;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost/todo-list";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    /// Base level for the log filter; `RUST_LOG` directives refine it.
    pub log_level: String,
}

/// Which `TodoStore` backs the service.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Mongo {
        uri: String,
        /// Overrides the database named in `uri`.
        database: Option<String>,
    },
    Memory,
}

// The connection string may carry credentials.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreConfig::Mongo { database, .. } => f
                .debug_struct("Mongo")
                .field("uri", &"[REDACTED]")
                .field("database", database)
                .finish(),
            StoreConfig::Memory => f.write_str("Memory"),
        }
    }
}

impl StoreConfig {
    pub fn description(&self) -> &'static str {
        match self {
            StoreConfig::Mongo { .. } => "MongoDB",
            StoreConfig::Memory => "in-memory",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store: StoreConfig::Mongo {
                uri: DEFAULT_MONGODB_URI.to_string(),
                database: None,
            },
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if any), then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        let store = lookup("TODO_STORE").unwrap_or_else(|| "mongodb".to_string());
        config.store = match store.to_lowercase().as_str() {
            "mongodb" | "mongo" => StoreConfig::Mongo {
                uri: lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
                database: lookup("MONGODB_DATABASE"),
            },
            "memory" => StoreConfig::Memory,
            _ => return Err(ConfigError::UnknownStore(store)),
        };

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
