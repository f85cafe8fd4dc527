//! Storage configuration.

use config::ConfigError;
use serde::Deserialize;
use url::Url;

/// Storage backend type.
///
/// Deserialized through `From<String>` so that any unrecognized selector
/// value (or none at all) selects the in-memory backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum StorageBackend {
    /// `MongoDB` document store.
    MongoDb,
    /// `PostgreSQL` relational store.
    Postgres,
    /// In-memory list (development/testing, lost on restart).
    #[default]
    Memory,
}

impl From<String> for StorageBackend {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Self::MongoDb,
            "postgres" | "postgresql" => Self::Postgres,
            _ => Self::Memory,
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MongoDb => write!(f, "mongodb"),
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type.
    #[serde(default)]
    pub backend: StorageBackend,

    /// `MongoDB` storage configuration.
    #[serde(default)]
    pub mongodb: MongoStorageConfig,

    /// `PostgreSQL` storage configuration.
    #[serde(default)]
    pub postgres: PostgresStorageConfig,
}

impl StorageConfig {
    /// Validate the storage configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required connection parameters are missing or
    /// malformed for the selected backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.backend {
            StorageBackend::Memory => Ok(()),
            StorageBackend::MongoDb => {
                if self.mongodb.uri.is_empty() {
                    return Err(ConfigError::Message(
                        "storage.mongodb.uri cannot be empty".to_string(),
                    ));
                }
                let url = Url::parse(&self.mongodb.uri).map_err(|e| {
                    ConfigError::Message(format!("storage.mongodb.uri is not a valid URI: {e}"))
                })?;
                if url.scheme() != "mongodb" && url.scheme() != "mongodb+srv" {
                    return Err(ConfigError::Message(format!(
                        "storage.mongodb.uri has unsupported scheme '{}'",
                        url.scheme()
                    )));
                }
                Ok(())
            }
            StorageBackend::Postgres => {
                if self.postgres.url.is_empty() {
                    return Err(ConfigError::Message(
                        "storage.postgres.url cannot be empty".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// `MongoDB` storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoStorageConfig {
    /// `MongoDB` connection URI.
    #[serde(default = "default_mongo_uri")]
    pub uri: String,

    /// Database name; overrides the default database of the URI.
    #[serde(default)]
    pub database: Option<String>,
}

fn default_mongo_uri() -> String {
    "mongodb://localhost/book-shelf".to_string()
}

impl Default for MongoStorageConfig {
    fn default() -> Self {
        Self {
            uri: default_mongo_uri(),
            database: None,
        }
    }
}

/// `PostgreSQL` storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresStorageConfig {
    /// `PostgreSQL` connection URL (carries user and password).
    #[serde(default)]
    pub url: String,

    /// Connection pool minimum size.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection pool maximum size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

const fn default_min_connections() -> u32 {
    1
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_connect_timeout() -> u64 {
    5
}

impl Default for PostgresStorageConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 1,
            max_connections: 10,
            connect_timeout: 5,
        }
    }
}
