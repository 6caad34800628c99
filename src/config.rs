use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageBackend,
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
}

/// Where players and matches are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => anyhow::bail!("Unknown storage backend '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let storage: StorageBackend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse()
            .context("STORAGE_BACKEND must be 'postgres' or 'memory'")?;

        let database = match storage {
            StorageBackend::Postgres => Some(DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .context("DATABASE_URL must be set when STORAGE_BACKEND is postgres")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            }),
            StorageBackend::Memory => None,
        };

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        Ok(Config {
            storage,
            database,
            server,
        })
    }

    /// In-memory configuration used by tests
    #[cfg(test)]
    pub fn in_memory(host: impl Into<String>, port: u16) -> Self {
        Config {
            storage: StorageBackend::Memory,
            database: None,
            server: ServerConfig {
                host: host.into(),
                port,
            },
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!(
            "postgres".parse::<StorageBackend>().unwrap(),
            StorageBackend::Postgres
        );
        assert_eq!(
            " Memory ".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
        assert!("dynamo".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_server_addr() {
        let config = Config::in_memory("127.0.0.1", 8080);
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
        assert!(config.database.is_none());
    }
}
