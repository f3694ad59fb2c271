//! Server configuration
//!
//! Defaults, overridden by `TASKLIST_*` environment variables. The listening
//! port comes from the conventional unprefixed `PORT`.

use anyhow::{Context, Result};
use ::config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;

const ENV_PREFIX: &str = "TASKLIST";

/// Which table implementation backs the task store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Dynamodb,
    Sqlite,
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Dynamodb => write!(f, "dynamodb"),
            StoreBackend::Sqlite => write!(f, "sqlite"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    /// DynamoDB table name
    pub table_name: String,
    /// SQLite file, only used by the sqlite backend
    pub database_path: String,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let port = vars.get("PORT").cloned();

        let config = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("store", "dynamodb")?
            .set_default("table_name", "Tasks")?
            .set_default("database_path", "data/tasks.db")?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .source(Some(vars)),
            )
            .set_override_option("port", port)?
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}
