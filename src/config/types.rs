//! Configuration values.

use std::net::SocketAddr;

/// Where Things are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process memory; contents are lost on exit.
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub bind_addr: SocketAddr,
    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,
}

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/things";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// `DATABASE_URL` value selecting the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory:";

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            storage: StorageConfig::Postgres {
                database_url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl AppConfig {
    /// In-memory storage with defaults otherwise. Used by tests.
    pub fn in_memory() -> Self {
        AppConfig {
            storage: StorageConfig::Memory,
            ..Default::default()
        }
    }
}
