//! Server settings loaded via OrthoConfig.
//!
//! Every value may come from the command line, a config file or a
//! `BLOGLIST_`-prefixed environment variable.

use std::net::SocketAddr;
use std::num::NonZeroU32;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3003";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Raised when a configured value is present but unusable.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address {value:?}: {source}")]
pub struct InvalidBindAddr {
    value: String,
    #[source]
    source: std::net::AddrParseError,
}

/// Raised when the pool size would leave the server without connections.
#[derive(Debug, thiserror::Error)]
#[error("db_max_connections must be at least 1")]
pub struct InvalidDbMaxConnections;

/// Settings controlling where the server listens and which store it uses.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOGLIST")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to port 3003.
    pub fn bind_addr(&self) -> Result<SocketAddr, InvalidBindAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| InvalidBindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// The database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to 10 and rejecting zero.
    pub fn db_max_connections(&self) -> Result<NonZeroU32, InvalidDbMaxConnections> {
        NonZeroU32::new(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
            .ok_or(InvalidDbMaxConnections)
    }
}
