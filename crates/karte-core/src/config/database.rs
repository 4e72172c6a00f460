//! Connection pool settings for the link store's Postgres backend.

use serde::{Deserialize, Serialize};

/// Pool sizing and timeout settings. Only `url` is required; the rest
/// default to values sized for a single clinic deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL. Treated as a secret: logged only with
    /// the password masked.
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_pool_max")]
    pub max_connections: u32,
    /// Connections kept warm when idle.
    #[serde(default = "default_pool_min")]
    pub min_connections: u32,
    /// Seconds to wait for a connection before giving up.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Seconds an idle connection survives before being dropped.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

fn default_pool_max() -> u32 {
    20
}

fn default_pool_min() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
