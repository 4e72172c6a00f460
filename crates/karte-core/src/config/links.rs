//! Report link issuance and sweep configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the report capability-link subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Default validity window, in hours, applied when issuance does not
    /// specify one.
    #[serde(default = "default_ttl_hours")]
    pub default_ttl_hours: i64,
    /// When `true`, a link is invalidated by its first successful
    /// validation. Defaults to `false` (multi-use until expiry).
    #[serde(default)]
    pub single_use: bool,
    /// Base URL prepended to `/r/{token}` when handing a link back to staff.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Cron expression for the expired-link sweep.
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            default_ttl_hours: default_ttl_hours(),
            single_use: false,
            public_base_url: default_public_base_url(),
            sweep_schedule: default_sweep_schedule(),
        }
    }
}

fn default_ttl_hours() -> i64 {
    48
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_sweep_schedule() -> String {
    // Top of every hour.
    "0 0 * * * *".to_string()
}
