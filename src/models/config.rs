//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::db::ConnectionOptions;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the shop host application.
pub struct AppConfig {
    /// Path of the SQLite store file, created when absent.
    pub database_url: String,
    #[serde(default = "default_enable_wal")]
    pub enable_wal: bool,
    /// Milliseconds to wait on a locked store; `0` disables the timeout.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_enable_wal() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    30_000
}

impl AppConfig {
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            enable_wal: self.enable_wal,
            enable_foreign_keys: true,
            busy_timeout: (self.busy_timeout_ms > 0)
                .then(|| Duration::from_millis(self.busy_timeout_ms)),
        }
    }
}
