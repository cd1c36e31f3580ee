// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for proofex.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level proofex configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProofexConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Exchange record handling settings.
    #[serde(default)]
    pub exchange: ExchangeConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// How long a statement waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("proofex").join("proofex.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("proofex.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

/// Exchange record handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExchangeConfig {
    /// Default `auto_present` policy for records created by protocol handlers.
    #[serde(default)]
    pub auto_present: bool,

    /// Publish a `present_proof` webhook whenever a saved record changes state.
    #[serde(default = "default_emit_webhooks")]
    pub emit_webhooks: bool,

    /// Capacity of the in-process webhook broadcast channel.
    #[serde(default = "default_webhook_buffer")]
    pub webhook_buffer: usize,

    /// Attempts for a read-modify-write before a conflict is surfaced.
    #[serde(default = "default_max_update_retries")]
    pub max_update_retries: u32,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            auto_present: false,
            emit_webhooks: default_emit_webhooks(),
            webhook_buffer: default_webhook_buffer(),
            max_update_retries: default_max_update_retries(),
        }
    }
}

fn default_emit_webhooks() -> bool {
    true
}

fn default_webhook_buffer() -> usize {
    64
}

fn default_max_update_retries() -> u32 {
    3
}
