// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./proofex.toml` > `~/.config/proofex/proofex.toml` > `/etc/proofex/proofex.toml`
//! with environment variable overrides via `PROOFEX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ProofexConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/proofex/proofex.toml` (system-wide)
/// 3. `~/.config/proofex/proofex.toml` (user XDG config)
/// 4. `./proofex.toml` (local directory)
/// 5. `PROOFEX_*` environment variables
pub fn load_config() -> Result<ProofexConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ProofexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ProofexConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ProofexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ProofexConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ProofexConfig::default()))
        .merge(Toml::file("/etc/proofex/proofex.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("proofex/proofex.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("proofex.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PROOFEX_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("PROOFEX_").map(|key| {
        // figment hands over the key as written in the environment, upper-cased.
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = if let Some(rest) = key_str.strip_prefix("log_") {
            format!("log.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("storage_") {
            format!("storage.{rest}")
        } else if let Some(rest) = key_str.strip_prefix("exchange_") {
            format!("exchange.{rest}")
        } else {
            key_str
        };
        mapped.into()
    })
}
