// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations. Each returns the text to print on stdout.

use std::sync::Arc;

use clap::Args;
use proofex_config::ProofexConfig;
use proofex_core::{
    ExchangeState, Initiator, ProofexError, RecordStorage, Role, TagFilter, Verified,
};
use proofex_exchange::{ExchangeRepository, FIELDS, schema};
use proofex_storage::SqliteStorage;
use serde_json::Value;
use tracing::debug;

/// Tag filters for `proofex list`. All given filters must match.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub state: Option<ExchangeState>,
    #[arg(long)]
    pub role: Option<Role>,
    #[arg(long)]
    pub initiator: Option<Initiator>,
    #[arg(long)]
    pub verified: Option<Verified>,
    #[arg(long)]
    pub connection_id: Option<String>,
    #[arg(long)]
    pub thread_id: Option<String>,
}

impl ListArgs {
    pub fn filter(&self) -> TagFilter {
        let mut filter = TagFilter::new();
        if let Some(state) = self.state {
            filter = filter.eq("state", state.as_str());
        }
        if let Some(role) = self.role {
            filter = filter.eq("role", role.as_str());
        }
        if let Some(initiator) = self.initiator {
            filter = filter.eq("initiator", initiator.as_str());
        }
        if let Some(verified) = self.verified {
            filter = filter.eq("verified", verified.as_str());
        }
        if let Some(connection_id) = &self.connection_id {
            filter = filter.eq("connection_id", connection_id.as_str());
        }
        if let Some(thread_id) = &self.thread_id {
            filter = filter.eq("thread_id", thread_id.as_str());
        }
        filter
    }
}

async fn open_storage(config: &ProofexConfig) -> Result<Arc<SqliteStorage>, ProofexError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    Ok(storage)
}

fn to_json(value: &Value) -> Result<String, ProofexError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ProofexError::Internal(format!("failed to render JSON: {e}")))
}

/// `proofex list`: every matching record, serialized, oldest first.
pub async fn run_list(config: &ProofexConfig, args: &ListArgs) -> Result<String, ProofexError> {
    let storage = open_storage(config).await?;
    let repo = ExchangeRepository::from_config(storage.clone(), None, &config.exchange);
    let filter = args.filter();
    debug!(tags = filter.len(), "listing exchange records");

    let records = repo.query(&filter).await;
    storage.close().await?;
    let listed: Vec<Value> = records?
        .iter()
        .map(|r| Value::Object(schema::serialize(r)))
        .collect();
    to_json(&Value::Array(listed))
}

/// `proofex show <id>`
pub async fn run_show(config: &ProofexConfig, id: &str) -> Result<String, ProofexError> {
    let storage = open_storage(config).await?;
    let repo = ExchangeRepository::from_config(storage.clone(), None, &config.exchange);
    let record = repo.retrieve_by_id(id).await;
    storage.close().await?;
    to_json(&Value::Object(schema::serialize(&record?)))
}

/// `proofex schema`
pub fn run_schema() -> Result<String, ProofexError> {
    let fields = serde_json::to_value(FIELDS)
        .map_err(|e| ProofexError::Internal(format!("failed to render schema: {e}")))?;
    to_json(&fields)
}

/// `proofex config`: the effective configuration as TOML.
pub fn run_config(config: &ProofexConfig) -> Result<String, ProofexError> {
    toml::to_string_pretty(config)
        .map_err(|e| ProofexError::Config(format!("failed to render configuration: {e}")))
}
