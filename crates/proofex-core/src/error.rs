// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for proofex.

use thiserror::Error;

use crate::types::ExchangeState;

/// The primary error type used across the record model, its schema, and the
/// storage and webhook adapters.
#[derive(Debug, Error)]
pub enum ProofexError {
    /// A field holds a value outside its declared shape or enumeration.
    #[error("schema validation failed for field `{field}`: {message}")]
    SchemaValidation { field: String, message: String },

    /// The base-record identity contract is violated (missing or reassigned id,
    /// non-object payload).
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// No stored record matches the requested key or tag filter.
    #[error("record not found: {record_type}/{id}")]
    NotFound { record_type: String, id: String },

    /// A record with the same key already exists, or a single-record lookup
    /// matched more than one record.
    #[error("duplicate record: {record_type}/{id}")]
    DuplicateRecord { record_type: String, id: String },

    /// The stored record changed between read and write.
    #[error("concurrent update conflict on {record_type}/{id}")]
    Conflict { record_type: String, id: String },

    /// A checked state transition is not permitted by the transition table.
    #[error("invalid state transition from {} to {to}", state_label(.from))]
    InvalidTransition {
        from: Option<ExchangeState>,
        to: ExchangeState,
    },

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ProofexError {
    /// Shorthand for a schema violation on `field`.
    pub fn schema(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors caused by a concurrent writer.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

fn state_label(state: &Option<ExchangeState>) -> String {
    state
        .map(|s| s.to_string())
        .unwrap_or_else(|| "<none>".to_string())
}

