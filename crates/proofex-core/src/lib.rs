// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for proofex.
//!
//! This crate provides the error type, the enumerations that make up a
//! present-proof exchange's state space, and the adapter traits through which
//! the record model talks to its storage and webhook collaborators.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ProofexError;
pub use types::{
    AdapterType, ExchangeState, HealthStatus, Initiator, Role, StorageRecord, TagFilter, Verified,
};

// Re-export all adapter traits at crate root.
pub use traits::{EventSink, PluginAdapter, RecordStorage};
