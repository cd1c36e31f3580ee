// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Present-proof v1.0 exchange records.
//!
//! - [`record`]: the [`ExchangeRecord`] value and its tag/value projections
//! - [`schema`]: field descriptors, validation, and (de)serialization
//! - [`repository`]: persistence through a `RecordStorage` adapter
//! - [`events`]: in-process webhook delivery

pub mod events;
pub mod record;
pub mod repository;
pub mod schema;

pub use events::{BroadcastEventSink, WebhookEvent};
pub use record::{ExchangeRecord, ExchangeRecordBuilder, Payload, TAG_FIELDS, VALUE_ONLY_FIELDS};
pub use repository::ExchangeRepository;
pub use schema::{FIELDS, FieldKind, FieldSpec};
