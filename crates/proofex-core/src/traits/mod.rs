// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the record model's external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod events;
pub mod storage;

pub use adapter::PluginAdapter;
pub use events::EventSink;
pub use storage::RecordStorage;
