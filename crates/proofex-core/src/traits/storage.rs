// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait: a keyed record store with a secondary tag index.

use async_trait::async_trait;

use crate::error::ProofexError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{StorageRecord, TagFilter};

/// Persistent key-value store with exact-match tag queries.
///
/// Records are keyed by `(record_type, id)`. Implementations must make
/// [`add_record`](RecordStorage::add_record) and
/// [`update_record`](RecordStorage::update_record) atomic so that two handlers
/// racing on the same exchange cannot silently overwrite each other.
#[async_trait]
pub trait RecordStorage: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), ProofexError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), ProofexError>;

    /// Creates a record. Fails with `DuplicateRecord` if the key exists.
    async fn add_record(&self, record: &StorageRecord) -> Result<(), ProofexError>;

    /// Fetches a record by key. Fails with `NotFound` if absent.
    async fn get_record(&self, record_type: &str, id: &str)
    -> Result<StorageRecord, ProofexError>;

    /// Returns every record of `record_type` whose tags satisfy `filter`.
    async fn find_records(
        &self,
        record_type: &str,
        filter: &TagFilter,
    ) -> Result<Vec<StorageRecord>, ProofexError>;

    /// Replaces value and tags if the stored version equals `expected_version`.
    ///
    /// Returns the new version. Fails with `Conflict` on a version mismatch
    /// and `NotFound` if the record is gone.
    async fn update_record(
        &self,
        record: &StorageRecord,
        expected_version: i64,
    ) -> Result<i64, ProofexError>;

    /// Deletes a record and its tags. Fails with `NotFound` if absent.
    async fn delete_record(&self, record_type: &str, id: &str) -> Result<(), ProofexError>;
}
