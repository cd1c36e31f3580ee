// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the RecordStorage trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use proofex_config::model::StorageConfig;
use proofex_core::{
    AdapterType, HealthStatus, PluginAdapter, ProofexError, RecordStorage, StorageRecord,
    TagFilter,
};

use crate::database::Database;
use crate::queries;
use crate::queries::records::UpdateOutcome;

/// SQLite-backed record storage.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules. The
/// database is lazily opened on the first call to
/// [`RecordStorage::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](RecordStorage::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, ProofexError> {
        self.db.get().ok_or_else(|| ProofexError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    async fn checkpoint(&self) -> Result<(), ProofexError> {
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, ProofexError> {
        let Some(db) = self.db.get() else {
            return Ok(HealthStatus::Unhealthy("storage not initialized".into()));
        };
        let ping = db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await;
        Ok(match ping {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }

    async fn shutdown(&self) -> Result<(), ProofexError> {
        self.checkpoint().await
    }
}

#[async_trait]
impl RecordStorage for SqliteStorage {
    async fn initialize(&self) -> Result<(), ProofexError> {
        let db = Database::open(&self.config).await?;
        self.db.set(db).map_err(|_| ProofexError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), ProofexError> {
        self.db()?;
        self.checkpoint().await
    }

    async fn add_record(&self, record: &StorageRecord) -> Result<(), ProofexError> {
        if queries::records::add_record(self.db()?, record).await? {
            debug!(record_type = %record.record_type, id = %record.id, "record added");
            Ok(())
        } else {
            Err(ProofexError::DuplicateRecord {
                record_type: record.record_type.clone(),
                id: record.id.clone(),
            })
        }
    }

    async fn get_record(
        &self,
        record_type: &str,
        id: &str,
    ) -> Result<StorageRecord, ProofexError> {
        queries::records::get_record(self.db()?, record_type, id)
            .await?
            .ok_or_else(|| ProofexError::NotFound {
                record_type: record_type.to_string(),
                id: id.to_string(),
            })
    }

    async fn find_records(
        &self,
        record_type: &str,
        filter: &TagFilter,
    ) -> Result<Vec<StorageRecord>, ProofexError> {
        queries::records::find_records(self.db()?, record_type, filter).await
    }

    async fn update_record(
        &self,
        record: &StorageRecord,
        expected_version: i64,
    ) -> Result<i64, ProofexError> {
        match queries::records::update_record(self.db()?, record, expected_version).await? {
            UpdateOutcome::Updated(version) => Ok(version),
            UpdateOutcome::Conflict => {
                warn!(
                    record_type = %record.record_type,
                    id = %record.id,
                    expected_version,
                    "stale record version"
                );
                Err(ProofexError::Conflict {
                    record_type: record.record_type.clone(),
                    id: record.id.clone(),
                })
            }
            UpdateOutcome::Missing => Err(ProofexError::NotFound {
                record_type: record.record_type.clone(),
                id: record.id.clone(),
            }),
        }
    }

    async fn delete_record(&self, record_type: &str, id: &str) -> Result<(), ProofexError> {
        if queries::records::delete_record(self.db()?, record_type, id).await? {
            Ok(())
        } else {
            Err(ProofexError::NotFound {
                record_type: record_type.to_string(),
                id: id.to_string(),
            })
        }
    }
}
