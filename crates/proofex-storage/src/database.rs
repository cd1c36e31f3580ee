// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! `Database` wraps that one connection; query modules accept `&Database` and
//! go through [`Database::connection`]. Do NOT open additional connections for
//! writes: the record store's compare-and-swap updates rely on a single writer.

use std::path::Path;
use std::time::Duration;

use proofex_config::model::StorageConfig;
use proofex_core::ProofexError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite call error into `ProofexError::Storage`.
pub(crate) fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> ProofexError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ProofexError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database holding exchange records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at `config.database_path`,
    /// apply connection PRAGMAs, and run pending migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, ProofexError> {
        let path = config.database_path.clone();
        if let Some(parent) = Path::new(&path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ProofexError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(&path)
            .await
            .map_err(|e| ProofexError::Storage {
                source: Box::new(e),
            })?;

        let wal_mode = config.wal_mode;
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            conn.busy_timeout(busy_timeout)?;
            if wal_mode {
                let mode: String =
                    conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
                debug!(journal_mode = %mode, "journal mode set");
            }
            conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA synchronous = NORMAL;")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(map_tr_err)?;

        debug!(path = %path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The single writer connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), ProofexError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}
