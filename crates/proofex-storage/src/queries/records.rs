// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record CRUD with the secondary tag index.
//!
//! Value and tag rows for a record are always written in the same transaction.

use std::collections::BTreeMap;

use proofex_core::{ProofexError, StorageRecord, TagFilter};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

/// Result of a compare-and-swap update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record was written; carries the new version.
    Updated(i64),
    /// The stored version did not match the expected one.
    Conflict,
    /// No record exists under the key.
    Missing,
}

fn load_tags(
    conn: &rusqlite::Connection,
    record_type: &str,
    id: &str,
) -> Result<BTreeMap<String, String>, rusqlite::Error> {
    let mut stmt = conn.prepare_cached(
        "SELECT name, value FROM record_tags WHERE record_type = ?1 AND record_id = ?2",
    )?;
    let rows = stmt.query_map(params![record_type, id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;
    rows.collect()
}

fn insert_tags(
    conn: &rusqlite::Connection,
    record_type: &str,
    id: &str,
    tags: &BTreeMap<String, String>,
) -> Result<(), rusqlite::Error> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO record_tags (record_type, record_id, name, value) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (name, value) in tags {
        stmt.execute(params![record_type, id, name, value])?;
    }
    Ok(())
}

/// Create a record and its tags. Returns `false` if the key is already taken.
pub async fn add_record(db: &Database, record: &StorageRecord) -> Result<bool, ProofexError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let tx = conn.transaction()?;
            let exists = tx
                .query_row(
                    "SELECT 1 FROM records WHERE record_type = ?1 AND id = ?2",
                    params![record.record_type, record.id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if exists {
                return Ok(false);
            }

            tx.execute(
                "INSERT INTO records (record_type, id, value, version) VALUES (?1, ?2, ?3, ?4)",
                params![record.record_type, record.id, record.value, record.version],
            )?;
            insert_tags(&tx, &record.record_type, &record.id, &record.tags)?;
            tx.commit()?;
            Ok(true)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a record by key.
pub async fn get_record(
    db: &Database,
    record_type: &str,
    id: &str,
) -> Result<Option<StorageRecord>, ProofexError> {
    let record_type = record_type.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<StorageRecord>, rusqlite::Error> {
            let row = conn
                .query_row(
                    "SELECT value, version FROM records WHERE record_type = ?1 AND id = ?2",
                    params![record_type, id],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()?;
            let Some((value, version)) = row else {
                return Ok(None);
            };
            let tags = load_tags(conn, &record_type, &id)?;
            Ok(Some(StorageRecord {
                record_type,
                id,
                value,
                tags,
                version,
            }))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Find records of `record_type` matching every tag constraint in `filter`,
/// in insertion order.
///
/// Ordering uses the table's rowid. SQLite hands out a rowid above every
/// live row on insert, so earlier-created records always sort first.
pub async fn find_records(
    db: &Database,
    record_type: &str,
    filter: &TagFilter,
) -> Result<Vec<StorageRecord>, ProofexError> {
    let mut sql = String::from(
        "SELECT r.id, r.value, r.version FROM records r WHERE r.record_type = ?1",
    );
    let mut bind: Vec<String> = vec![record_type.to_string()];
    for (name, value) in filter.iter() {
        let n = bind.len() + 1;
        sql.push_str(&format!(
            " AND EXISTS (SELECT 1 FROM record_tags t WHERE t.record_type = r.record_type \
             AND t.record_id = r.id AND t.name = ?{n} AND t.value = ?{})",
            n + 1
        ));
        bind.push(name.clone());
        bind.push(value.clone());
    }
    sql.push_str(" ORDER BY r.rowid ASC");

    let record_type = record_type.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<StorageRecord>, rusqlite::Error> {
            let rows = {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(bind.iter()), |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, i64>(2)?,
                        ))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            };

            let mut records = Vec::with_capacity(rows.len());
            for (id, value, version) in rows {
                let tags = load_tags(conn, &record_type, &id)?;
                records.push(StorageRecord {
                    record_type: record_type.clone(),
                    id,
                    value,
                    tags,
                    version,
                });
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Replace a record's value and tags if its stored version is `expected_version`.
pub async fn update_record(
    db: &Database,
    record: &StorageRecord,
    expected_version: i64,
) -> Result<UpdateOutcome, ProofexError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| -> Result<UpdateOutcome, rusqlite::Error> {
            let tx = conn.transaction()?;
            let current: Option<i64> = tx
                .query_row(
                    "SELECT version FROM records WHERE record_type = ?1 AND id = ?2",
                    params![record.record_type, record.id],
                    |row| row.get(0),
                )
                .optional()?;
            let outcome = match current {
                None => UpdateOutcome::Missing,
                Some(v) if v != expected_version => UpdateOutcome::Conflict,
                Some(v) => {
                    let next = v + 1;
                    tx.execute(
                        "UPDATE records SET value = ?1, version = ?2,
                         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                         WHERE record_type = ?3 AND id = ?4",
                        params![record.value, next, record.record_type, record.id],
                    )?;
                    tx.execute(
                        "DELETE FROM record_tags WHERE record_type = ?1 AND record_id = ?2",
                        params![record.record_type, record.id],
                    )?;
                    insert_tags(&tx, &record.record_type, &record.id, &record.tags)?;
                    UpdateOutcome::Updated(next)
                }
            };
            tx.commit()?;
            Ok(outcome)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a record and its tags. Returns `false` if nothing was deleted.
pub async fn delete_record(
    db: &Database,
    record_type: &str,
    id: &str,
) -> Result<bool, ProofexError> {
    let record_type = record_type.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM record_tags WHERE record_type = ?1 AND record_id = ?2",
                params![record_type, id],
            )?;
            let deleted = tx.execute(
                "DELETE FROM records WHERE record_type = ?1 AND id = ?2",
                params![record_type, id],
            )?;
            tx.commit()?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::setup_db;

    const TYPE: &str = "presentation_exchange_v10";

    fn make_record(id: &str, tags: &[(&str, &str)]) -> StorageRecord {
        StorageRecord::new(
            TYPE,
            id,
            format!(r#"{{"id":"{id}"}}"#),
            tags.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn add_and_get_record_roundtrips() {
        let (db, _dir) = setup_db().await;
        let rec = make_record("r1", &[("state", "request_sent"), ("role", "verifier")]);

        assert!(add_record(&db, &rec).await.unwrap());
        let loaded = get_record(&db, TYPE, "r1").await.unwrap().unwrap();
        assert_eq!(loaded, rec);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn add_duplicate_key_is_refused() {
        let (db, _dir) = setup_db().await;
        let rec = make_record("dup", &[]);
        assert!(add_record(&db, &rec).await.unwrap());
        assert!(!add_record(&db, &rec).await.unwrap());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn same_id_under_other_type_is_independent() {
        let (db, _dir) = setup_db().await;
        let rec = make_record("shared", &[]);
        let mut other = rec.clone();
        other.record_type = "connection".to_string();

        assert!(add_record(&db, &rec).await.unwrap());
        assert!(add_record(&db, &other).await.unwrap());
        assert!(get_record(&db, "connection", "shared").await.unwrap().is_some());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_record_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_record(&db, TYPE, "nope").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn find_records_returns_insertion_order() {
        let (db, _dir) = setup_db().await;
        for id in ["zz", "mm", "aa", "m0"] {
            add_record(&db, &make_record(id, &[("thread_id", "t")])).await.unwrap();
        }
        delete_record(&db, TYPE, "m0").await.unwrap();
        add_record(&db, &make_record("0a", &[("thread_id", "t")])).await.unwrap();

        let found = find_records(&db, TYPE, &TagFilter::new().eq("thread_id", "t"))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zz", "mm", "aa", "0a"]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn find_records_applies_every_tag_constraint() {
        let (db, _dir) = setup_db().await;
        add_record(&db, &make_record("a", &[("state", "request_sent"), ("thread_id", "t1")]))
            .await
            .unwrap();
        add_record(&db, &make_record("b", &[("state", "request_sent"), ("thread_id", "t2")]))
            .await
            .unwrap();
        add_record(&db, &make_record("c", &[("state", "verified"), ("thread_id", "t1")]))
            .await
            .unwrap();

        let all = find_records(&db, TYPE, &TagFilter::new()).await.unwrap();
        assert_eq!(all.len(), 3);

        let sent = find_records(&db, TYPE, &TagFilter::new().eq("state", "request_sent"))
            .await
            .unwrap();
        let ids: Vec<_> = sent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let one = find_records(
            &db,
            TYPE,
            &TagFilter::new().eq("state", "request_sent").eq("thread_id", "t1"),
        )
        .await
        .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].id, "a");
        assert_eq!(one[0].tags.get("thread_id").map(String::as_str), Some("t1"));

        let none = find_records(&db, TYPE, &TagFilter::new().eq("role", "prover"))
            .await
            .unwrap();
        assert!(none.is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_replaces_value_and_tags() {
        let (db, _dir) = setup_db().await;
        let mut rec = make_record("u", &[("state", "request_sent")]);
        add_record(&db, &rec).await.unwrap();

        rec.value = r#"{"changed":true}"#.to_string();
        rec.tags.clear();
        rec.tags.insert("verified".to_string(), "true".to_string());
        let outcome = update_record(&db, &rec, 1).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated(2));

        let loaded = get_record(&db, TYPE, "u").await.unwrap().unwrap();
        assert_eq!(loaded.value, r#"{"changed":true}"#);
        assert_eq!(loaded.version, 2);
        assert_eq!(loaded.tags.len(), 1);
        assert!(
            find_records(&db, TYPE, &TagFilter::new().eq("state", "request_sent"))
                .await
                .unwrap()
                .is_empty()
        );

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn stale_version_is_a_conflict() {
        let (db, _dir) = setup_db().await;
        let rec = make_record("cas", &[]);
        add_record(&db, &rec).await.unwrap();

        assert_eq!(update_record(&db, &rec, 1).await.unwrap(), UpdateOutcome::Updated(2));
        assert_eq!(update_record(&db, &rec, 1).await.unwrap(), UpdateOutcome::Conflict);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_missing_record_reports_missing() {
        let (db, _dir) = setup_db().await;
        let rec = make_record("ghost", &[]);
        assert_eq!(update_record(&db, &rec, 1).await.unwrap(), UpdateOutcome::Missing);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_removes_record_and_tags() {
        let (db, _dir) = setup_db().await;
        add_record(&db, &make_record("d", &[("state", "verified")]))
            .await
            .unwrap();

        assert!(delete_record(&db, TYPE, "d").await.unwrap());
        assert!(!delete_record(&db, TYPE, "d").await.unwrap());
        assert!(get_record(&db, TYPE, "d").await.unwrap().is_none());

        let tag_rows: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM record_tags", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(tag_rows, 0);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_updates_exactly_one_wins() {
        let (db, _dir) = setup_db().await;
        let rec = make_record("race", &[]);
        add_record(&db, &rec).await.unwrap();

        let db = std::sync::Arc::new(db);
        let mut handles = Vec::new();
        for i in 0..8 {
            let db = db.clone();
            let mut rec = rec.clone();
            rec.value = format!(r#"{{"writer":{i}}}"#);
            handles.push(tokio::spawn(async move {
                update_record(&db, &rec, 1).await.unwrap()
            }));
        }

        let mut wins = 0;
        for handle in handles {
            if let UpdateOutcome::Updated(v) = handle.await.unwrap() {
                assert_eq!(v, 2);
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }
}
