// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence of exchange records through a [`RecordStorage`] adapter.
//!
//! The repository owns the mapping between an [`ExchangeRecord`] and the
//! storage collaborator's `(record_type, id, value, tags)` shape. Records read
//! back from storage are schema-validated; a corrupted row surfaces as
//! `SchemaValidation` rather than a partially populated record.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use proofex_config::model::ExchangeConfig;
use proofex_core::{EventSink, ProofexError, RecordStorage, StorageRecord, TagFilter};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::record::{ExchangeRecord, StoredMeta};
use crate::schema;

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Loads, saves, and queries exchange records.
pub struct ExchangeRepository {
    storage: Arc<dyn RecordStorage>,
    events: Option<Arc<dyn EventSink>>,
    auto_present: bool,
    max_update_retries: u32,
}

impl ExchangeRepository {
    /// A repository with default exchange settings and no webhook sink.
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        Self::from_config(storage, None, &ExchangeConfig::default())
    }

    /// A repository configured from the `[exchange]` section.
    ///
    /// `events` is dropped when `emit_webhooks` is off.
    pub fn from_config(
        storage: Arc<dyn RecordStorage>,
        events: Option<Arc<dyn EventSink>>,
        config: &ExchangeConfig,
    ) -> Self {
        Self {
            storage,
            events: events.filter(|_| config.emit_webhooks),
            auto_present: config.auto_present,
            max_update_retries: config.max_update_retries.max(1),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_max_update_retries(mut self, retries: u32) -> Self {
        self.max_update_retries = retries.max(1);
        self
    }

    /// A fresh, unsaved record carrying the configured `auto_present` policy.
    pub fn new_record(&self) -> ExchangeRecord {
        ExchangeRecord::builder()
            .auto_present(self.auto_present)
            .build()
    }

    /// Persist `record`, creating it on first save and updating it after.
    ///
    /// A `present_proof` webhook is emitted when the state differs from the
    /// last persisted state. Returns the record id.
    pub async fn save(
        &self,
        record: &mut ExchangeRecord,
        reason: &str,
    ) -> Result<String, ProofexError> {
        self.persist(record, reason, false).await
    }

    /// Like [`save`](Self::save) but always emits the webhook.
    pub async fn save_and_notify(
        &self,
        record: &mut ExchangeRecord,
        reason: &str,
    ) -> Result<String, ProofexError> {
        self.persist(record, reason, true).await
    }

    async fn persist(
        &self,
        record: &mut ExchangeRecord,
        reason: &str,
        force_webhook: bool,
    ) -> Result<String, ProofexError> {
        let now = timestamp();
        let (id, previous) = match record.stored {
            None => {
                if record.id().is_none() {
                    record.assign_id(Uuid::new_v4().to_string())?;
                }
                if record.created_at.is_none() {
                    record.created_at = Some(now.clone());
                }
                record.updated_at = Some(now);
                let stored = to_storage(record)?;
                self.storage.add_record(&stored).await?;
                record.stored = Some(StoredMeta {
                    version: stored.version,
                    state: record.state,
                });
                debug!(id = %stored.id, state = ?record.state, reason, "exchange record created");
                (stored.id, None)
            }
            Some(meta) => {
                record.updated_at = Some(now);
                let stored = to_storage(record)?;
                let version = self.storage.update_record(&stored, meta.version).await?;
                record.stored = Some(StoredMeta {
                    version,
                    state: record.state,
                });
                debug!(id = %stored.id, version, state = ?record.state, reason, "exchange record updated");
                (stored.id, meta.state)
            }
        };

        if force_webhook || (record.state.is_some() && record.state != previous) {
            self.emit(record).await;
        }
        Ok(id)
    }

    async fn emit(&self, record: &ExchangeRecord) {
        let Some(events) = &self.events else {
            return;
        };
        let payload = Value::Object(schema::serialize(record));
        if let Err(e) = events
            .send_webhook(ExchangeRecord::WEBHOOK_TOPIC, payload)
            .await
        {
            warn!(id = ?record.id(), error = %e, "failed to deliver exchange webhook");
        }
    }

    /// Load and validate the record stored under `id`.
    pub async fn retrieve_by_id(&self, id: &str) -> Result<ExchangeRecord, ProofexError> {
        let stored = self
            .storage
            .get_record(ExchangeRecord::RECORD_TYPE, id)
            .await?;
        from_storage(stored)
    }

    /// Every record whose tags match `filter`, oldest first.
    pub async fn query(&self, filter: &TagFilter) -> Result<Vec<ExchangeRecord>, ProofexError> {
        self.storage
            .find_records(ExchangeRecord::RECORD_TYPE, filter)
            .await?
            .into_iter()
            .map(from_storage)
            .collect()
    }

    /// The single record matching `filter`.
    ///
    /// No match is `NotFound`; more than one is `DuplicateRecord`.
    pub async fn retrieve_by_tag_filter(
        &self,
        filter: &TagFilter,
    ) -> Result<ExchangeRecord, ProofexError> {
        let mut found = self
            .storage
            .find_records(ExchangeRecord::RECORD_TYPE, filter)
            .await?;
        let described = describe_filter(filter);
        match found.len() {
            0 => Err(ProofexError::NotFound {
                record_type: ExchangeRecord::RECORD_TYPE.to_string(),
                id: described,
            }),
            1 => from_storage(found.remove(0)),
            n => {
                warn!(filter = %described, matches = n, "tag filter matched several exchanges");
                Err(ProofexError::DuplicateRecord {
                    record_type: ExchangeRecord::RECORD_TYPE.to_string(),
                    id: described,
                })
            }
        }
    }

    /// The exchange on `thread_id`, scoped to `connection_id` when given.
    pub async fn retrieve_by_connection_and_thread(
        &self,
        connection_id: Option<&str>,
        thread_id: &str,
    ) -> Result<ExchangeRecord, ProofexError> {
        let mut filter = TagFilter::new().eq("thread_id", thread_id);
        if let Some(connection_id) = connection_id {
            filter = filter.eq("connection_id", connection_id);
        }
        self.retrieve_by_tag_filter(&filter).await
    }

    /// Atomic read-modify-write of the record under `id`.
    ///
    /// `modify` runs against a freshly loaded record on every attempt; a
    /// concurrent writer causes a reload and retry, up to the configured
    /// number of attempts, after which the `Conflict` is returned.
    pub async fn update_with<F>(
        &self,
        id: &str,
        reason: &str,
        mut modify: F,
    ) -> Result<ExchangeRecord, ProofexError>
    where
        F: FnMut(&mut ExchangeRecord) -> Result<(), ProofexError> + Send,
    {
        let mut attempt = 1;
        loop {
            let mut record = self.retrieve_by_id(id).await?;
            modify(&mut record)?;
            match self.save(&mut record, reason).await {
                Ok(_) => return Ok(record),
                Err(e) if e.is_conflict() && attempt < self.max_update_retries => {
                    debug!(id, attempt, "exchange record changed concurrently, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Remove `record` from storage.
    pub async fn delete(&self, record: &ExchangeRecord) -> Result<(), ProofexError> {
        let id = record.id().ok_or_else(|| {
            ProofexError::MalformedRecord("cannot delete an exchange record without an id".into())
        })?;
        self.storage
            .delete_record(ExchangeRecord::RECORD_TYPE, id)
            .await?;
        debug!(id, "exchange record deleted");
        Ok(())
    }
}

fn describe_filter(filter: &TagFilter) -> String {
    filter
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn to_storage(record: &ExchangeRecord) -> Result<StorageRecord, ProofexError> {
    let id = record.id().ok_or_else(|| {
        ProofexError::MalformedRecord("exchange record has no id".to_string())
    })?;
    let mut value = record.value();
    for (name, ts) in [
        ("created_at", &record.created_at),
        ("updated_at", &record.updated_at),
    ] {
        if let Some(ts) = ts {
            value.insert(name.to_string(), Value::String(ts.clone()));
        }
    }
    let value = serde_json::to_string(&value)
        .map_err(|e| ProofexError::Internal(format!("failed to encode exchange record: {e}")))?;
    let mut stored = StorageRecord::new(ExchangeRecord::RECORD_TYPE, id, value, record.tags());
    if let Some(version) = record.stored_version() {
        stored.version = version;
    }
    Ok(stored)
}

fn from_storage(stored: StorageRecord) -> Result<ExchangeRecord, ProofexError> {
    if stored.record_type != ExchangeRecord::RECORD_TYPE {
        return Err(ProofexError::MalformedRecord(format!(
            "expected record type `{}`, found `{}`",
            ExchangeRecord::RECORD_TYPE,
            stored.record_type
        )));
    }
    let mut value: Value = serde_json::from_str(&stored.value).map_err(|e| {
        ProofexError::MalformedRecord(format!("stored value for `{}` is not JSON: {e}", stored.id))
    })?;
    if let Value::Object(map) = &mut value {
        map.insert(
            ExchangeRecord::RECORD_ID_NAME.to_string(),
            Value::String(stored.id.clone()),
        );
    }
    let mut record = schema::deserialize(&value).inspect_err(|e| {
        warn!(id = %stored.id, error = %e, "stored exchange record failed validation");
    })?;
    record.stored = Some(StoredMeta {
        version: stored.version,
        state: record.state,
    });
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use proofex_core::{AdapterType, ExchangeState, HealthStatus, PluginAdapter, Role};
    use tracing_test::traced_test;

    /// Storage double keeping records in a map, with the same version and
    /// error semantics as the SQLite adapter.
    #[derive(Default)]
    struct MemoryStorage {
        records: Mutex<BTreeMap<(String, String), StorageRecord>>,
    }

    impl MemoryStorage {
        fn put_raw(&self, record: StorageRecord) {
            self.records
                .lock()
                .unwrap()
                .insert((record.record_type.clone(), record.id.clone()), record);
        }

        /// Simulate another writer changing `thread_id` behind the repository's back.
        fn overwrite_thread(&self, id: &str, thread_id: &str) {
            let mut records = self.records.lock().unwrap();
            let current = records
                .get_mut(&(ExchangeRecord::RECORD_TYPE.to_string(), id.to_string()))
                .unwrap();
            let mut value: Value = serde_json::from_str(&current.value).unwrap();
            value["thread_id"] = Value::String(thread_id.to_string());
            current.value = value.to_string();
            current
                .tags
                .insert("thread_id".to_string(), thread_id.to_string());
            current.version += 1;
        }
    }

    #[async_trait]
    impl PluginAdapter for MemoryStorage {
        fn name(&self) -> &str {
            "memory"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 1)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::Storage
        }
        async fn health_check(&self) -> Result<HealthStatus, ProofexError> {
            Ok(HealthStatus::Healthy)
        }
        async fn shutdown(&self) -> Result<(), ProofexError> {
            Ok(())
        }
    }

    #[async_trait]
    impl RecordStorage for MemoryStorage {
        async fn initialize(&self) -> Result<(), ProofexError> {
            Ok(())
        }
        async fn close(&self) -> Result<(), ProofexError> {
            Ok(())
        }
        async fn add_record(&self, record: &StorageRecord) -> Result<(), ProofexError> {
            let mut records = self.records.lock().unwrap();
            let key = (record.record_type.clone(), record.id.clone());
            if records.contains_key(&key) {
                return Err(ProofexError::DuplicateRecord {
                    record_type: key.0,
                    id: key.1,
                });
            }
            let mut record = record.clone();
            record.version = 1;
            records.insert(key, record);
            Ok(())
        }
        async fn get_record(
            &self,
            record_type: &str,
            id: &str,
        ) -> Result<StorageRecord, ProofexError> {
            self.records
                .lock()
                .unwrap()
                .get(&(record_type.to_string(), id.to_string()))
                .cloned()
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
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.record_type == record_type && filter.matches(&r.tags))
                .cloned()
                .collect())
        }
        async fn update_record(
            &self,
            record: &StorageRecord,
            expected_version: i64,
        ) -> Result<i64, ProofexError> {
            let mut records = self.records.lock().unwrap();
            let key = (record.record_type.clone(), record.id.clone());
            let current = records.get_mut(&key).ok_or_else(|| ProofexError::NotFound {
                record_type: key.0.clone(),
                id: key.1.clone(),
            })?;
            if current.version != expected_version {
                return Err(ProofexError::Conflict {
                    record_type: key.0,
                    id: key.1,
                });
            }
            let version = expected_version + 1;
            *current = StorageRecord {
                version,
                ..record.clone()
            };
            Ok(version)
        }
        async fn delete_record(&self, record_type: &str, id: &str) -> Result<(), ProofexError> {
            self.records
                .lock()
                .unwrap()
                .remove(&(record_type.to_string(), id.to_string()))
                .map(|_| ())
                .ok_or_else(|| ProofexError::NotFound {
                    record_type: record_type.to_string(),
                    id: id.to_string(),
                })
        }
    }

    /// Sink recording every webhook it receives.
    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl EventSink for RecordingSink {
        async fn send_webhook(&self, topic: &str, payload: Value) -> Result<(), ProofexError> {
            self.events
                .lock()
                .unwrap()
                .push((topic.to_string(), payload));
            Ok(())
        }
    }

    fn repo_with_sink() -> (ExchangeRepository, Arc<MemoryStorage>, Arc<RecordingSink>) {
        let storage = Arc::new(MemoryStorage::default());
        let sink = Arc::new(RecordingSink::default());
        let repo = ExchangeRepository::new(storage.clone()).with_events(sink.clone());
        (repo, storage, sink)
    }

    #[tokio::test]
    async fn first_save_assigns_id_and_timestamps() {
        let (repo, storage, _) = repo_with_sink();
        let mut record = ExchangeRecord::builder()
            .role(Role::Prover)
            .state(ExchangeState::ProposalSent)
            .connection_id("c1")
            .build();

        let id = repo.save(&mut record, "create").await.unwrap();
        assert_eq!(record.id(), Some(id.as_str()));
        assert!(Uuid::parse_str(&id).is_ok());
        assert!(record.created_at.is_some());
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.stored_version(), Some(1));

        let stored = storage
            .get_record(ExchangeRecord::RECORD_TYPE, &id)
            .await
            .unwrap();
        assert_eq!(stored.tags, record.tags());
        let value: Value = serde_json::from_str(&stored.value).unwrap();
        assert_eq!(value["state"], "proposal_sent");
        assert!(value.get("auto_present").is_none());
        assert!(value.get("created_at").is_some());
        assert!(value.get(ExchangeRecord::RECORD_ID_NAME).is_none());
    }

    #[tokio::test]
    async fn saved_record_reads_back_equal() {
        let (repo, _, _) = repo_with_sink();
        let mut record = ExchangeRecord::builder()
            .role(Role::Verifier)
            .state(ExchangeState::RequestSent)
            .thread_id("th-1")
            .build();
        let id = repo.save(&mut record, "create").await.unwrap();

        let loaded = repo.retrieve_by_id(&id).await.unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.stored_version(), Some(1));
    }

    #[tokio::test]
    async fn webhook_emitted_only_on_state_change() {
        let (repo, _, sink) = repo_with_sink();
        let mut record = ExchangeRecord::builder()
            .role(Role::Verifier)
            .state(ExchangeState::RequestSent)
            .build();
        repo.save(&mut record, "create").await.unwrap();

        record.connection_id = Some("c2".into());
        repo.save(&mut record, "annotate").await.unwrap();
        assert_eq!(sink.events.lock().unwrap().len(), 1);

        record
            .transition_to(ExchangeState::PresentationReceived)
            .unwrap();
        repo.save(&mut record, "presentation").await.unwrap();

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].0, ExchangeRecord::WEBHOOK_TOPIC);
        assert_eq!(events[1].1["state"], "presentation_received");
        assert_eq!(
            events[1].1[ExchangeRecord::RECORD_ID_NAME].as_str(),
            record.id()
        );
    }

    #[tokio::test]
    async fn save_and_notify_forces_webhook() {
        let (repo, _, sink) = repo_with_sink();
        let mut record = ExchangeRecord::default();
        repo.save(&mut record, "create").await.unwrap();
        assert!(sink.events.lock().unwrap().is_empty());

        repo.save_and_notify(&mut record, "ping").await.unwrap();
        assert_eq!(sink.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn disabled_webhooks_drop_the_sink() {
        let storage = Arc::new(MemoryStorage::default());
        let sink = Arc::new(RecordingSink::default());
        let config = ExchangeConfig {
            emit_webhooks: false,
            ..Default::default()
        };
        let events: Arc<dyn EventSink> = sink.clone();
        let repo = ExchangeRepository::from_config(storage, Some(events), &config);
        let mut record = ExchangeRecord::builder()
            .state(ExchangeState::ProposalReceived)
            .build();
        repo.save(&mut record, "create").await.unwrap();
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn new_record_uses_configured_auto_present() {
        let storage = Arc::new(MemoryStorage::default());
        let config = ExchangeConfig {
            auto_present: true,
            ..Default::default()
        };
        let repo = ExchangeRepository::from_config(storage, None, &config);
        assert!(repo.new_record().auto_present);
    }

    #[tokio::test]
    async fn stale_save_is_a_conflict() {
        let (repo, _, _) = repo_with_sink();
        let mut record = ExchangeRecord::default();
        let id = repo.save(&mut record, "create").await.unwrap();

        let mut a = repo.retrieve_by_id(&id).await.unwrap();
        let mut b = repo.retrieve_by_id(&id).await.unwrap();
        a.error_msg = Some("first".into());
        repo.save(&mut a, "a").await.unwrap();

        b.error_msg = Some("second".into());
        let err = repo.save(&mut b, "b").await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn update_with_retries_after_conflict() {
        let (repo, storage, _) = repo_with_sink();
        let mut record = ExchangeRecord::builder().role(Role::Prover).build();
        let id = repo.save(&mut record, "create").await.unwrap();

        // The first attempt races a competing write that lands before its save.
        let mut calls = 0;
        let updated = repo
            .update_with(&id, "receive request", |rec| {
                calls += 1;
                if calls == 1 {
                    storage.overwrite_thread(&id, "competing");
                }
                rec.transition_to(ExchangeState::RequestReceived)
            })
            .await
            .unwrap();

        assert_eq!(calls, 2);
        assert_eq!(updated.state, Some(ExchangeState::RequestReceived));
        assert_eq!(updated.thread_id.as_deref(), Some("competing"));
        assert_eq!(updated.stored_version(), Some(3));
    }

    #[tokio::test]
    async fn update_with_propagates_closure_errors() {
        let (repo, _, _) = repo_with_sink();
        let mut record = ExchangeRecord::builder()
            .role(Role::Prover)
            .state(ExchangeState::PresentationSent)
            .build();
        let id = repo.save(&mut record, "create").await.unwrap();

        let err = repo
            .update_with(&id, "bad", |rec| rec.transition_to(ExchangeState::Verified))
            .await
            .unwrap_err();
        assert!(matches!(err, ProofexError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn retrieve_by_tag_filter_requires_exactly_one() {
        let (repo, _, _) = repo_with_sink();
        for conn in ["c1", "c2"] {
            let mut record = ExchangeRecord::builder()
                .connection_id(conn)
                .thread_id("shared")
                .build();
            repo.save(&mut record, "create").await.unwrap();
        }

        let one = repo
            .retrieve_by_connection_and_thread(Some("c2"), "shared")
            .await
            .unwrap();
        assert_eq!(one.connection_id.as_deref(), Some("c2"));

        assert!(matches!(
            repo.retrieve_by_connection_and_thread(None, "shared").await,
            Err(ProofexError::DuplicateRecord { .. })
        ));
        assert!(matches!(
            repo.retrieve_by_connection_and_thread(Some("c3"), "shared")
                .await,
            Err(ProofexError::NotFound { .. })
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn corrupted_stored_value_is_rejected() {
        let (repo, storage, _) = repo_with_sink();
        let mut tags = BTreeMap::new();
        tags.insert("role".to_string(), "observer".to_string());
        storage.put_raw(StorageRecord::new(
            ExchangeRecord::RECORD_TYPE,
            "bad-1",
            r#"{"role":"observer"}"#,
            tags,
        ));

        let err = repo.retrieve_by_id("bad-1").await.unwrap_err();
        assert!(
            matches!(&err, ProofexError::SchemaValidation { field, .. } if field == "role"),
            "got {err:?}"
        );
        assert!(logs_contain("stored exchange record failed validation"));
    }

    #[tokio::test]
    async fn non_object_stored_value_is_malformed() {
        let (repo, storage, _) = repo_with_sink();
        storage.put_raw(StorageRecord::new(
            ExchangeRecord::RECORD_TYPE,
            "bad-2",
            "[1, 2]",
            BTreeMap::new(),
        ));
        assert!(matches!(
            repo.retrieve_by_id("bad-2").await,
            Err(ProofexError::MalformedRecord(_))
        ));
    }

    #[tokio::test]
    async fn delete_requires_an_id() {
        let (repo, _, _) = repo_with_sink();
        let unsaved = ExchangeRecord::default();
        assert!(matches!(
            repo.delete(&unsaved).await,
            Err(ProofexError::MalformedRecord(_))
        ));

        let mut record = ExchangeRecord::default();
        let id = repo.save(&mut record, "create").await.unwrap();
        repo.delete(&record).await.unwrap();
        assert!(matches!(
            repo.retrieve_by_id(&id).await,
            Err(ProofexError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn record_with_preassigned_id_is_created_under_it() {
        let (repo, _, _) = repo_with_sink();
        let mut record = ExchangeRecord::builder().id("fixed-id").build();
        assert_eq!(repo.save(&mut record, "create").await.unwrap(), "fixed-id");
        assert!(matches!(
            repo.save(&mut ExchangeRecord::builder().id("fixed-id").build(), "again")
                .await,
            Err(ProofexError::DuplicateRecord { .. })
        ));
    }

    #[tokio::test]
    async fn empty_id_is_replaced_on_first_save() {
        let (repo, storage, _) = repo_with_sink();
        let mut record = ExchangeRecord::builder().id("").thread_id("t").build();
        let id = repo.save(&mut record, "create").await.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
        assert!(matches!(
            storage.get_record(ExchangeRecord::RECORD_TYPE, "").await,
            Err(ProofexError::NotFound { .. })
        ));

        let mut decoded = schema::deserialize(&serde_json::json!({
            "presentation_exchange_id": "",
            "thread_id": "u"
        }))
        .unwrap();
        let decoded_id = repo.save(&mut decoded, "create").await.unwrap();
        assert!(!decoded_id.is_empty());
        assert_ne!(decoded_id, id);
    }
}
