// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The present-proof v1.0 exchange record and its storage projections.
//!
//! An [`ExchangeRecord`] is a plain value: it performs no I/O and accepts any
//! combination of fields. Shape checks happen in [`crate::schema`] when a
//! record crosses a trust boundary.

use std::collections::BTreeMap;

use proofex_core::{ExchangeState, Initiator, ProofexError, Role, Verified};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Opaque structured protocol payload (proposal, request, or presentation).
pub type Payload = Map<String, Value>;

/// Fields projected into the tag index, in canonical order.
pub const TAG_FIELDS: [&str; 6] = [
    "connection_id",
    "thread_id",
    "initiator",
    "role",
    "state",
    "verified",
];

/// Fields stored only in the value, never indexed.
pub const VALUE_ONLY_FIELDS: [&str; 5] = [
    "presentation_proposal_dict",
    "presentation_request",
    "presentation",
    "auto_present",
    "error_msg",
];

/// Bookkeeping for a record loaded from or written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoredMeta {
    pub(crate) version: i64,
    pub(crate) state: Option<ExchangeState>,
}

// An empty id means "not yet assigned".
fn non_empty_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|id| !id.is_empty()))
}

/// One present-proof v1.0 exchange between a prover and a verifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeRecord {
    #[serde(
        rename = "presentation_exchange_id",
        default,
        deserialize_with = "non_empty_id",
        skip_serializing_if = "Option::is_none"
    )]
    id: Option<String>,

    /// Messaging channel / peer the exchange runs over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,

    /// Protocol thread correlating the exchange's messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiator: Option<Initiator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ExchangeState>,

    /// Serialized presentation proposal message.
    #[serde(
        rename = "presentation_proposal_dict",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub presentation_proposal: Option<Payload>,

    /// Presentation request (proof request).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_request: Option<Payload>,

    /// Presentation (proof).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<Payload>,

    /// Verifier-side verification outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<Verified>,

    /// Prover answers requests without manual approval.
    #[serde(default)]
    pub auto_present: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(skip)]
    pub(crate) stored: Option<StoredMeta>,
}

impl ExchangeRecord {
    /// Record-type discriminator namespacing ids in storage.
    pub const RECORD_TYPE: &'static str = "presentation_exchange_v10";
    /// Name the id is serialized under.
    pub const RECORD_ID_NAME: &'static str = "presentation_exchange_id";
    /// Topic for state-change webhooks.
    pub const WEBHOOK_TOPIC: &'static str = "present_proof";

    pub fn builder() -> ExchangeRecordBuilder {
        ExchangeRecordBuilder::default()
    }

    /// The record id; `None` until storage assigns one on first save.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Assign the record id. An id can be set once; re-assigning the same
    /// value is a no-op, anything else is a `MalformedRecord` error.
    pub fn assign_id(&mut self, id: impl Into<String>) -> Result<(), ProofexError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ProofexError::MalformedRecord(
                "record id must not be empty".to_string(),
            ));
        }
        match &self.id {
            Some(existing) if *existing == id => Ok(()),
            Some(existing) => Err(ProofexError::MalformedRecord(format!(
                "record id `{existing}` cannot be reassigned to `{id}`"
            ))),
            None => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    /// Indexable metadata: the non-empty subset of [`TAG_FIELDS`].
    pub fn tags(&self) -> BTreeMap<String, String> {
        let candidates: [(&str, Option<&str>); 6] = [
            ("connection_id", self.connection_id.as_deref()),
            ("thread_id", self.thread_id.as_deref()),
            ("initiator", self.initiator.as_ref().map(Initiator::as_str)),
            ("role", self.role.as_ref().map(Role::as_str)),
            ("state", self.state.as_ref().map(ExchangeState::as_str)),
            ("verified", self.verified.as_ref().map(Verified::as_str)),
        ];
        candidates
            .into_iter()
            .filter_map(|(name, value)| match value {
                Some(v) if !v.is_empty() => Some((name.to_string(), v.to_string())),
                _ => None,
            })
            .collect()
    }

    /// Durable payload: the tags merged with the non-empty value-only fields.
    ///
    /// `auto_present` is written only when set; a missing key reads back as `false`.
    pub fn value(&self) -> Map<String, Value> {
        let mut value: Map<String, Value> = self
            .tags()
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();

        let payloads = [
            ("presentation_proposal_dict", &self.presentation_proposal),
            ("presentation_request", &self.presentation_request),
            ("presentation", &self.presentation),
        ];
        for (name, payload) in payloads {
            if let Some(p) = payload
                && !p.is_empty()
            {
                value.insert(name.to_string(), Value::Object(p.clone()));
            }
        }
        if self.auto_present {
            value.insert("auto_present".to_string(), Value::Bool(true));
        }
        if let Some(msg) = self.error_msg.as_deref()
            && !msg.is_empty()
        {
            value.insert("error_msg".to_string(), Value::String(msg.to_string()));
        }
        value
    }

    /// Move to `next`, checking the protocol transition table for this record's role.
    ///
    /// Assigning [`state`](Self::state) directly bypasses the check.
    pub fn transition_to(&mut self, next: ExchangeState) -> Result<(), ProofexError> {
        if !next.can_follow(self.state, self.role) {
            return Err(ProofexError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!(id = ?self.id, from = ?self.state, to = %next, "exchange state transition");
        self.state = Some(next);
        Ok(())
    }

    /// Whether the negotiation has ended: verified, verification outcome
    /// recorded, or aborted with an error.
    pub fn is_terminal(&self) -> bool {
        self.state == Some(ExchangeState::Verified)
            || self.verified.is_some()
            || self.error_msg.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Last version written to or read from storage, if any.
    pub fn stored_version(&self) -> Option<i64> {
        self.stored.map(|m| m.version)
    }
}

impl PartialEq for ExchangeRecord {
    // Storage bookkeeping is not part of a record's identity.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.connection_id == other.connection_id
            && self.thread_id == other.thread_id
            && self.initiator == other.initiator
            && self.role == other.role
            && self.state == other.state
            && self.presentation_proposal == other.presentation_proposal
            && self.presentation_request == other.presentation_request
            && self.presentation == other.presentation
            && self.verified == other.verified
            && self.auto_present == other.auto_present
            && self.error_msg == other.error_msg
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
    }
}

/// Builder for [`ExchangeRecord`]; every field is optional.
#[derive(Debug, Default)]
pub struct ExchangeRecordBuilder {
    record: ExchangeRecord,
}

impl ExchangeRecordBuilder {
    /// Preset the id. An empty id leaves the record unassigned.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.record.id = Some(id.into()).filter(|id: &String| !id.is_empty());
        self
    }

    pub fn connection_id(mut self, connection_id: impl Into<String>) -> Self {
        self.record.connection_id = Some(connection_id.into());
        self
    }

    pub fn thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.record.thread_id = Some(thread_id.into());
        self
    }

    pub fn initiator(mut self, initiator: Initiator) -> Self {
        self.record.initiator = Some(initiator);
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.record.role = Some(role);
        self
    }

    pub fn state(mut self, state: ExchangeState) -> Self {
        self.record.state = Some(state);
        self
    }

    pub fn presentation_proposal(mut self, proposal: Payload) -> Self {
        self.record.presentation_proposal = Some(proposal);
        self
    }

    pub fn presentation_request(mut self, request: Payload) -> Self {
        self.record.presentation_request = Some(request);
        self
    }

    pub fn presentation(mut self, presentation: Payload) -> Self {
        self.record.presentation = Some(presentation);
        self
    }

    pub fn verified(mut self, verified: Verified) -> Self {
        self.record.verified = Some(verified);
        self
    }

    pub fn auto_present(mut self, auto_present: bool) -> Self {
        self.record.auto_present = auto_present;
        self
    }

    pub fn error_msg(mut self, error_msg: impl Into<String>) -> Self {
        self.record.error_msg = Some(error_msg.into());
        self
    }

    pub fn build(self) -> ExchangeRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Payload {
        match v {
            Value::Object(m) => m,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn tag_and_value_fields_are_disjoint() {
        for tag in TAG_FIELDS {
            assert!(!VALUE_ONLY_FIELDS.contains(&tag), "{tag} in both sets");
        }
    }

    #[test]
    fn default_record_has_empty_projections() {
        let record = ExchangeRecord::default();
        assert!(record.id().is_none());
        assert!(record.tags().is_empty());

        assert!(record.value().is_empty());
    }

    #[test]
    fn prover_proposal_projects_three_tags() {
        let record = ExchangeRecord::builder()
            .role(Role::Prover)
            .state(ExchangeState::ProposalSent)
            .connection_id("c1")
            .build();

        let tags = record.tags();
        let expected: BTreeMap<String, String> = [
            ("role", "prover"),
            ("state", "proposal_sent"),
            ("connection_id", "c1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(tags, expected);

        let value = record.value();
        assert_eq!(value.get("role"), Some(&json!("prover")));
        assert_eq!(value.get("state"), Some(&json!("proposal_sent")));
        assert_eq!(value.get("connection_id"), Some(&json!("c1")));
        assert_eq!(value.len(), 3);
    }

    #[test]
    fn empty_values_are_left_out_of_both_projections() {
        let record = ExchangeRecord {
            connection_id: Some(String::new()),
            thread_id: Some("t-1".into()),
            presentation_request: Some(Payload::new()),
            error_msg: Some(String::new()),
            ..Default::default()
        };

        let tags = record.tags();
        assert_eq!(tags.len(), 1);
        assert!(tags.contains_key("thread_id"));

        let value = record.value();
        assert!(!value.contains_key("connection_id"));
        assert!(!value.contains_key("presentation_request"));
        assert!(!value.contains_key("error_msg"));
    }

    #[test]
    fn value_carries_payloads_and_tags() {
        let record = ExchangeRecord::builder()
            .thread_id("th")
            .verified(Verified::True)
            .presentation_request(payload(json!({"name": "proof-req", "nonce": "1"})))
            .presentation(payload(json!({"proof": {}})))
            .auto_present(true)
            .error_msg("boom")
            .build();

        let tags = record.tags();
        assert_eq!(tags.get("verified").map(String::as_str), Some("true"));
        assert!(!tags.contains_key("presentation"));

        let value = record.value();
        for (k, v) in &tags {
            assert_eq!(value.get(k), Some(&Value::String(v.clone())));
        }
        assert_eq!(value["presentation_request"]["name"], json!("proof-req"));
        assert_eq!(value["auto_present"], json!(true));
        assert_eq!(value["error_msg"], json!("boom"));
        assert!(!value.contains_key("presentation_proposal_dict"));
    }

    #[test]
    fn id_is_assigned_once() {
        let mut record = ExchangeRecord::default();
        record.assign_id("ex-1").unwrap();
        record.assign_id("ex-1").unwrap();
        assert!(matches!(
            record.assign_id("ex-2"),
            Err(ProofexError::MalformedRecord(_))
        ));
        assert_eq!(record.id(), Some("ex-1"));
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut record = ExchangeRecord::default();
        assert!(record.assign_id("").is_err());
        assert!(record.id().is_none());
    }

    #[test]
    fn empty_id_leaves_record_unassigned() {
        let built = ExchangeRecord::builder().id("").build();
        assert!(built.id().is_none());

        let decoded: ExchangeRecord =
            serde_json::from_value(json!({"presentation_exchange_id": "", "role": "prover"}))
                .unwrap();
        assert!(decoded.id().is_none());
        assert_eq!(decoded.role, Some(Role::Prover));
    }

    #[test]
    fn id_is_not_a_tag() {
        let record = ExchangeRecord::builder().id("abc").build();
        assert!(record.tags().is_empty());
        assert!(!record.value().contains_key(ExchangeRecord::RECORD_ID_NAME));
    }

    #[test]
    fn checked_transitions_follow_the_table() {
        let mut record = ExchangeRecord::builder().role(Role::Verifier).build();
        record.transition_to(ExchangeState::RequestSent).unwrap();
        record
            .transition_to(ExchangeState::PresentationReceived)
            .unwrap();

        let err = record
            .transition_to(ExchangeState::RequestSent)
            .unwrap_err();
        assert!(matches!(
            err,
            ProofexError::InvalidTransition {
                from: Some(ExchangeState::PresentationReceived),
                to: ExchangeState::RequestSent,
            }
        ));
        assert_eq!(record.state, Some(ExchangeState::PresentationReceived));

        record.transition_to(ExchangeState::Verified).unwrap();
        assert!(record.is_terminal());
    }

    #[test]
    fn direct_state_assignment_is_unchecked() {
        let mut record = ExchangeRecord::builder().role(Role::Prover).build();
        record.state = Some(ExchangeState::Verified);
        assert_eq!(record.tags().get("state").map(String::as_str), Some("verified"));
    }

    #[test]
    fn error_message_makes_record_terminal() {
        let mut record = ExchangeRecord::default();
        assert!(!record.is_terminal());
        record.error_msg = Some("presentation rejected".into());
        assert!(record.is_terminal());
    }

    #[test]
    fn equality_ignores_storage_bookkeeping() {
        let a = ExchangeRecord::builder().thread_id("t").build();
        let mut b = a.clone();
        b.stored = Some(StoredMeta {
            version: 3,
            state: None,
        });
        assert_eq!(a, b);
        assert_eq!(b.stored_version(), Some(3));
    }
}
