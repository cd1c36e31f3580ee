// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the exchange record model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
}

/// Which party started an exchange.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Initiator {
    /// This agent started the exchange.
    #[serde(rename = "self")]
    #[strum(serialize = "self")]
    SelfInitiated,
    /// The peer started the exchange.
    #[serde(rename = "external")]
    #[strum(serialize = "external")]
    External,
}

impl Initiator {
    /// All accepted wire values, in declaration order.
    pub const VALUES: &'static [&'static str] = &["self", "external"];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Initiator::SelfInitiated => "self",
            Initiator::External => "external",
        }
    }
}

/// Which side of the exchange this agent plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Prover,
    Verifier,
}

impl Role {
    pub const VALUES: &'static [&'static str] = &["prover", "verifier"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Prover => "prover",
            Role::Verifier => "verifier",
        }
    }
}

/// Position of an exchange in the present-proof protocol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExchangeState {
    ProposalSent,
    ProposalReceived,
    RequestSent,
    RequestReceived,
    PresentationSent,
    PresentationReceived,
    Verified,
}

impl ExchangeState {
    pub const VALUES: &'static [&'static str] = &[
        "proposal_sent",
        "proposal_received",
        "request_sent",
        "request_received",
        "presentation_sent",
        "presentation_received",
        "verified",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeState::ProposalSent => "proposal_sent",
            ExchangeState::ProposalReceived => "proposal_received",
            ExchangeState::RequestSent => "request_sent",
            ExchangeState::RequestReceived => "request_received",
            ExchangeState::PresentationSent => "presentation_sent",
            ExchangeState::PresentationReceived => "presentation_received",
            ExchangeState::Verified => "verified",
        }
    }

    /// States a new exchange may enter first, for the given role.
    ///
    /// An unknown role accepts either side's entry points.
    pub fn initial(role: Option<Role>) -> &'static [ExchangeState] {
        use ExchangeState::*;
        match role {
            Some(Role::Prover) => &[ProposalSent, RequestReceived],
            Some(Role::Verifier) => &[ProposalReceived, RequestSent],
            None => &[ProposalSent, RequestReceived, ProposalReceived, RequestSent],
        }
    }

    /// States reachable in one protocol step from `self`.
    ///
    /// The prover side ends at `presentation_sent`; only the verifier records
    /// a `verified` outcome.
    pub fn successors(&self, role: Option<Role>) -> &'static [ExchangeState] {
        use ExchangeState::*;
        match (self, role) {
            (ProposalSent, Some(Role::Prover) | None) => &[RequestReceived],
            (RequestReceived, Some(Role::Prover) | None) => &[PresentationSent],
            (ProposalReceived, Some(Role::Verifier) | None) => &[RequestSent],
            (RequestSent, Some(Role::Verifier) | None) => &[PresentationReceived],
            (PresentationReceived, Some(Role::Verifier) | None) => &[Verified],
            _ => &[],
        }
    }

    /// Whether a checked transition from `from` to `self` is allowed.
    pub fn can_follow(&self, from: Option<ExchangeState>, role: Option<Role>) -> bool {
        match from {
            None => Self::initial(role).contains(self),
            Some(prev) => prev.successors(role).contains(self),
        }
    }
}

/// Verification outcome, stored as the strings `"true"` / `"false"` so it can
/// double as an index tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Verified {
    #[serde(rename = "true")]
    #[strum(serialize = "true")]
    True,
    #[serde(rename = "false")]
    #[strum(serialize = "false")]
    False,
}

impl Verified {
    pub const VALUES: &'static [&'static str] = &["true", "false"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verified::True => "true",
            Verified::False => "false",
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, Verified::True)
    }
}

impl From<bool> for Verified {
    fn from(value: bool) -> Self {
        if value { Verified::True } else { Verified::False }
    }
}

/// A record as the storage collaborator sees it: a key, an opaque JSON value,
/// and the exact-match tags to index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRecord {
    /// Record-type discriminator namespacing the id.
    pub record_type: String,
    /// Record identifier, unique within `record_type`.
    pub id: String,
    /// JSON-encoded record value.
    pub value: String,
    /// Indexed tag pairs.
    pub tags: BTreeMap<String, String>,
    /// Monotonic write counter used for compare-and-swap updates. Starts at 1.
    pub version: i64,
}

impl StorageRecord {
    pub fn new(
        record_type: impl Into<String>,
        id: impl Into<String>,
        value: impl Into<String>,
        tags: BTreeMap<String, String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            id: id.into(),
            value: value.into(),
            tags,
            version: 1,
        }
    }
}

/// Conjunction of exact-match tag constraints.
///
/// An empty filter matches every record of the queried type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter(BTreeMap<String, String>);

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the constraint `name == value`, replacing any earlier one on `name`.
    pub fn eq(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Whether `tags` satisfies every constraint.
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        self.0.iter().all(|(k, v)| tags.get(k) == Some(v))
    }
}

impl From<BTreeMap<String, String>> for TagFilter {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}
