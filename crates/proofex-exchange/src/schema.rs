// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative shape of a serialized exchange record.
//!
//! [`FIELDS`] is the single description of every serialized field: its JSON
//! kind, the closed set of values it may take, and documentation for API
//! consumers. [`validate`] and [`deserialize`] enforce it at trust boundaries
//! (records loaded from storage, records received over an API);
//! [`serialize`] never validates.

use proofex_core::{ExchangeState, Initiator, ProofexError, Role, Verified};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::record::ExchangeRecord;

/// JSON kind a serialized field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Object,
    Bool,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Object => value.is_object(),
            FieldKind::Bool => value.is_boolean(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Object => "object",
            FieldKind::Bool => "boolean",
        }
    }
}

/// Description of one serialized field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'static str>,
    /// Closed set of permitted values, for enumerated string fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<&'static [&'static str]>,
    /// Whether the field is projected into the tag index.
    pub indexed: bool,
}

const UUID_EXAMPLE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const TIMESTAMP_EXAMPLE: &str = "2026-10-17T09:30:00.000Z";

/// Every serialized field, in validation order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: ExchangeRecord::RECORD_ID_NAME,
        kind: FieldKind::String,
        description: "Presentation exchange identifier",
        example: Some(UUID_EXAMPLE),
        allowed: None,
        indexed: false,
    },
    FieldSpec {
        name: "connection_id",
        kind: FieldKind::String,
        description: "Connection identifier",
        example: Some(UUID_EXAMPLE),
        allowed: None,
        indexed: true,
    },
    FieldSpec {
        name: "thread_id",
        kind: FieldKind::String,
        description: "Thread identifier",
        example: Some(UUID_EXAMPLE),
        allowed: None,
        indexed: true,
    },
    FieldSpec {
        name: "initiator",
        kind: FieldKind::String,
        description: "Present-proof exchange initiator: self or external",
        example: Some("self"),
        allowed: Some(Initiator::VALUES),
        indexed: true,
    },
    FieldSpec {
        name: "role",
        kind: FieldKind::String,
        description: "Present-proof exchange role: prover or verifier",
        example: Some("prover"),
        allowed: Some(Role::VALUES),
        indexed: true,
    },
    FieldSpec {
        name: "state",
        kind: FieldKind::String,
        description: "Present-proof exchange state",
        example: Some("verified"),
        allowed: Some(ExchangeState::VALUES),
        indexed: true,
    },
    FieldSpec {
        name: "presentation_proposal_dict",
        kind: FieldKind::Object,
        description: "Serialized presentation proposal message",
        example: None,
        allowed: None,
        indexed: false,
    },
    FieldSpec {
        name: "presentation_request",
        kind: FieldKind::Object,
        description: "(Indy) presentation request (also known as proof request)",
        example: None,
        allowed: None,
        indexed: false,
    },
    FieldSpec {
        name: "presentation",
        kind: FieldKind::Object,
        description: "(Indy) presentation (also known as proof)",
        example: None,
        allowed: None,
        indexed: false,
    },
    FieldSpec {
        name: "verified",
        kind: FieldKind::String,
        description: "Whether presentation is verified: true or false",
        example: Some("true"),
        allowed: Some(Verified::VALUES),
        indexed: true,
    },
    FieldSpec {
        name: "auto_present",
        kind: FieldKind::Bool,
        description: "Prover choice to auto-present proof as verifier requests",
        example: Some("false"),
        allowed: None,
        indexed: false,
    },
    FieldSpec {
        name: "error_msg",
        kind: FieldKind::String,
        description: "Error message",
        example: Some("Invalid structure"),
        allowed: None,
        indexed: false,
    },
    FieldSpec {
        name: "created_at",
        kind: FieldKind::String,
        description: "Time of record creation",
        example: Some(TIMESTAMP_EXAMPLE),
        allowed: None,
        indexed: false,
    },
    FieldSpec {
        name: "updated_at",
        kind: FieldKind::String,
        description: "Time of last record update",
        example: Some(TIMESTAMP_EXAMPLE),
        allowed: None,
        indexed: false,
    },
];

/// Look up a field by its serialized name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_field(spec: &FieldSpec, value: &Value) -> Result<(), ProofexError> {
    if !spec.kind.matches(value) {
        return Err(ProofexError::schema(
            spec.name,
            format!("expected {}, got {}", spec.kind.name(), describe(value)),
        ));
    }
    if let (Some(allowed), Some(s)) = (spec.allowed, value.as_str())
        && !allowed.contains(&s)
    {
        return Err(ProofexError::schema(
            spec.name,
            format!("must be one of: {} (got \"{s}\")", allowed.join(", ")),
        ));
    }
    Ok(())
}

/// Check `candidate` against [`FIELDS`] and build the record it describes.
///
/// `null` counts as absent. Keys that are not part of the schema are ignored.
pub fn validate(candidate: &Map<String, Value>) -> Result<ExchangeRecord, ProofexError> {
    for spec in FIELDS {
        if let Some(value) = candidate.get(spec.name)
            && !value.is_null()
        {
            check_field(spec, value)?;
        }
    }

    let mut known = Map::with_capacity(candidate.len());
    for (key, value) in candidate {
        if value.is_null() {
            continue;
        }
        if field(key).is_some() {
            known.insert(key.clone(), value.clone());
        } else {
            debug!(key = %key, "ignoring unknown exchange record field");
        }
    }

    serde_json::from_value(Value::Object(known))
        .map_err(|e| ProofexError::MalformedRecord(format!("cannot build exchange record: {e}")))
}

/// Serialize every populated attribute, including the id and timestamps.
pub fn serialize(record: &ExchangeRecord) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        // The record derives Serialize over plain strings, maps, and enums.
        _ => Map::new(),
    }
}

/// Validate a serialized mapping and reconstruct the record.
pub fn deserialize(value: &Value) -> Result<ExchangeRecord, ProofexError> {
    match value {
        Value::Object(map) => validate(map),
        other => Err(ProofexError::MalformedRecord(format!(
            "exchange record must be a JSON object, got {}",
            describe(other)
        ))),
    }
}
