// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook/event adapter trait.

use async_trait::async_trait;

use crate::error::ProofexError;

/// Receives serialized record snapshots whenever an exchange changes state.
#[async_trait]
pub trait EventSink: Send + Sync + 'static {
    /// Delivers `payload` under `topic` (e.g. `present_proof`).
    async fn send_webhook(
        &self,
        topic: &str,
        payload: serde_json::Value,
    ) -> Result<(), ProofexError>;
}
