// SPDX-FileCopyrightText: 2026 Proofex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process webhook delivery over a tokio broadcast channel.

use async_trait::async_trait;
use proofex_core::{EventSink, ProofexError};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

/// A webhook published for a record state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookEvent {
    pub topic: String,
    pub payload: Value,
}

/// Fans webhook events out to every current subscriber.
///
/// Events published with no subscribers are dropped. Slow subscribers that
/// fall more than `capacity` events behind observe `RecvError::Lagged`.
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<WebhookEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WebhookEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[async_trait]
impl EventSink for BroadcastEventSink {
    async fn send_webhook(&self, topic: &str, payload: Value) -> Result<(), ProofexError> {
        let event = WebhookEvent {
            topic: topic.to_string(),
            payload,
        };
        match self.tx.send(event) {
            Ok(receivers) => debug!(topic, receivers, "webhook published"),
            Err(_) => debug!(topic, "webhook dropped, no subscribers"),
        }
        Ok(())
    }
}
