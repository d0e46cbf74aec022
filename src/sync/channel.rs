//! Slide sync channel
//!
//! Broadcasts the operator's active-slide selection to companion devices over
//! the message bus and feeds remote selections back in. The channel connects
//! asynchronously; anything emitted before the connect handshake resolves is
//! dropped, not queued. Broadcasts loop back to the sender's own subscribers
//! as well, the same as every other device.

use super::bus::{MessageBus, SubscriberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Topic carrying the one-shot connect acknowledgment
pub const TOPIC_CONNECT: &str = "connect";
/// Topic carrying slide selections
pub const TOPIC_SLIDE_CHANGE: &str = "slide_change";

/// Simulated signaling handshake time
const CONNECT_DELAY: Duration = Duration::from_millis(500);
/// Simulated broadcast round-trip time
const EMIT_DELAY: Duration = Duration::from_millis(100);

/// Wire payload of a slide selection broadcast
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideChangeEvent {
    pub slide_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Publishes and receives slide selections over a message bus
pub struct SlideSyncChannel {
    bus: Arc<dyn MessageBus>,
    connected: Arc<AtomicBool>,
}

impl SlideSyncChannel {
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        Self {
            bus,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Begin connecting. After a bounded delay the channel flips to
    /// connected and one `connect` acknowledgment reaches all subscribers.
    pub fn connect(&self) {
        tracing::info!("Connecting to signaling server");
        let bus = self.bus.clone();
        let connected = self.connected.clone();
        tokio::spawn(async move {
            tokio::time::sleep(CONNECT_DELAY).await;
            connected.store(true, Ordering::SeqCst);
            bus.publish(TOPIC_CONNECT, serde_json::json!({}));
            tracing::info!("Sync channel connected");
        });
    }

    /// Broadcast a slide selection. Dropped while disconnected; otherwise
    /// delivered to every subscriber after a small delay, the sender's own
    /// listeners included.
    pub fn emit_slide_change(&self, slide_id: Uuid) {
        if !self.is_connected() {
            tracing::debug!(%slide_id, "Dropping slide change, not connected");
            return;
        }
        tracing::debug!(%slide_id, "Emitting slide change");
        let bus = self.bus.clone();
        tokio::spawn(async move {
            tokio::time::sleep(EMIT_DELAY).await;
            let event = SlideChangeEvent {
                slide_id,
                timestamp: Utc::now(),
            };
            match serde_json::to_value(&event) {
                Ok(payload) => bus.publish(TOPIC_SLIDE_CHANGE, payload),
                Err(err) => tracing::error!(%err, "Failed to encode slide change"),
            }
        });
    }

    /// Listen for the connect acknowledgment
    pub fn on_connect<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.bus
            .subscribe(TOPIC_CONNECT, Arc::new(move |_| callback()))
    }

    /// Listen for slide selections. Payloads that do not decode are ignored.
    pub fn on_slide_change<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(SlideChangeEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(
            TOPIC_SLIDE_CHANGE,
            Arc::new(move |payload| {
                match serde_json::from_value::<SlideChangeEvent>(payload.clone()) {
                    Ok(event) => callback(event),
                    Err(err) => tracing::warn!(%err, "Ignoring malformed slide change"),
                }
            }),
        )
    }

    pub fn off_connect(&self, id: SubscriberId) {
        self.bus.unsubscribe(TOPIC_CONNECT, id);
    }

    pub fn off_slide_change(&self, id: SubscriberId) {
        self.bus.unsubscribe(TOPIC_SLIDE_CHANGE, id);
    }
}
