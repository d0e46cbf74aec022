//! Message bus abstraction
//!
//! Publish/subscribe by named topic, so the slide sync channel never knows
//! whether it is talking to the in-process simulation or a real transport.
//! Delivery targets the subscriber set current at publish time, and
//! unsubscription is by the id handed out at subscribe time.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handle identifying one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Callback invoked with each message on a subscribed topic
pub type Subscriber = Arc<dyn Fn(&Value) + Send + Sync>;

/// Topic-based publish/subscribe transport
pub trait MessageBus: Send + Sync {
    /// Deliver a payload to every current subscriber of `topic`
    fn publish(&self, topic: &str, payload: Value);

    fn subscribe(&self, topic: &str, subscriber: Subscriber) -> SubscriberId;

    fn unsubscribe(&self, topic: &str, id: SubscriberId);
}

/// In-process bus standing in for the real messaging transport
pub struct SimulatedBus {
    topics: Mutex<HashMap<String, Vec<(SubscriberId, Subscriber)>>>,
    next_id: AtomicU64,
}

impl SimulatedBus {
    pub fn new() -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl Default for SimulatedBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBus for SimulatedBus {
    fn publish(&self, topic: &str, payload: Value) {
        // Snapshot the subscriber set, then invoke outside the lock so a
        // callback may re-enter the bus.
        let subscribers: Vec<Subscriber> = self
            .topics
            .lock()
            .get(topic)
            .map(|subs| subs.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();

        for callback in subscribers {
            callback(&payload);
        }
    }

    fn subscribe(&self, topic: &str, subscriber: Subscriber) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.topics
            .lock()
            .entry(topic.to_string())
            .or_default()
            .push((id, subscriber));
        id
    }

    fn unsubscribe(&self, topic: &str, id: SubscriberId) {
        if let Some(subs) = self.topics.lock().get_mut(topic) {
            subs.retain(|(sid, _)| *sid != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn publishes_to_all_topic_subscribers() {
        let bus = SimulatedBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = count.clone();
            bus.subscribe(
                "slide_change",
                Arc::new(move |_| {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }
        // Unrelated topic must not receive it.
        let other = Arc::new(AtomicUsize::new(0));
        {
            let other = other.clone();
            bus.subscribe(
                "connect",
                Arc::new(move |_| {
                    other.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        bus.publish("slide_change", json!({"slideId": "x"}));
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(other.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribed_callback_no_longer_fires() {
        let bus = SimulatedBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        let id = {
            let count = count.clone();
            bus.subscribe(
                "slide_change",
                Arc::new(move |_| {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
            )
        };

        bus.publish("slide_change", json!({}));
        bus.unsubscribe("slide_change", id);
        bus.publish("slide_change", json!({}));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_may_reenter_the_bus() {
        let bus = Arc::new(SimulatedBus::new());
        let count = Arc::new(AtomicUsize::new(0));
        {
            let bus = bus.clone();
            let count = count.clone();
            bus.clone().subscribe(
                "outer",
                Arc::new(move |_| {
                    let count = count.clone();
                    bus.subscribe(
                        "inner",
                        Arc::new(move |_| {
                            count.fetch_add(1, Ordering::SeqCst);
                        }),
                    );
                }),
            );
        }

        bus.publish("outer", json!({}));
        bus.publish("inner", json!({}));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = SimulatedBus::new();
        bus.publish("nobody", json!({"ok": true}));
    }
}
