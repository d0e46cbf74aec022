//! Lower-third rotation
//!
//! Background task advancing the active lower third on a fixed cadence while
//! the overlay is visible, rotation is enabled, and there is more than one
//! item. The timer is re-armed from scratch whenever any of those inputs
//! change and is never live while the precondition is false.

use super::config::BroadcastOverlayConfig;
use super::store::OverlayStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Inputs the timer is keyed on. Any change tears the timer down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RotationParams {
    interval: Duration,
    item_count: usize,
}

fn rotation_params(config: &BroadcastOverlayConfig) -> Option<RotationParams> {
    if config.show_lower_third && config.is_rotating && config.lower_thirds.len() > 1 {
        Some(RotationParams {
            interval: Duration::from_secs(config.rotation_interval.max(1)),
            item_count: config.lower_thirds.len(),
        })
    } else {
        None
    }
}

/// Timer-driven rotation over the overlay store
pub struct LowerThirdRotator {
    handle: JoinHandle<()>,
}

impl LowerThirdRotator {
    /// Spawn the rotation task. It runs until the rotator is dropped or the
    /// store goes away.
    pub fn spawn(store: Arc<OverlayStore>) -> Self {
        let mut rx = store.subscribe();
        let handle = tokio::spawn(async move {
            let mut params = rotation_params(&rx.borrow());
            loop {
                match params {
                    Some(active) => {
                        let sleep = tokio::time::sleep(active.interval);
                        tokio::pin!(sleep);
                        loop {
                            tokio::select! {
                                _ = &mut sleep => {
                                    tracing::debug!("Rotating lower third");
                                    store.advance_lower_third();
                                    sleep.as_mut().reset(
                                        tokio::time::Instant::now() + active.interval,
                                    );
                                }
                                changed = rx.changed() => {
                                    if changed.is_err() {
                                        return;
                                    }
                                    let next = rotation_params(&rx.borrow());
                                    if next != params {
                                        params = next;
                                        break;
                                    }
                                }
                            }
                        }
                    }
                    None => {
                        // Parked until the precondition can become true.
                        if rx.changed().await.is_err() {
                            return;
                        }
                        params = rotation_params(&rx.borrow());
                    }
                }
            }
        });
        Self { handle }
    }
}

impl Drop for LowerThirdRotator {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::config::LowerThirdItem;

    async fn settle() {
        // Let the rotation task observe the latest config change.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }

    fn store_with_items(n: usize) -> Arc<OverlayStore> {
        let store = Arc::new(OverlayStore::new());
        for i in 0..n {
            store.add_lower_third(LowerThirdItem::new(format!("item {i}"), ""));
        }
        store
    }

    #[tokio::test(start_paused = true)]
    async fn rotates_on_interval_and_wraps() {
        let store = store_with_items(3);
        store.toggle_lower_third(true);
        store.set_rotation(true, 10);
        let _rotator = LowerThirdRotator::spawn(store.clone());
        settle().await;

        // add_lower_third left index at 2; the wrap comes first.
        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(store.snapshot().active_lower_third_index, 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(store.snapshot().active_lower_third_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn never_fires_while_precondition_false() {
        let store = store_with_items(3);
        // Rotation enabled but overlay hidden.
        store.set_rotation(true, 5);
        let _rotator = LowerThirdRotator::spawn(store.clone());
        settle().await;

        let before = store.snapshot().active_lower_third_index;
        tokio::time::sleep(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(store.snapshot().active_lower_third_index, before);
    }

    #[tokio::test(start_paused = true)]
    async fn single_item_never_rotates() {
        let store = store_with_items(1);
        store.toggle_lower_third(true);
        store.set_rotation(true, 5);
        let _rotator = LowerThirdRotator::spawn(store.clone());
        settle().await;

        tokio::time::sleep(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(store.snapshot().active_lower_third_index, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_change_rearms_timer() {
        let store = store_with_items(2);
        store.set_active_lower_third(0);
        store.toggle_lower_third(true);
        store.set_rotation(true, 30);
        let _rotator = LowerThirdRotator::spawn(store.clone());
        settle().await;

        // Partway through the 30s period, switch to a 5s interval; the old
        // deadline must be discarded.
        tokio::time::sleep(Duration::from_secs(20)).await;
        store.set_rotation(true, 5);
        settle().await;

        tokio::time::sleep(Duration::from_secs(4)).await;
        settle().await;
        assert_eq!(store.snapshot().active_lower_third_index, 0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(store.snapshot().active_lower_third_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn disabling_rotation_stops_timer() {
        let store = store_with_items(2);
        store.set_active_lower_third(0);
        store.toggle_lower_third(true);
        store.set_rotation(true, 5);
        let _rotator = LowerThirdRotator::spawn(store.clone());
        settle().await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(store.snapshot().active_lower_third_index, 1);

        store.set_rotation(false, 5);
        settle().await;
        tokio::time::sleep(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(store.snapshot().active_lower_third_index, 1);
    }
}
