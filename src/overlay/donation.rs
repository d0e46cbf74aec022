//! Donation presentation
//!
//! Owns the single auto-hide timer for donation call-to-actions. At most one
//! timer is outstanding; activating a donation cancels the previous timer
//! before anything else, and a manual hide cancels it so a stale timer can
//! never clear a later activation.

use super::config::DonationDisplayMode;
use super::store::OverlayStore;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Timer-owning wrapper around the store's donation operations
pub struct DonationPresenter {
    store: Arc<OverlayStore>,
    timer: Mutex<Option<JoinHandle<()>>>,
    /// Bumped on every cancel; a timer only clears if its generation is
    /// still current when it fires.
    generation: Arc<AtomicU64>,
}

impl DonationPresenter {
    pub fn new(store: Arc<OverlayStore>) -> Self {
        Self {
            store,
            timer: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Show a donation, or toggle it off when (id, mode) is already active.
    /// Unknown ids are ignored.
    pub fn trigger(&self, id: Uuid, mode: DonationDisplayMode) {
        let config = self.store.snapshot();
        if config.active_donation_id == Some(id) && config.donation_display_mode == mode {
            self.hide();
            return;
        }

        let Some(duration) = config.donation(id).map(|d| Duration::from_secs(d.duration)) else {
            tracing::debug!(%id, "Ignoring trigger for unknown donation");
            return;
        };

        // Cancel any previous timer before any other effect.
        let generation = self.cancel_timer();

        tracing::info!(%id, ?mode, "Showing donation");
        self.store.activate_donation(id, mode);

        let store = self.store.clone();
        let gen_counter = self.generation.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if gen_counter.load(Ordering::SeqCst) == generation {
                tracing::info!(%id, "Donation display time elapsed, hiding");
                store.clear_active_donation();
            }
        });
        *self.timer.lock() = Some(handle);
    }

    /// Take the active donation off screen, cancelling the pending timer
    pub fn hide(&self) {
        self.cancel_timer();
        self.store.clear_active_donation();
    }

    /// Delete a donation. The active one is hidden first so its timer cannot
    /// later clear an unrelated activation.
    pub fn remove_donation(&self, id: Uuid) {
        if self.store.snapshot().active_donation_id == Some(id) {
            self.hide();
        }
        self.store.remove_donation(id);
    }

    /// Invalidate the outstanding timer. Returns the generation a newly
    /// scheduled timer should carry.
    fn cancel_timer(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
        }
        generation
    }
}

impl Drop for DonationPresenter {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
