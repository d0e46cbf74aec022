//! Overlay state store
//!
//! Single owner of the `BroadcastOverlayConfig` document. Every mutation is a
//! pure `(previous) -> next` transform applied against the latest value, so
//! timer-driven and operator-driven updates can interleave without losing
//! writes. Consumers (renderer, rotator) observe the document through a
//! `watch` receiver and re-read a snapshot on change.

use super::config::{
    BroadcastLayout, BroadcastOverlayConfig, DonationDisplayMode, DonationItem, LowerThirdItem,
    LowerThirdSize, PrayerRequest,
};
use tokio::sync::watch;
use uuid::Uuid;

/// Shared overlay document with copy-on-write mutation
#[derive(Debug)]
pub struct OverlayStore {
    tx: watch::Sender<BroadcastOverlayConfig>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::with_config(BroadcastOverlayConfig::default())
    }

    pub fn with_config(config: BroadcastOverlayConfig) -> Self {
        let (tx, _) = watch::channel(config);
        Self { tx }
    }

    /// Read-only copy of the current document
    pub fn snapshot(&self) -> BroadcastOverlayConfig {
        self.tx.borrow().clone()
    }

    /// Observe document changes
    pub fn subscribe(&self) -> watch::Receiver<BroadcastOverlayConfig> {
        self.tx.subscribe()
    }

    /// Apply a pure transform against the latest document.
    ///
    /// The transform runs under the channel's internal lock, so two
    /// concurrent updates always compose rather than clobber each other.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(BroadcastOverlayConfig) -> BroadcastOverlayConfig,
    {
        self.tx.send_modify(|config| {
            *config = f(config.clone());
        });
    }

    // --- Layout & branding ---

    pub fn set_layout(&self, layout: BroadcastLayout) {
        self.update(|prev| BroadcastOverlayConfig { layout, ..prev });
    }

    pub fn set_logo(&self, logo_url: Option<String>) {
        self.update(|prev| BroadcastOverlayConfig { logo_url, ..prev });
    }

    pub fn toggle_logo(&self, visible: bool) {
        self.update(|prev| BroadcastOverlayConfig {
            show_logo: visible,
            ..prev
        });
    }

    // --- Lower thirds ---

    /// Add an item and switch the active index to it
    pub fn add_lower_third(&self, item: LowerThirdItem) {
        self.update(|mut prev| {
            prev.active_lower_third_index = prev.lower_thirds.len();
            prev.lower_thirds.push(item);
            prev
        });
    }

    /// Remove an item by id. The active index always resets to 0, whichever
    /// item was removed. Unknown ids still reset the index.
    pub fn remove_lower_third(&self, id: Uuid) {
        self.update(|mut prev| {
            prev.lower_thirds.retain(|i| i.id != id);
            prev.active_lower_third_index = 0;
            prev
        });
    }

    /// Select the item to show. Out-of-range indices are ignored.
    pub fn set_active_lower_third(&self, index: usize) {
        self.update(|mut prev| {
            if index < prev.lower_thirds.len() {
                prev.active_lower_third_index = index;
            }
            prev
        });
    }

    /// Modular step to the next item; used by the rotator
    pub fn advance_lower_third(&self) {
        self.update(|mut prev| {
            if prev.lower_thirds.len() > 1 {
                prev.active_lower_third_index =
                    (prev.active_lower_third_index + 1) % prev.lower_thirds.len();
            }
            prev
        });
    }

    pub fn toggle_lower_third(&self, visible: bool) {
        self.update(|prev| BroadcastOverlayConfig {
            show_lower_third: visible,
            ..prev
        });
    }

    pub fn set_lower_third_size(&self, size: LowerThirdSize) {
        self.update(|prev| BroadcastOverlayConfig {
            lower_third_size: size,
            ..prev
        });
    }

    pub fn set_rotation(&self, enabled: bool, interval_seconds: u64) {
        self.update(|prev| BroadcastOverlayConfig {
            is_rotating: enabled,
            rotation_interval: interval_seconds.max(1),
            ..prev
        });
    }

    // --- Prayer wall ---

    pub fn add_prayer_request(&self, request: PrayerRequest) {
        self.update(|mut prev| {
            prev.prayer_requests.push(request);
            prev
        });
    }

    pub fn remove_prayer_request(&self, id: Uuid) {
        self.update(|mut prev| {
            prev.prayer_requests.retain(|r| r.id != id);
            prev
        });
    }

    pub fn toggle_prayer_ticker(&self, visible: bool) {
        self.update(|prev| BroadcastOverlayConfig {
            show_prayer_ticker: visible,
            ..prev
        });
    }

    // --- Donations ---
    //
    // These are the pure state halves; `DonationPresenter` layers the
    // auto-hide timer discipline on top.

    pub fn add_donation(&self, item: DonationItem) {
        self.update(|mut prev| {
            prev.donations.push(item);
            prev
        });
    }

    /// Remove a donation. If it is the active one, the active id is cleared
    /// in the same transform so no reader ever sees a dangling reference.
    pub fn remove_donation(&self, id: Uuid) {
        self.update(|mut prev| {
            prev.donations.retain(|d| d.id != id);
            if prev.active_donation_id == Some(id) {
                prev.active_donation_id = None;
            }
            prev
        });
    }

    /// Put a donation on screen. Unknown ids are ignored.
    pub fn activate_donation(&self, id: Uuid, mode: DonationDisplayMode) {
        self.update(|mut prev| {
            if prev.donations.iter().any(|d| d.id == id) {
                prev.active_donation_id = Some(id);
                prev.donation_display_mode = mode;
            }
            prev
        });
    }

    /// Take the active donation off screen. The display mode is untouched.
    pub fn clear_active_donation(&self) {
        self.update(|mut prev| {
            prev.active_donation_id = None;
            prev
        });
    }
}

impl Default for OverlayStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_lower_third_activates_new_item() {
        let store = OverlayStore::new();
        store.add_lower_third(LowerThirdItem::new("Pastor John", "Senior Pastor"));
        store.add_lower_third(LowerThirdItem::new("Sarah", "Worship Leader"));

        let config = store.snapshot();
        assert_eq!(config.lower_thirds.len(), 2);
        assert_eq!(config.active_lower_third_index, 1);
        assert_eq!(config.active_lower_third().unwrap().title, "Sarah");
    }

    #[test]
    fn remove_lower_third_always_resets_index() {
        let store = OverlayStore::new();
        let a = LowerThirdItem::new("a", "");
        let b = LowerThirdItem::new("b", "");
        let b_id = b.id;
        store.add_lower_third(a);
        store.add_lower_third(b);
        assert_eq!(store.snapshot().active_lower_third_index, 1);

        // Removing a non-active item still resets to 0.
        store.remove_lower_third(b_id);
        let config = store.snapshot();
        assert_eq!(config.active_lower_third_index, 0);
        assert_eq!(config.lower_thirds.len(), 1);
    }

    #[test]
    fn active_index_stays_in_range_under_any_sequence() {
        let store = OverlayStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            let item = LowerThirdItem::new(format!("item {i}"), "");
            ids.push(item.id);
            store.add_lower_third(item);
        }
        for id in ids {
            let config = store.snapshot();
            assert!(
                config.lower_thirds.is_empty() && config.active_lower_third_index == 0
                    || config.active_lower_third_index < config.lower_thirds.len()
            );
            store.remove_lower_third(id);
        }
        let config = store.snapshot();
        assert!(config.lower_thirds.is_empty());
        assert_eq!(config.active_lower_third_index, 0);
    }

    #[test]
    fn set_active_lower_third_ignores_out_of_range() {
        let store = OverlayStore::new();
        store.add_lower_third(LowerThirdItem::new("a", ""));
        store.set_active_lower_third(7);
        assert_eq!(store.snapshot().active_lower_third_index, 0);
    }

    #[test]
    fn advance_wraps_and_ignores_short_lists() {
        let store = OverlayStore::new();
        store.advance_lower_third();
        assert_eq!(store.snapshot().active_lower_third_index, 0);

        store.add_lower_third(LowerThirdItem::new("a", ""));
        store.advance_lower_third();
        assert_eq!(store.snapshot().active_lower_third_index, 0);

        store.add_lower_third(LowerThirdItem::new("b", ""));
        store.set_active_lower_third(1);
        store.advance_lower_third();
        assert_eq!(store.snapshot().active_lower_third_index, 0);
    }

    #[test]
    fn remove_active_donation_clears_reference_atomically() {
        let store = OverlayStore::new();
        let donation = DonationItem::new("Offering", "https://give.example", 30);
        let id = donation.id;
        store.add_donation(donation);
        store.activate_donation(id, DonationDisplayMode::Fullscreen);
        assert_eq!(store.snapshot().active_donation_id, Some(id));

        store.remove_donation(id);
        let config = store.snapshot();
        assert!(config.donations.is_empty());
        assert_eq!(config.active_donation_id, None);
        // Mode is left as-is.
        assert_eq!(config.donation_display_mode, DonationDisplayMode::Fullscreen);
    }

    #[test]
    fn activate_unknown_donation_is_ignored() {
        let store = OverlayStore::new();
        store.activate_donation(Uuid::new_v4(), DonationDisplayMode::Overlay);
        assert_eq!(store.snapshot().active_donation_id, None);
    }

    #[test]
    fn updates_compose_from_latest_state() {
        let store = OverlayStore::new();
        // Two transforms issued back to back; the second must see the first's
        // result, not the initial snapshot.
        store.update(|mut prev| {
            prev.rotation_interval = 5;
            prev
        });
        store.update(|mut prev| {
            prev.rotation_interval += 1;
            prev
        });
        assert_eq!(store.snapshot().rotation_interval, 6);
    }

    #[test]
    fn prayer_requests_append_and_remove() {
        let store = OverlayStore::new();
        let req = PrayerRequest::new("Sarah", "Safe travels");
        let id = req.id;
        store.add_prayer_request(req);
        store.add_prayer_request(PrayerRequest::new("Dan", "Healing"));
        assert_eq!(store.snapshot().prayer_requests.len(), 2);

        store.remove_prayer_request(id);
        let config = store.snapshot();
        assert_eq!(config.prayer_requests.len(), 1);
        assert_eq!(config.prayer_requests[0].name, "Dan");
    }
}
