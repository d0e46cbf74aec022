//! Broadcast overlay system
//!
//! - One shared `BroadcastOverlayConfig` document behind `OverlayStore`
//! - `LowerThirdRotator` advancing the active lower third on a timer
//! - `DonationPresenter` owning the donation auto-hide timer

pub mod config;
pub mod donation;
pub mod rotator;
pub mod store;

pub use config::{
    BroadcastLayout, BroadcastOverlayConfig, DonationDisplayMode, DonationItem, LowerThirdItem,
    LowerThirdSize, PrayerRequest,
};
pub use donation::DonationPresenter;
pub use rotator::LowerThirdRotator;
pub use store::OverlayStore;
