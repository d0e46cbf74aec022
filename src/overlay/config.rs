//! Broadcast overlay configuration
//!
//! One shared document describing everything the renderer composites over
//! the live feed: layout, branding, lower thirds, the prayer ticker, and
//! donation call-to-actions. Mutated only through `OverlayStore`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the camera feed and slide content share the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastLayout {
    FullCam,
    Pip,
    Split,
}

/// Lower-third size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LowerThirdSize {
    Small,
    Standard,
    Large,
    Xl,
}

/// Donation presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationDisplayMode {
    /// Card composited over the feed
    Overlay,
    /// Covers the entire frame
    Fullscreen,
}

/// A persistent identifying graphic near the bottom of frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowerThirdItem {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    /// Profile picture or icon
    pub image_url: Option<String>,
}

impl LowerThirdItem {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            subtitle: subtitle.into(),
            image_url: None,
        }
    }
}

/// One request on the prayer ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRequest {
    pub id: Uuid,
    pub name: String,
    pub content: String,
}

impl PrayerRequest {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A donation call-to-action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Payment link, rendered as a QR code
    pub url: String,
    /// Seconds the call-to-action stays on screen
    pub duration: u64,
}

impl DonationItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>, duration: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            url: url.into(),
            duration,
        }
    }
}

/// The whole overlay document
///
/// Invariants, enforced by every `OverlayStore` transform:
/// - `active_lower_third_index` indexes an existing item, or is 0 when the
///   collection is empty
/// - `active_donation_id`, if set, references an existing donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastOverlayConfig {
    // Global
    pub layout: BroadcastLayout,

    // Branding
    pub logo_url: Option<String>,
    pub show_logo: bool,

    // Lower thirds
    pub lower_thirds: Vec<LowerThirdItem>,
    pub active_lower_third_index: usize,
    pub show_lower_third: bool,
    pub lower_third_size: LowerThirdSize,

    // Rotation
    pub is_rotating: bool,
    /// Seconds between rotation steps
    pub rotation_interval: u64,

    // Prayer wall
    pub prayer_requests: Vec<PrayerRequest>,
    pub show_prayer_ticker: bool,

    // Donations
    pub donations: Vec<DonationItem>,
    pub active_donation_id: Option<Uuid>,
    pub donation_display_mode: DonationDisplayMode,
}

impl Default for BroadcastOverlayConfig {
    fn default() -> Self {
        Self {
            layout: BroadcastLayout::FullCam,
            logo_url: None,
            show_logo: true,
            lower_thirds: Vec::new(),
            active_lower_third_index: 0,
            show_lower_third: false,
            lower_third_size: LowerThirdSize::Standard,
            is_rotating: false,
            rotation_interval: 15,
            prayer_requests: Vec::new(),
            show_prayer_ticker: false,
            donations: Vec::new(),
            active_donation_id: None,
            donation_display_mode: DonationDisplayMode::Overlay,
        }
    }
}

impl BroadcastOverlayConfig {
    /// The lower third currently on screen, if any
    pub fn active_lower_third(&self) -> Option<&LowerThirdItem> {
        self.lower_thirds.get(self.active_lower_third_index)
    }

    /// The donation currently on screen, if any
    pub fn active_donation(&self) -> Option<&DonationItem> {
        let id = self.active_donation_id?;
        self.donations.iter().find(|d| d.id == id)
    }

    pub fn donation(&self, id: Uuid) -> Option<&DonationItem> {
        self.donations.iter().find(|d| d.id == id)
    }
}
