//! Session deck and navigation
//!
//! - Slide/session schema shared with companion devices
//! - SlideNavigator computing two-level next/prev positions

pub mod navigator;
pub mod schema;

pub use navigator::{NavigatorPosition, SlideNavigator};
pub use schema::{Session, Slide, SlideContent, SlideType};
