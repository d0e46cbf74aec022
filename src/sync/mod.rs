//! Cross-device slide synchronization
//!
//! - `MessageBus` pub/sub seam with an in-process simulated transport
//! - `SlideSyncChannel` broadcasting the operator's slide selection

pub mod bus;
pub mod channel;

pub use bus::{MessageBus, SimulatedBus, SubscriberId};
pub use channel::{SlideChangeEvent, SlideSyncChannel};
