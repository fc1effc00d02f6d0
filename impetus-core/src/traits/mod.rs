//! Hardware abstraction traits
//!
//! These traits define the interface between the timer logic and the
//! board-specific watch face, vibration motor, backlight and phone link.
//! Every call is fire-and-forget from the core's point of view.

pub mod face;
pub mod haptics;
pub mod link;

pub use face::{TextField, WatchFace};
pub use haptics::{Backlight, Haptics};
pub use link::{LinkError, PhoneLink};

/// Everything the controller drives
///
/// Implemented automatically for any type providing all four traits.
pub trait Device: WatchFace + Haptics + Backlight + PhoneLink {}

impl<T> Device for T where T: WatchFace + Haptics + Backlight + PhoneLink {}
