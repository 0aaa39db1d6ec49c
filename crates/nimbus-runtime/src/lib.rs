//! Nimbus Runtime - Loop timing and device orientation
//!
//! Provides the building blocks the update loop consumes each tick:
//! - `TickClock` - monotonic elapsed-time measurement for fixed-cadence loops
//! - `OrientationFilter` - gravity samples to in-plane / toward-viewer angles
//! - `DelayRotateController` / `RotationState` - eased per-axis angle followers

mod clock;
mod orientation;
mod rotation;

pub use clock::TickClock;
pub use orientation::OrientationFilter;
pub use rotation::{DelayRotateController, RotationState};
