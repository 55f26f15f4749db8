//! Hardware and network abstraction traits
//!
//! These traits define the interface between the clock logic and the
//! board-specific implementations in the firmware and driver crates.

pub mod display;
pub mod maintenance;
pub mod monotonic;
pub mod network;
pub mod time_source;

pub use display::DigitDisplay;
pub use maintenance::MaintenanceService;
pub use monotonic::MonotonicClock;
pub use network::NetworkLink;
pub use time_source::{FetchError, TimeSource};
