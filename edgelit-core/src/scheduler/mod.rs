//! Clock scheduler
//!
//! Wrap-safe periodic timers and the timer bank that drives the
//! display refresh and network resync.

pub mod executor;
pub mod timer;

pub use executor::{DueTasks, Scheduler};
pub use timer::{ScheduleTimer, Ticks, Uptime};
