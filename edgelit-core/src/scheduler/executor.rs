//! Timer bank for the clock loop
//!
//! Holds the display-refresh and resync timers and decides, from one
//! counter reading per iteration, which of the two actions are due.
//! Doing the actions is the caller's business.

use super::timer::{ScheduleTimer, Uptime};
use crate::config::ClockConfig;

/// Actions due in the current iteration, in the order to run them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DueTasks {
    /// Recompute local time and push it to the display
    pub display_refresh: bool,
    /// Fetch network time
    pub resync: bool,
}

impl DueTasks {
    /// Nothing to do this iteration
    pub fn is_idle(&self) -> bool {
        !self.display_refresh && !self.resync
    }
}

/// Clock scheduler
///
/// Both timers are reset as soon as they are reported due, so a resync
/// that fails still waits a full interval before the next attempt.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scheduler {
    display: ScheduleTimer<u32>,
    resync: ScheduleTimer<u32>,
    uptime: Uptime,
}

impl Scheduler {
    /// Create a scheduler with both timers anchored at counter zero
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            display: ScheduleTimer::new(config.display_refresh_ms),
            resync: ScheduleTimer::new(config.resync_interval_ms),
            uptime: Uptime::new(),
        }
    }

    /// Evaluate both timers against `now_ms`
    ///
    /// Display refresh is checked before resync.
    pub fn poll(&mut self, now_ms: u32) -> DueTasks {
        self.uptime.update(now_ms);
        DueTasks {
            display_refresh: self.display.poll(now_ms),
            resync: self.resync.poll(now_ms),
        }
    }

    /// Extend `now_ms` into uptime without touching the timers
    pub fn track(&mut self, now_ms: u32) -> u64 {
        self.uptime.update(now_ms)
    }

    /// Uptime as of the last poll
    pub fn uptime_ms(&self) -> u64 {
        self.uptime.total_ms()
    }

    pub fn display_timer(&self) -> &ScheduleTimer<u32> {
        &self.display
    }

    pub fn resync_timer(&self) -> &ScheduleTimer<u32> {
        &self.resync
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}
