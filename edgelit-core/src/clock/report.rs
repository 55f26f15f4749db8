//! Per-iteration diagnostics

use crate::display::DisplayFrame;
use crate::scheduler::DueTasks;
use crate::time::{LocalTime, UtcInstant};
use crate::traits::FetchError;

/// A display refresh that was pushed out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Refresh {
    /// Local time the frame was built from
    pub local: LocalTime,
    pub frame: DisplayFrame,
}

/// Result of one resync attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncOutcome {
    /// Link state when the attempt started
    pub connected: bool,
    pub result: Result<UtcInstant, FetchError>,
    /// Failures in a row, including this one
    pub consecutive_failures: u32,
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// What one loop iteration did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IterationReport {
    pub due: DueTasks,
    pub refreshed: Option<Refresh>,
    pub resync: Option<SyncOutcome>,
}

/// Running totals over all resync attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncStatus {
    pub successes: u32,
    pub failures: u32,
    pub consecutive_failures: u32,
    pub last_error: Option<FetchError>,
}

impl SyncStatus {
    pub const fn new() -> Self {
        Self {
            successes: 0,
            failures: 0,
            consecutive_failures: 0,
            last_error: None,
        }
    }

    /// Account for one attempt
    pub fn record(&mut self, result: &Result<UtcInstant, FetchError>) {
        match result {
            Ok(_) => {
                self.successes = self.successes.saturating_add(1);
                self.consecutive_failures = 0;
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.last_error = Some(*e);
            }
        }
    }
}
