//! Current UTC time
//!
//! The keeper remembers the instant reported by the last successful sync
//! together with the uptime at which it arrived, and extrapolates from
//! there. Nothing but [`TimeKeeper::set`] changes that pair.

use super::instant::UtcInstant;

const MILLIS_PER_SECOND: u64 = 1_000;

/// Owner of the current UTC instant
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeKeeper {
    /// Instant reported by the last successful sync
    current_utc: UtcInstant,
    /// Uptime (ms) at which `current_utc` was captured
    captured_at_ms: u64,
    synced: bool,
}

impl TimeKeeper {
    /// Keeper at the epoch, not yet synced
    pub const fn new() -> Self {
        Self {
            current_utc: UtcInstant::EPOCH,
            captured_at_ms: 0,
            synced: false,
        }
    }

    /// Overwrite the current instant with a freshly fetched one
    ///
    /// Backward jumps are accepted as-is.
    pub fn set(&mut self, utc: UtcInstant, uptime_ms: u64) {
        self.current_utc = utc;
        self.captured_at_ms = uptime_ms;
        self.synced = true;
    }

    /// Current UTC instant at `uptime_ms`
    pub fn now(&self, uptime_ms: u64) -> UtcInstant {
        self.current_utc
            .saturating_add_seconds(self.age_ms(uptime_ms) / MILLIS_PER_SECOND)
    }

    /// Instant stored by the last sync, without extrapolation
    pub fn current_utc(&self) -> UtcInstant {
        self.current_utc
    }

    /// Milliseconds since the last sync (or since boot)
    pub fn age_ms(&self, uptime_ms: u64) -> u64 {
        uptime_ms.saturating_sub(self.captured_at_ms)
    }

    /// Whether any sync has succeeded yet
    pub fn is_synced(&self) -> bool {
        self.synced
    }
}
