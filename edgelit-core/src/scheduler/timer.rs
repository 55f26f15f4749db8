//! Periodic timers over a wrapping millisecond counter
//!
//! `now.wrapping_sub(last_fired)` is the true elapsed time as long as the
//! real gap is shorter than one full counter period, whichever side of a
//! wrap the two readings fall on.

/// Unsigned millisecond counter that wraps at its maximum value
pub trait Ticks: Copy + Ord {
    /// Counter value at boot
    const ZERO: Self;

    /// Time from `earlier` to `self`, modulo the counter period
    fn wrapping_elapsed(self, earlier: Self) -> Self;
}

macro_rules! impl_ticks {
    ($($t:ty),*) => {
        $(
            impl Ticks for $t {
                const ZERO: Self = 0;

                fn wrapping_elapsed(self, earlier: Self) -> Self {
                    self.wrapping_sub(earlier)
                }
            }
        )*
    };
}

impl_ticks!(u16, u32, u64);

/// A periodic trigger: last-fired timestamp plus interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleTimer<T = u32> {
    last_fired: T,
    interval: T,
}

impl<T: Ticks> ScheduleTimer<T> {
    /// Timer that first fires one `interval` after counter zero
    pub const fn new(interval: T) -> Self {
        Self {
            last_fired: T::ZERO,
            interval,
        }
    }

    /// Timer that last fired at `last_fired`
    pub const fn with_last_fired(interval: T, last_fired: T) -> Self {
        Self {
            last_fired,
            interval,
        }
    }

    pub fn interval(&self) -> T {
        self.interval
    }

    pub fn last_fired(&self) -> T {
        self.last_fired
    }

    /// Time since the timer last fired
    pub fn elapsed(&self, now: T) -> T {
        now.wrapping_elapsed(self.last_fired)
    }

    /// Whether a full interval has passed since the last firing
    pub fn is_due(&self, now: T) -> bool {
        self.elapsed(now) >= self.interval
    }

    /// Mark the timer as fired at `now`
    pub fn reset(&mut self, now: T) {
        self.last_fired = now;
    }

    /// Fire if due, returning whether it did
    pub fn poll(&mut self, now: T) -> bool {
        if self.is_due(now) {
            self.reset(now);
            true
        } else {
            false
        }
    }
}

/// 64-bit uptime built from a wrapping 32-bit millisecond counter
///
/// Must be updated at least once per counter period (about 49.7 days),
/// which the scheduler loop does on every iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uptime {
    last_raw: u32,
    total_ms: u64,
}

impl Uptime {
    pub const fn new() -> Self {
        Self {
            last_raw: 0,
            total_ms: 0,
        }
    }

    /// Account for a new counter reading and return the total uptime
    pub fn update(&mut self, raw_ms: u32) -> u64 {
        self.total_ms += raw_ms.wrapping_elapsed(self.last_raw) as u64;
        self.last_raw = raw_ms;
        self.total_ms
    }

    /// Uptime as of the last update
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }
}
