//! Clock loop configuration

use crate::time::zones::CENTRAL_EUROPE;
use crate::time::Timezone;

/// Display refresh interval (ms)
pub const DISPLAY_REFRESH_MS: u32 = 60_000;

/// Network resync interval (ms)
pub const RESYNC_INTERVAL_MS: u32 = 120_000;

/// Timing and timezone for the clock loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// Interval between display refreshes
    pub display_refresh_ms: u32,
    /// Interval between network time fetches
    pub resync_interval_ms: u32,
    /// Zone the display shows
    pub timezone: Timezone,
}

impl ClockConfig {
    pub const DEFAULT: Self = Self {
        display_refresh_ms: DISPLAY_REFRESH_MS,
        resync_interval_ms: RESYNC_INTERVAL_MS,
        timezone: CENTRAL_EUROPE,
    };
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
