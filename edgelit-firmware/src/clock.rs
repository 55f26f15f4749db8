//! Monotonic millisecond counter backed by the embassy time driver

use edgelit_core::traits::MonotonicClock;
use embassy_time::Instant;

/// Milliseconds since boot, truncated to 32 bits
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter the scheduler expects
        Instant::now().as_millis() as u32
    }
}
