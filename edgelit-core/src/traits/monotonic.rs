//! Monotonic millisecond counter

/// Milliseconds since boot, wrapping at `u32::MAX`
///
/// The scheduler tolerates the wrap; callers must not assume the value
/// only grows.
pub trait MonotonicClock {
    fn now_ms(&self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
