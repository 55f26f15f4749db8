//! Network time source trait

use crate::time::UtcInstant;

/// Reasons a time fetch can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Network link is down
    NotConnected,
    /// Server hostname did not resolve
    DnsFailure,
    /// No reply within the source's latency bound
    Timeout,
    /// Reply was malformed or rejected
    InvalidResponse,
    /// Socket or driver error
    Transport,
}

/// Source of the current UTC time
///
/// A fetch must complete or fail within `WORST_CASE_LATENCY_MS`; the
/// clock loop blocks on it and has no other deadline.
#[allow(async_fn_in_trait)]
pub trait TimeSource {
    /// Upper bound on a single fetch, including timeouts
    const WORST_CASE_LATENCY_MS: u32;

    /// Fetch the current UTC instant
    async fn fetch_utc(&mut self) -> Result<UtcInstant, FetchError>;
}
