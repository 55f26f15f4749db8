//! Network time configuration

/// NTP server settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NtpConfig {
    /// Server hostname, resolved on every fetch
    pub server: &'static str,
    /// UDP port
    pub port: u16,
    /// Wait before the first request after the link comes up (ms)
    pub settle_delay_ms: u32,
    /// Reply timeout per request (ms)
    pub timeout_ms: u32,
    /// Added to every fetched instant (s); 0 keeps plain UTC
    pub base_offset_s: i32,
}

impl NtpConfig {
    pub const DEFAULT: Self = Self {
        server: "europe.pool.ntp.org",
        port: 123,
        settle_delay_ms: 1_000,
        timeout_ms: 3_000,
        base_offset_s: 0,
    };
}

impl Default for NtpConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
