//! Build-time firmware configuration

use edgelit_core::config::{ClockConfig, NtpConfig};

/// Network to join, from the build environment
pub const WIFI_SSID: &str = env!("WIFI_SSID");

/// Passphrase for [`WIFI_SSID`], from the build environment
pub const WIFI_PASSWORD: &str = env!("WIFI_PASSWORD");

/// Clock loop timing and timezone
pub const CLOCK: ClockConfig = ClockConfig::DEFAULT;

/// NTP server and timeouts
pub const NTP: NtpConfig = NtpConfig::DEFAULT;

/// Watchdog period (ms); the RP2040 tops out at about 8.3 s
pub const WATCHDOG_PERIOD_MS: u32 = 8_000;

/// Interval between link checks once joined (ms)
pub const LINK_POLL_MS: u64 = 5_000;

/// Pico W flash size, for the flash driver used to read the unique ID
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
