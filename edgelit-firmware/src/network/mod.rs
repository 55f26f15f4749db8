//! Networking: WiFi association, link state and NTP

pub mod link;
pub mod ntp;
pub mod wifi;

pub use link::WifiLink;
pub use ntp::NtpTimeSource;
