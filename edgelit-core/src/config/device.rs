//! Device identity on the network

use core::fmt::Write;

use heapless::String;

/// Prefix of the DHCP hostname
pub const HOSTNAME_PREFIX: &str = "CLOCK-";

/// Hostname capacity, matching the DHCP client's limit
pub const MAX_HOSTNAME_LEN: usize = 32;

/// Hostname announced over DHCP: the prefix followed by the chip's
/// unique ID in upper-case hex
///
/// IDs too long to fit are truncated at the last whole byte.
pub fn device_hostname(unique_id: &[u8]) -> String<MAX_HOSTNAME_LEN> {
    let mut hostname = String::new();
    let _ = hostname.push_str(HOSTNAME_PREFIX);
    for byte in unique_id {
        if hostname.len() + 2 > MAX_HOSTNAME_LEN {
            break;
        }
        let _ = write!(hostname, "{:02X}", byte);
    }
    hostname
}
