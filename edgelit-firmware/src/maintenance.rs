//! Watchdog servicing
//!
//! The watchdog is armed on the first service call, after bootstrap, so
//! the WiFi join and first sync may take as long as they need. From then
//! on every loop iteration feeds it and a hung loop resets the board.

use defmt::*;
use edgelit_core::traits::{MaintenanceService, TimeSource};
use embassy_rp::watchdog::Watchdog;
use embassy_rp::Peri;
use embassy_rp::peripherals::WATCHDOG;
use embassy_time::Duration;

use crate::config::WATCHDOG_PERIOD_MS;
use crate::network::ntp::NtpTimeSource;

// A resync stalls the loop; it must not outlast the watchdog
const _: () = core::assert!(
    <NtpTimeSource as TimeSource>::WORST_CASE_LATENCY_MS < WATCHDOG_PERIOD_MS,
    "NTP worst case exceeds the watchdog period"
);

pub struct WatchdogService {
    watchdog: Watchdog,
    armed: bool,
}

impl WatchdogService {
    pub fn new(watchdog: Peri<'static, WATCHDOG>) -> Self {
        Self {
            watchdog: Watchdog::new(watchdog),
            armed: false,
        }
    }
}

impl MaintenanceService for WatchdogService {
    fn service(&mut self) {
        if self.armed {
            self.watchdog.feed();
        } else {
            info!("Arming watchdog ({} ms)", WATCHDOG_PERIOD_MS);
            self.watchdog
                .start(Duration::from_millis(WATCHDOG_PERIOD_MS as u64));
            self.armed = true;
        }
    }
}
