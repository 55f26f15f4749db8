//! Edgelit - Network-Synchronized Edge-Lit Clock Firmware
//!
//! Main firmware binary for the Raspberry Pi Pico W. Four edge-lit
//! acrylic digit stacks are driven through a shift-register chain, and
//! the time comes from NTP over WiFi.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_net::Stack;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::{Level, Output};
use portable_atomic as _;
use {defmt_rtt as _, panic_probe as _};

use edgelit_core::clock::{Clock, Refresh, SyncOutcome};
use edgelit_core::config::device_hostname;
use edgelit_core::time::LocalTime;
use edgelit_drivers::display::ShiftRegisterDisplay;

use crate::clock::EmbassyClock;
use crate::config::{CLOCK, FLASH_SIZE};
use crate::maintenance::WatchdogService;
use crate::network::wifi::{self, WifiResources};
use crate::network::{NtpTimeSource, WifiLink};

mod clock;
mod config;
mod maintenance;
mod network;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Edgelit firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Shift-register bus: data GPIO16, clock GPIO14, latch GPIO12
    let display = ShiftRegisterDisplay::new(
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_12, Level::High),
    );

    // Flash unique ID, the RP2040 has no chip ID of its own
    let mut uid = [0u8; 8];
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(p.FLASH);
    if let Err(e) = flash.blocking_unique_id(&mut uid) {
        warn!("Failed to read flash unique ID: {:?}", e);
    }
    let hostname = device_hostname(&uid);
    info!("Hostname: {}", hostname.as_str());

    let stack = wifi::init(
        spawner,
        WifiResources {
            pwr: p.PIN_23,
            cs: p.PIN_25,
            dio: p.PIN_24,
            clk: p.PIN_29,
            pio: p.PIO0,
            dma: p.DMA_CH0,
        },
        hostname,
    )
    .await;
    info!("WiFi chip initialized");

    let mut clock = Clock::new(
        CLOCK,
        display,
        NtpTimeSource::new(stack),
        WifiLink::new(stack),
        WatchdogService::new(p.WATCHDOG),
        EmbassyClock,
    );

    match clock.bootstrap().await {
        Ok(outcome) => log_sync(&outcome, stack, &clock.local_now()),
        Err(e) => match e {},
    }
    info!("Bootstrap complete, entering main loop");

    loop {
        let report = match clock.run_iteration().await {
            Ok(report) => report,
            Err(e) => match e {},
        };
        if let Some(refresh) = &report.refreshed {
            log_refresh(refresh);
        }
        if let Some(outcome) = &report.resync {
            log_sync(outcome, stack, &clock.local_now());
        }
        embassy_futures::yield_now().await;
    }
}

fn log_refresh(refresh: &Refresh) {
    info!(
        "Display {} {}",
        refresh.local.to_text().as_str(),
        refresh.local.abbreviation
    );
}

fn log_sync(outcome: &SyncOutcome, stack: Stack<'_>, local: &LocalTime) {
    info!("WiFi connected: {}", outcome.connected);
    if let Some(config) = stack.config_v4() {
        info!("IP: {}", config.address);
    }
    match outcome.result {
        Ok(utc) => info!(
            "Adjusted local clock: {} {} ({} s UTC)",
            local.to_text().as_str(),
            local.abbreviation,
            utc.unix_seconds()
        ),
        Err(e) => warn!(
            "NTP update failed: {:?} ({} in a row)",
            e, outcome.consecutive_failures
        ),
    }
}
