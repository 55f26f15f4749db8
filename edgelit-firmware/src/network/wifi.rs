//! CYW43 WiFi bring-up and link supervision

use cyw43::{JoinOptions, PowerManagementMode, State};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use edgelit_core::config::MAX_HOSTNAME_LEN;
use embassy_net::{Config, DhcpConfig, Stack, StackResources};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::{bind_interrupts, Peri};
use embassy_time::Timer;
use heapless::String;
use static_cell::StaticCell;

use crate::config::{LINK_POLL_MS, WIFI_PASSWORD, WIFI_SSID};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// Peripherals wired to the CYW43 on the Pico W
pub struct WifiResources {
    pub pwr: Peri<'static, PIN_23>,
    pub cs: Peri<'static, PIN_25>,
    pub dio: Peri<'static, PIN_24>,
    pub clk: Peri<'static, PIN_29>,
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH0>,
}

type WifiSpi = PioSpi<'static, PIO0, 0, DMA_CH0>;

/// Bring up the radio and network stack
///
/// Returns once the chip is running; association happens in the
/// background and is visible through the stack's link state. `hostname`
/// is announced in DHCP requests.
pub async fn init(
    spawner: Spawner,
    r: WifiResources,
    hostname: String<MAX_HOSTNAME_LEN>,
) -> Stack<'static> {
    let pwr = Output::new(r.pwr, Level::Low);
    let cs = Output::new(r.cs, Level::High);

    let mut pio = Pio::new(r.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        r.dio,
        r.clk,
        r.dma,
    );

    static STATE: StaticCell<State> = StaticCell::new();
    let state = STATE.init(State::new());

    let fw = include_bytes!("../../cyw43-firmware/43439A0.bin");
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    unwrap!(spawner.spawn(cyw43_task(runner)));

    let clm = include_bytes!("../../cyw43-firmware/43439A0_clm.bin");
    control.init(clm).await;
    control
        .set_power_management(PowerManagementMode::PowerSave)
        .await;

    let mut rng = RoscRng;

    let mut dhcp = DhcpConfig::default();
    dhcp.hostname = Some(hostname);

    static RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        Config::dhcpv4(dhcp),
        RESOURCES.init(StackResources::<4>::new()),
        rng.next_u64(),
    );
    unwrap!(spawner.spawn(net_task(runner)));
    unwrap!(spawner.spawn(supervisor_task(control, stack)));

    stack
}

/// Join the network and rejoin whenever the link drops
#[embassy_executor::task]
pub async fn supervisor_task(mut control: cyw43::Control<'static>, stack: Stack<'static>) -> ! {
    loop {
        info!("Joining WiFi network {}", WIFI_SSID);
        while let Err(err) = control
            .join(WIFI_SSID, JoinOptions::new(WIFI_PASSWORD.as_bytes()))
            .await
        {
            warn!("Failed to join WiFi network with status {}", err.status);
            Timer::after_millis(LINK_POLL_MS).await;
        }

        info!("Waiting for DHCP");
        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            info!("DHCP is now up, address {}", config.address);
        }

        while stack.is_link_up() {
            Timer::after_millis(LINK_POLL_MS).await;
        }
        warn!("WiFi link lost");
    }
}

#[embassy_executor::task]
async fn cyw43_task(runner: cyw43::Runner<'static, Output<'static>, WifiSpi>) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
