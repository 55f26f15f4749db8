//! SNTP time source
//!
//! Each fetch waits out the settle delay, resolves the server and does a
//! single SNTP exchange. DNS and the exchange share one timeout, so a
//! fetch never takes longer than `settle_delay_ms + timeout_ms`.

use core::net::{IpAddr, SocketAddr};

use defmt::*;
use edgelit_core::time::UtcInstant;
use edgelit_core::traits::{FetchError, TimeSource};
use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration, Instant, Timer};
use sntpc::{NtpContext, NtpTimestampGenerator};
use sntpc_net_embassy::UdpSocketWrapper;

use crate::config::NTP;

/// Local UDP port for requests
const LOCAL_PORT: u16 = 123;

const SOCKET_BUFFER_LEN: usize = 256;
const SOCKET_META_LEN: usize = 4;

/// NTP client over the embassy-net stack
pub struct NtpTimeSource {
    stack: Stack<'static>,
}

impl NtpTimeSource {
    pub fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }

    async fn exchange(&self) -> Result<u32, FetchError> {
        let addrs = self
            .stack
            .dns_query(NTP.server, DnsQueryType::A)
            .await
            .map_err(|e| {
                warn!("DNS lookup for {} failed: {:?}", NTP.server, e);
                FetchError::DnsFailure
            })?;
        let addr: IpAddr = addrs.first().copied().ok_or(FetchError::DnsFailure)?.into();

        let mut rx_meta = [PacketMetadata::EMPTY; SOCKET_META_LEN];
        let mut rx_buffer = [0; SOCKET_BUFFER_LEN];
        let mut tx_meta = [PacketMetadata::EMPTY; SOCKET_META_LEN];
        let mut tx_buffer = [0; SOCKET_BUFFER_LEN];

        let mut socket = UdpSocket::new(
            self.stack,
            &mut rx_meta,
            &mut rx_buffer,
            &mut tx_meta,
            &mut tx_buffer,
        );
        socket.bind(LOCAL_PORT).map_err(|e| {
            warn!("NTP socket bind failed: {:?}", e);
            FetchError::Transport
        })?;
        let socket = UdpSocketWrapper::new(socket);

        let context = NtpContext::new(UptimeTimestamp);
        let result = sntpc::get_time(SocketAddr::new(addr, NTP.port), &socket, context)
            .await
            .map_err(|e| {
                warn!("NTP exchange failed: {:?}", e);
                match e {
                    sntpc::Error::Network => FetchError::Transport,
                    sntpc::Error::AddressResolve => FetchError::DnsFailure,
                    _ => FetchError::InvalidResponse,
                }
            })?;

        Ok(result.seconds)
    }
}

impl TimeSource for NtpTimeSource {
    const WORST_CASE_LATENCY_MS: u32 = NTP.settle_delay_ms + NTP.timeout_ms;

    async fn fetch_utc(&mut self) -> Result<UtcInstant, FetchError> {
        Timer::after_millis(NTP.settle_delay_ms as u64).await;

        let seconds = with_timeout(
            Duration::from_millis(NTP.timeout_ms as u64),
            self.exchange(),
        )
        .await
        .map_err(|_| FetchError::Timeout)??;

        Ok(UtcInstant::from_unix_seconds(seconds).offset_by(NTP.base_offset_s as i64))
    }
}

/// Transmit timestamps taken from uptime
///
/// Only used to match replies to requests, so wall-clock accuracy does
/// not matter.
#[derive(Clone, Copy, Default)]
struct UptimeTimestamp;

impl NtpTimestampGenerator for UptimeTimestamp {
    fn init(&mut self) {}

    fn timestamp_sec(&self) -> u64 {
        Instant::now().as_secs()
    }

    fn timestamp_subsec_micros(&self) -> u32 {
        (Instant::now().as_micros() % 1_000_000) as u32
    }
}
