//! SNTP time sync
//!
//! Queries a pool server for the 32-bit transmit timestamp, converts
//! NTP era seconds to unix epoch and publishes the boot-instant epoch
//! for the clock. Retries quickly until the first fix, then refreshes
//! hourly to keep drift off the status bar.

use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{IpEndpoint, Stack};
use embassy_time::{Duration, Instant, Timer, WithTimeout};
use log::{info, warn};
use portable_atomic::Ordering;

use crate::channels::EPOCH_AT_BOOT;

const NTP_HOST: &str = "pool.ntp.org";
const NTP_PORT: u16 = 123;
const NTP_LOCAL_PORT: u16 = 9123;
const NTP_PACKET_LEN: usize = 48;
/// Seconds between the NTP era (1900) and the unix epoch (1970)
const NTP_UNIX_OFFSET_SECS: u64 = 2_208_988_800;

const REPLY_TIMEOUT_SECS: u64 = 5;
const RETRY_INTERVAL_SECS: u64 = 15;
const RESYNC_INTERVAL_SECS: u64 = 3600;

#[derive(Debug)]
enum SntpError {
    Dns,
    Socket,
    Timeout,
    Garbled,
}

/// Client request: LI 0, version 3, mode 3, all other fields zero
fn build_request() -> [u8; NTP_PACKET_LEN] {
    let mut packet = [0u8; NTP_PACKET_LEN];
    packet[0] = 0x1B;
    packet
}

/// Transmit timestamp seconds (NTP era) from a server reply
fn transmit_seconds(packet: &[u8]) -> Option<u32> {
    let raw = packet.get(40..44)?;
    Some(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// NTP era seconds to unix epoch, rejecting pre-1970 garbage
fn ntp_to_unix(seconds: u32) -> Option<u64> {
    u64::from(seconds).checked_sub(NTP_UNIX_OFFSET_SECS)
}

async fn sync_once(stack: Stack<'static>) -> Result<u64, SntpError> {
    let addrs = stack
        .dns_query(NTP_HOST, DnsQueryType::A)
        .await
        .map_err(|_| SntpError::Dns)?;
    let server = *addrs.first().ok_or(SntpError::Dns)?;

    let mut rx_meta = [PacketMetadata::EMPTY; 2];
    let mut tx_meta = [PacketMetadata::EMPTY; 2];
    let mut rx_buffer = [0u8; 128];
    let mut tx_buffer = [0u8; 128];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    socket.bind(NTP_LOCAL_PORT).map_err(|_| SntpError::Socket)?;

    let request = build_request();
    socket
        .send_to(&request, IpEndpoint::new(server, NTP_PORT))
        .await
        .map_err(|_| SntpError::Socket)?;

    let mut reply = [0u8; NTP_PACKET_LEN];
    let (len, _) = socket
        .recv_from(&mut reply)
        .with_timeout(Duration::from_secs(REPLY_TIMEOUT_SECS))
        .await
        .map_err(|_| SntpError::Timeout)?
        .map_err(|_| SntpError::Socket)?;

    let seconds = transmit_seconds(&reply[..len]).ok_or(SntpError::Garbled)?;
    ntp_to_unix(seconds).ok_or(SntpError::Garbled)
}

#[embassy_executor::task]
pub async fn timesync_task(stack: Stack<'static>) {
    loop {
        match sync_once(stack).await {
            Ok(epoch) => {
                let uptime = Instant::now().as_secs();
                EPOCH_AT_BOOT.store(epoch.saturating_sub(uptime), Ordering::Relaxed);
                info!("time synced, unix epoch {}", epoch);
                Timer::after_secs(RESYNC_INTERVAL_SECS).await;
            }
            Err(err) => {
                warn!("time sync failed: {:?}", err);
                Timer::after_secs(RETRY_INTERVAL_SECS).await;
            }
        }
    }
}
