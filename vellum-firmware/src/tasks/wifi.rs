//! Wi-Fi connection supervisor
//!
//! Keeps the station associated and DHCP-configured, reconnecting with
//! exponential backoff. The refresh loop never waits on this task:
//! while the link is down fetches fail fast and the display serves
//! cached content.

use embassy_net::Stack;
use embassy_time::{Duration, Timer, WithTimeout};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController};
use log::{info, warn};

const RETRY_BACKOFF_MIN_SECS: u64 = 2;
const RETRY_BACKOFF_MAX_SECS: u64 = 120;
/// One DHCP attempt per association before tearing down and retrying
const DHCP_TIMEOUT_SECS: u64 = 15;
/// Cadence of the link health check while connected
const LINK_POLL_INTERVAL_MS: u64 = 500;

/// Backoff delay for the given failure streak: 2, 4, 8, ... capped at 120
fn retry_backoff_secs(consecutive_failures: u32) -> u64 {
    let shift = consecutive_failures.min(6);
    RETRY_BACKOFF_MIN_SECS
        .saturating_mul(1u64 << shift)
        .min(RETRY_BACKOFF_MAX_SECS)
}

async fn wait_before_retry(consecutive_failures: &mut u32) {
    let delay_secs = retry_backoff_secs(*consecutive_failures);
    *consecutive_failures = consecutive_failures.saturating_add(1);
    info!("wifi retrying in {}s", delay_secs);
    Timer::after_secs(delay_secs).await;
}

#[embassy_executor::task]
pub async fn wifi_task(
    mut controller: WifiController<'static>,
    stack: Stack<'static>,
    ssid: &'static str,
    password: &'static str,
) {
    let mut consecutive_failures = 0u32;

    loop {
        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = ClientConfig::default()
                .with_ssid(ssid.into())
                .with_password(password.into());
            if let Err(err) = controller.set_config(&ModeConfig::Client(client_config)) {
                warn!("wifi config rejected: {:?}", err);
                wait_before_retry(&mut consecutive_failures).await;
                continue;
            }
            if let Err(err) = controller.start_async().await {
                warn!("wifi start failed: {:?}", err);
                wait_before_retry(&mut consecutive_failures).await;
                continue;
            }
            info!("wifi started");
        }

        if let Err(err) = controller.connect_async().await {
            warn!("wifi connect failed: {:?}", err);
            wait_before_retry(&mut consecutive_failures).await;
            continue;
        }
        info!("wifi associated to {}", ssid);

        match stack
            .wait_config_up()
            .with_timeout(Duration::from_secs(DHCP_TIMEOUT_SECS))
            .await
        {
            Ok(()) => info!("dhcp lease acquired"),
            Err(_) => {
                warn!("dhcp timed out, reconnecting");
                let _ = controller.disconnect_async().await;
                wait_before_retry(&mut consecutive_failures).await;
                continue;
            }
        }

        consecutive_failures = 0;

        // Watch the link until any layer drops out
        loop {
            let link_up = stack.is_link_up();
            let has_ipv4 = stack.config_v4().is_some();
            let associated = matches!(controller.is_connected(), Ok(true));
            if !(link_up && has_ipv4 && associated) {
                warn!(
                    "wifi lost (link={} ipv4={} assoc={}), reconnecting",
                    link_up, has_ipv4, associated
                );
                break;
            }
            Timer::after_millis(LINK_POLL_INTERVAL_MS).await;
        }

        let _ = controller.disconnect_async().await;
        wait_before_retry(&mut consecutive_failures).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_from_minimum() {
        assert_eq!(retry_backoff_secs(0), 2);
        assert_eq!(retry_backoff_secs(1), 4);
        assert_eq!(retry_backoff_secs(2), 8);
        assert_eq!(retry_backoff_secs(5), 64);
    }

    #[test]
    fn test_backoff_caps_at_maximum() {
        assert_eq!(retry_backoff_secs(6), 120);
        assert_eq!(retry_backoff_secs(7), 120);
        assert_eq!(retry_backoff_secs(1000), 120);
    }
}
