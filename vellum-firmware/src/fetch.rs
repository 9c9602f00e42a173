//! HTTPS plan source
//!
//! One authenticated GET per cycle via `reqwless`. Transport and TLS
//! live here; body validation and the size budget live in vellum-core.

use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embassy_net::Stack;
use embassy_time::{Duration, WithTimeout};
use log::{debug, warn};
use reqwless::client::{HttpClient, TlsConfig, TlsVerify};
use reqwless::request::{Method, RequestBuilder};
use reqwless::response::Status;

use vellum_core::feed::{parse_feed, PlanFeed};
use vellum_core::traits::{FetchError, PlanSource};

/// TLS record staging. 16 KiB read covers the largest TLS record.
pub const TLS_READ_BUF_SIZE: usize = 16 * 1024;
pub const TLS_WRITE_BUF_SIZE: usize = 4 * 1024;

/// Response staging: headers plus anything up to the feed size budget.
/// Bodies that overflow this fail the read and surface as `Transport`.
const HTTP_BUF_SIZE: usize = 2048;

/// Socket buffers for the single outbound connection
pub type FetchTcpState = TcpClientState<1, 4096, 4096>;

pub struct HttpPlanSource {
    stack: Stack<'static>,
    tcp_state: &'static FetchTcpState,
    tls_read: &'static mut [u8],
    tls_write: &'static mut [u8],
    tls_seed: u64,
    url: &'static str,
    api_key: &'static str,
    timeout: Duration,
    http_buf: [u8; HTTP_BUF_SIZE],
}

impl HttpPlanSource {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stack: Stack<'static>,
        tcp_state: &'static FetchTcpState,
        tls_read: &'static mut [u8; TLS_READ_BUF_SIZE],
        tls_write: &'static mut [u8; TLS_WRITE_BUF_SIZE],
        tls_seed: u64,
        url: &'static str,
        api_key: &'static str,
        timeout: Duration,
    ) -> Self {
        Self {
            stack,
            tcp_state,
            tls_read,
            tls_write,
            tls_seed,
            url,
            api_key,
            timeout,
            http_buf: [0; HTTP_BUF_SIZE],
        }
    }

    async fn exchange(&mut self) -> Result<PlanFeed, FetchError> {
        let tcp_client = TcpClient::new(self.stack, self.tcp_state);
        let dns_socket = DnsSocket::new(self.stack);
        // No root store on the device; the endpoint is operator-controlled
        let tls_config = TlsConfig::new(
            self.tls_seed,
            self.tls_read,
            self.tls_write,
            TlsVerify::None,
        );
        let mut client = HttpClient::new_with_tls(&tcp_client, &dns_socket, tls_config);

        let headers = [("x-api-key", self.api_key)];
        let mut request = client
            .request(Method::GET, self.url)
            .await
            .map_err(|_| FetchError::Transport)?
            .headers(&headers);

        let response = request
            .send(&mut self.http_buf)
            .await
            .map_err(|_| FetchError::Transport)?;
        if response.status != Status::Ok {
            warn!("feed endpoint returned {:?}", response.status);
            return Err(FetchError::Transport);
        }

        let body = response
            .body()
            .read_to_end()
            .await
            .map_err(|_| FetchError::Transport)?;
        debug!("feed body: {} bytes", body.len());

        parse_feed(body)
    }
}

impl PlanSource for HttpPlanSource {
    async fn fetch(&mut self) -> Result<PlanFeed, FetchError> {
        let timeout = self.timeout;
        match self.exchange().with_timeout(timeout).await {
            Ok(result) => result,
            Err(_) => {
                warn!("fetch timed out after {}ms", timeout.as_millis());
                Err(FetchError::Transport)
            }
        }
    }
}
