// # HTTP Address Observer
//
// This crate discovers the caller's public IPv4 address by querying an
// address-echo ("trace") endpoint such as `https://cloudflare.com/cdn-cgi/trace`.
//
// ## Response Format
//
// The endpoint returns newline-separated `key=value` pairs:
//
// ```text
// fl=123f45
// h=cloudflare.com
// ip=203.0.113.7
// ts=1700000000.123
// ```
//
// Only the `ip` key is consumed.
//
// ## IPv4 Only
//
// The HTTP client binds its local address to `0.0.0.0` and ignores proxy
// settings, so on a dual-stack host the connection to the trace endpoint
// (and therefore the echoed address) is always direct IPv4.

use ddns_core::traits::{AddressObserver, ObservedAddress};
use ddns_core::{Error, Result, Stage};

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Default request timeout for the trace endpoint
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Address observer backed by an HTTP trace endpoint
#[derive(Debug)]
pub struct HttpAddressObserver {
    /// URL to fetch the trace from
    url: String,

    /// HTTP client, bound to IPv4
    client: reqwest::Client,
}

impl HttpAddressObserver {
    /// Create a new observer with the default 10 second timeout
    ///
    /// # Parameters
    ///
    /// - `url`: Trace endpoint (e.g., "https://cloudflare.com/cdn-cgi/trace")
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create with a custom request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            // Always connect to the trace endpoint directly
            .no_proxy()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Fetch the raw trace body
    async fn fetch_trace(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(Stage::ObserveAddress, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::warn!("Trace endpoint returned HTTP {}", response.status());
            return Err(Error::remote(
                Stage::ObserveAddress,
                response.status().as_u16(),
            ));
        }

        response.text().await.map_err(|e| {
            Error::network(
                Stage::ObserveAddress,
                format!("Failed to read response: {}", e),
            )
        })
    }
}

/// Extract the `ip` value from a trace body
///
/// The first `ip=` line with a non-empty value wins. If there is none the
/// result is [`Error::NotFound`].
pub fn parse_trace_body(body: &str) -> Result<ObservedAddress> {
    body.lines()
        .find_map(|line| line.strip_prefix("ip=").filter(|ip| !ip.is_empty()))
        .map(ObservedAddress::from)
        .ok_or_else(|| Error::not_found("IP address not found in trace response"))
}

#[async_trait::async_trait]
impl AddressObserver for HttpAddressObserver {
    async fn observe(&self) -> Result<ObservedAddress> {
        tracing::debug!("Fetching public address from {}", self.url);

        let body = self.fetch_trace().await?;
        let address = parse_trace_body(&body)?;

        if address.as_str().parse::<Ipv4Addr>().is_err() {
            tracing::warn!("Trace endpoint returned a non-IPv4 address: {}", address);
        }

        Ok(address)
    }

    fn observer_name(&self) -> &'static str {
        "http-trace"
    }
}
