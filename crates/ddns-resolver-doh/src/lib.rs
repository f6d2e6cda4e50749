// # DNS-over-HTTPS Record Resolver
//
// Resolves the address currently published for a DNS name through a DoH
// JSON endpoint (e.g. `https://cloudflare-dns.com/dns-query`).
//
// ## API Call
//
// ```http
// GET /dns-query?name=home.example.com&type=A
// Accept: application/dns-json
// ```
//
// ```json
// {"Status":0,"Answer":[{"name":"home.example.com","type":1,"TTL":300,"data":"203.0.113.7"}]}
// ```
//
// The data of the first answer is returned whatever its type; see
// `PublishedRecordSnapshot::current_address`.

use async_trait::async_trait;
use ddns_core::traits::{ObservedAddress, PublishedRecordSnapshot, RecordResolver};
use ddns_core::{Error, Result, Stage};
use reqwest::StatusCode;
use std::time::Duration;

/// Media type for DoH JSON responses
const DNS_JSON: &str = "application/dns-json";

/// Default HTTP timeout for DoH queries
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Record resolver backed by a DoH JSON endpoint
#[derive(Debug)]
pub struct DohResolver {
    /// DoH endpoint URL
    url: String,

    /// HTTP client for queries
    client: reqwest::Client,
}

impl DohResolver {
    /// Create a new resolver with the default 10 second timeout
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create with a custom request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Query the endpoint and decode the snapshot
    async fn query(&self, record_name: &str) -> Result<PublishedRecordSnapshot> {
        tracing::debug!("Querying {} for {} (type A)", self.url, record_name);

        let response = self
            .client
            .get(&self.url)
            .query(&[("name", record_name), ("type", "A")])
            .header(reqwest::header::ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(|e| Error::network(Stage::ResolveRecord, format!("Request failed: {}", e)))?;

        if response.status() != StatusCode::OK {
            tracing::error!(
                "DoH endpoint returned non-200 status for {}: {}",
                record_name,
                response.status()
            );
            return Err(Error::remote(Stage::ResolveRecord, response.status().as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            Error::network(Stage::ResolveRecord, format!("Failed to read response: {}", e))
        })?;

        decode_snapshot(&body)
    }
}

/// Decode a DoH JSON body
pub fn decode_snapshot(body: &str) -> Result<PublishedRecordSnapshot> {
    serde_json::from_str(body).map_err(|e| {
        Error::decode(
            Stage::ResolveRecord,
            format!("Invalid DoH response: {}", e),
        )
    })
}

#[async_trait]
impl RecordResolver for DohResolver {
    async fn resolve(&self, record_name: &str) -> Result<ObservedAddress> {
        let snapshot = self.query(record_name).await?;

        if snapshot.status != 0 {
            tracing::error!(
                "DNS query for {} failed with status {}",
                record_name,
                snapshot.status
            );
        }

        snapshot.current_address(record_name)
    }

    fn resolver_name(&self) -> &'static str {
        "doh"
    }
}
