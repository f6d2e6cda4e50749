// # Cloudflare Record Updater
//
// This crate pushes a new address to a Cloudflare DNS record.
//
// The zone and record identifiers come from configuration; the updater never
// looks them up. Each call makes exactly one HTTP request and never retries.
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - Constructor fails fast if the token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - Patch DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use ddns_core::config::DEFAULT_API_BASE;
use ddns_core::traits::{RecordUpdateRequest, RecordUpdater, UpdateResult};
use ddns_core::{Error, Result, Stage};
use reqwest::{StatusCode, Url};
use std::time::Duration;

/// Default HTTP timeout for API requests, matching the read calls
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Cloudflare record updater
///
/// # Dry-Run Mode
///
/// When `dry_run` is true the updater logs the intended PATCH and returns
/// [`UpdateResult::DryRun`] without contacting Cloudflare.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL
    api_base: Url,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, skip the PATCH request
    dry_run: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare updater against the public API
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    /// - `dry_run`: If true, log updates instead of sending them
    pub fn new(api_token: impl Into<String>, dry_run: bool) -> Result<Self> {
        Self::with_endpoint(api_token, DEFAULT_API_BASE, DEFAULT_HTTP_TIMEOUT, dry_run)
    }

    /// Create a new Cloudflare updater against a custom API base
    pub fn with_endpoint(
        api_token: impl Into<String>,
        api_base: &str,
        timeout: Duration,
        dry_run: bool,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let api_base = Url::parse(api_base)
            .map_err(|e| Error::config(format!("Invalid API base URL {}: {}", api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(Error::config(format!("Invalid API base URL: {}", api_base)));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            api_base,
            client,
            dry_run,
        })
    }

    /// URL of a single DNS record
    ///
    /// Identifiers are opaque, so each one is percent-encoded as a single
    /// path segment.
    fn record_url(&self, zone_id: &str, record_id: &str) -> Url {
        let mut url = self.api_base.clone();
        // Checked at construction: the base can always take path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["zones", zone_id, "dns_records", record_id]);
        }
        url
    }
}

#[async_trait]
impl RecordUpdater for CloudflareProvider {
    /// Apply a partial update to one DNS record
    ///
    /// # API Call
    ///
    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// Authorization: Bearer <token>
    /// Content-Type: application/json
    ///
    /// {"content": "203.0.113.7", "name": "home.example.com"}
    /// ```
    async fn apply_update(&self, request: &RecordUpdateRequest) -> Result<UpdateResult> {
        let url = self.record_url(&request.zone_id, &request.record_id);
        let payload = serde_json::to_value(request.patch())?;

        tracing::info!(
            "{} Cloudflare DNS record: {} -> {} [mode: {}]",
            if self.dry_run { "Would update" } else { "Updating" },
            request.name,
            request.content,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send PATCH request to {} with payload: {}",
                url,
                payload
            );
            return Ok(UpdateResult::DryRun);
        }

        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::network(Stage::ApplyUpdate, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            match status.as_u16() {
                401 | 403 => tracing::error!(
                    "Authentication failed: invalid API token or insufficient permissions (HTTP {})",
                    status
                ),
                429 => tracing::error!("Rate limit exceeded (HTTP {})", status),
                500..=599 => tracing::error!("Cloudflare server error (HTTP {})", status),
                _ => tracing::error!("Failed to update record (HTTP {})", status),
            }

            return Err(Error::update_rejected(status.as_u16(), error_text));
        }

        Ok(UpdateResult::Applied)
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
