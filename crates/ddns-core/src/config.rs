//! Configuration types for the DDNS reconciler
//!
//! The four record strings are owned by the caller (CLI or embedding
//! application) and handed to the core by value. Endpoint settings default
//! to the public Cloudflare services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default address-echo endpoint
pub const DEFAULT_TRACE_URL: &str = "https://cloudflare.com/cdn-cgi/trace";

/// Default DNS-over-HTTPS endpoint
pub const DEFAULT_DOH_URL: &str = "https://cloudflare-dns.com/dns-query";

/// Default Cloudflare API v4 base URL
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Request timeout applied to every HTTP call
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main DDNS configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DdnsConfig {
    /// Cloudflare API token
    pub api_token: String,

    /// Zone identifier
    pub zone_id: String,

    /// DNS record identifier within the zone
    pub record_id: String,

    /// DNS record name (e.g. "home.example.com")
    pub record_name: String,

    /// Service endpoints and timeout
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Log the intended update instead of sending it
    #[serde(default)]
    pub dry_run: bool,
}

impl fmt::Debug for DdnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DdnsConfig")
            .field("api_token", &"<REDACTED>")
            .field("zone_id", &self.zone_id)
            .field("record_id", &self.record_id)
            .field("record_name", &self.record_name)
            .field("endpoints", &self.endpoints)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl DdnsConfig {
    /// Create a configuration with default endpoints
    pub fn new(
        api_token: impl Into<String>,
        zone_id: impl Into<String>,
        record_id: impl Into<String>,
        record_name: impl Into<String>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            zone_id: zone_id.into(),
            record_id: record_id.into(),
            record_name: record_name.into(),
            endpoints: EndpointConfig::default(),
            dry_run: false,
        }
    }

    /// Replace the endpoint settings
    pub fn with_endpoints(mut self, endpoints: EndpointConfig) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate the configuration
    ///
    /// Every required string must be non-empty. Identifiers are opaque and
    /// are not checked against the record store.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let required = [
            ("API token", &self.api_token),
            ("zone ID", &self.zone_id),
            ("DNS record ID", &self.record_id),
            ("DNS record name", &self.record_name),
        ];

        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(crate::Error::config(format!("{label} is required")));
            }
        }

        self.endpoints.validate()
    }
}

/// Service endpoints used during a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Address-echo endpoint returning `key=value` lines
    #[serde(default = "default_trace_url")]
    pub trace_url: String,

    /// DNS-over-HTTPS JSON endpoint
    #[serde(default = "default_doh_url")]
    pub doh_url: String,

    /// Record store API base (without trailing slash)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EndpointConfig {
    /// Validate the endpoint settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        let urls = [
            ("trace URL", &self.trace_url),
            ("DoH URL", &self.doh_url),
            ("API base URL", &self.api_base),
        ];

        for (label, url) in urls {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(crate::Error::config(format!(
                    "{label} must use HTTP or HTTPS scheme. Got: {url}"
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(crate::Error::config("Request timeout must be > 0"));
        }

        Ok(())
    }

    /// Per-request timeout as a duration
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            trace_url: default_trace_url(),
            doh_url: default_doh_url(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_trace_url() -> String {
    DEFAULT_TRACE_URL.to_string()
}

fn default_doh_url() -> String {
    DEFAULT_DOH_URL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> DdnsConfig {
        DdnsConfig::new("token", "zone", "record", "home.example.com")
    }

    #[test]
    fn test_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_each_required_field() {
        let mut cfg = valid();
        cfg.api_token.clear();
        assert!(cfg.validate().unwrap_err().to_string().contains("API token"));

        let mut cfg = valid();
        cfg.zone_id.clear();
        assert!(cfg.validate().unwrap_err().to_string().contains("zone ID"));

        let mut cfg = valid();
        cfg.record_id.clear();
        assert!(cfg.validate().unwrap_err().to_string().contains("DNS record ID"));

        let mut cfg = valid();
        cfg.record_name = "   ".to_string();
        assert!(cfg.validate().unwrap_err().to_string().contains("DNS record name"));
    }

    #[test]
    fn test_endpoint_validation() {
        let mut endpoints = EndpointConfig::default();
        endpoints.doh_url = "ftp://resolver".to_string();
        assert!(valid().with_endpoints(endpoints).validate().is_err());

        let endpoints = EndpointConfig {
            timeout_secs: 0,
            ..EndpointConfig::default()
        };
        assert!(valid().with_endpoints(endpoints).validate().is_err());
    }

    #[test]
    fn test_defaults_from_json() {
        let cfg: DdnsConfig = serde_json::from_str(
            r#"{"api_token":"t","zone_id":"z","record_id":"r","record_name":"n"}"#,
        )
        .unwrap();
        assert_eq!(cfg.endpoints, EndpointConfig::default());
        assert_eq!(cfg.endpoints.timeout_secs, 10);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn test_api_token_not_exposed_in_debug() {
        let cfg = DdnsConfig::new("secret_token_12345", "zone", "record", "name");
        let debug_str = format!("{:?}", cfg);
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("DdnsConfig"));
    }
}
