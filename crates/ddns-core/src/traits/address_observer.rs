// # Address Observer Trait
//
// Defines the interface for discovering the caller's public IPv4 address.
//
// ## Implementations
//
// - HTTP trace endpoint: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::AddressObserver;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let observer = /* AddressObserver implementation */;
//
//     let public = observer.observe().await?;
//     println!("Public IP: {}", public);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;

/// A textual IPv4 address as reported by a network source
///
/// The value is kept exactly as received. Comparison is byte-for-byte;
/// no trimming or case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservedAddress(String);

impl ObservedAddress {
    /// Wrap an address string
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Borrow the address text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObservedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ObservedAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl From<&str> for ObservedAddress {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

/// Trait for address observer implementations
///
/// An observer makes a single attempt per call. It does not retry, cache,
/// or decide whether DNS needs updating; it only reports what it sees.
#[async_trait]
pub trait AddressObserver: Send + Sync {
    /// Observe the current public address
    ///
    /// # Returns
    ///
    /// - `Ok(ObservedAddress)`: The address reported by the echo service
    /// - `Err(Error::NotFound)`: The response carried no address
    /// - `Err(Error::Network)`: Connection, TLS or timeout failure
    async fn observe(&self) -> Result<ObservedAddress, crate::Error>;

    /// Name of the observer (for logging)
    fn observer_name(&self) -> &'static str;
}
