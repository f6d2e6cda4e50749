// # Record Updater Trait
//
// Defines the interface for pushing a new address to the record store.
//
// ## Implementations
//
// - Cloudflare: `ddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{RecordUpdater, RecordUpdateRequest};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let updater = /* RecordUpdater implementation */;
//
//     let request = RecordUpdateRequest::new("zone", "record", "home.example.com", "203.0.113.7");
//     updater.apply_update(&request).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::Serialize;

/// Result of an update call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// The store accepted the update
    Applied,
    /// Dry-run mode: the update was logged but not sent
    DryRun,
}

/// Desired target state for a single record
///
/// Identifiers are opaque strings from configuration; they are never
/// discovered or validated against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdateRequest {
    /// Zone identifier
    pub zone_id: String,
    /// Record identifier within the zone
    pub record_id: String,
    /// Intended record name
    pub name: String,
    /// Intended address value
    pub content: String,
}

/// JSON body of a partial record update
///
/// Only `content` and `name` are sent; `id` and `proxied` are left to the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPatch<'a> {
    /// New address value
    pub content: &'a str,
    /// Record name
    pub name: &'a str,
}

impl RecordUpdateRequest {
    /// Create a new update request
    pub fn new(
        zone_id: impl Into<String>,
        record_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            record_id: record_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// The partial-update body for this request
    pub fn patch(&self) -> RecordPatch<'_> {
        RecordPatch {
            content: &self.content,
            name: &self.name,
        }
    }
}

/// Trait for record updater implementations
///
/// # Idempotency
///
/// Applying the same request twice must leave the store in the same state
/// as applying it once. Implementations make a single API call per
/// invocation and never retry.
#[async_trait]
pub trait RecordUpdater: Send + Sync {
    /// Apply `request` to the record store
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: The update was applied (or logged in dry-run)
    /// - `Err(Error::UpdateRejected)`: The store answered with a non-200 status
    /// - `Err(Error::Network)`: Transport failure
    async fn apply_update(&self, request: &RecordUpdateRequest)
    -> Result<UpdateResult, crate::Error>;

    /// Name of the record store (for logging)
    fn provider_name(&self) -> &'static str;
}
