//! Reconciliation engine
//!
//! The DdnsEngine runs exactly one reconciliation pass:
//! - Observes the public address via AddressObserver
//! - Resolves the published address via RecordResolver
//! - Compares the two with [`needs_update`]
//! - Pushes the observed address via RecordUpdater when they differ
//!
//! ## Pass Flow
//!
//! ```text
//! Start ──► AddressObserved ──► RecordResolved ──┬──► NoChangeNeeded
//!   │              │                   │          └──► UpdateApplied
//!   └──────────────┴───────────────────┴──────────────► Failed (Err)
//! ```
//!
//! Every step is awaited before the next begins. Any error ends the pass;
//! there is no retry inside a pass.

use crate::config::DdnsConfig;
use crate::error::Result;
use crate::traits::{
    AddressObserver, ObservedAddress, RecordResolver, RecordUpdateRequest, RecordUpdater,
    UpdateResult,
};
use tracing::{debug, info};

/// Terminal state of a successful pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Published address already matches the public address
    NoChangeNeeded {
        /// The address both sources agreed on
        address: ObservedAddress,
    },

    /// The record store accepted the new address
    UpdateApplied {
        /// Address published before the update
        previous: ObservedAddress,
        /// Address now set on the record
        current: ObservedAddress,
    },

    /// An update was needed but dry-run mode suppressed it
    DryRun {
        /// Address currently published
        previous: ObservedAddress,
        /// Address that would have been set
        current: ObservedAddress,
    },
}

/// Decide whether the published record must be updated
///
/// True if and only if the two addresses are not byte-for-byte identical.
pub fn needs_update(observed: &ObservedAddress, published: &ObservedAddress) -> bool {
    observed.as_str() != published.as_str()
}

/// Single-pass DDNS engine
pub struct DdnsEngine {
    /// Source of the public address
    observer: Box<dyn AddressObserver>,

    /// Source of the published address
    resolver: Box<dyn RecordResolver>,

    /// Record store client
    updater: Box<dyn RecordUpdater>,

    /// Zone identifier
    zone_id: String,

    /// Record identifier
    record_id: String,

    /// Record name
    record_name: String,
}

impl DdnsEngine {
    /// Create a new DDNS engine
    ///
    /// The configuration is validated here, so a missing value is reported
    /// before any component is called.
    pub fn new(
        observer: Box<dyn AddressObserver>,
        resolver: Box<dyn RecordResolver>,
        updater: Box<dyn RecordUpdater>,
        config: &DdnsConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            observer,
            resolver,
            updater,
            zone_id: config.zone_id.clone(),
            record_id: config.record_id.clone(),
            record_name: config.record_name.clone(),
        })
    }

    /// Run one reconciliation pass
    ///
    /// # Returns
    ///
    /// - `Ok(PassOutcome)`: The pass reached a successful terminal state
    /// - `Err(Error)`: The pass failed at the stage named in the error
    pub async fn run_once(&self) -> Result<PassOutcome> {
        debug!(
            "Starting reconciliation pass for {} (observer={}, resolver={}, provider={})",
            self.record_name,
            self.observer.observer_name(),
            self.resolver.resolver_name(),
            self.updater.provider_name()
        );

        let public = self.observer.observe().await?;
        info!("Public IP: {}", public);

        let published = self.resolver.resolve(&self.record_name).await?;
        info!("Current IP: {}", published);

        if !needs_update(&public, &published) {
            info!("Nothing to update for {}", self.record_name);
            return Ok(PassOutcome::NoChangeNeeded { address: public });
        }

        info!(
            "Record {} is stale: {} -> {}",
            self.record_name, published, public
        );

        let request = RecordUpdateRequest::new(
            self.zone_id.as_str(),
            self.record_id.as_str(),
            self.record_name.as_str(),
            public.as_str(),
        );

        match self.updater.apply_update(&request).await? {
            UpdateResult::Applied => {
                info!("DNS record {} updated successfully", self.record_name);
                Ok(PassOutcome::UpdateApplied {
                    previous: published,
                    current: public,
                })
            }
            UpdateResult::DryRun => Ok(PassOutcome::DryRun {
                previous: published,
                current: public,
            }),
        }
    }
}
