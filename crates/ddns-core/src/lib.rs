// # ddns-core
//
// Core library for the single-record DDNS reconciler.
//
// ## Architecture Overview
//
// One reconciliation pass keeps a DNS A record in line with the public IPv4
// address:
// - **AddressObserver**: Trait for discovering the public address
// - **RecordResolver**: Trait for reading the published address
// - **RecordUpdater**: Trait for pushing a new address to the record store
// - **DdnsEngine**: Runs observe → resolve → compare → update once
//
// ## Design Principles
//
// 1. **Stateless**: Every pass re-derives everything from live queries
// 2. **Sequential**: One request in flight at a time
// 3. **Fail-fast**: Any error ends the pass; retries belong to the scheduler
// 4. **Library-First**: The binary is a thin layer over this crate

pub mod traits;
pub mod engine;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{
    AddressObserver, ObservedAddress, PublishedRecordSnapshot, RecordResolver,
    RecordUpdateRequest, RecordUpdater, UpdateResult,
};
pub use engine::{DdnsEngine, PassOutcome, needs_update};
pub use config::{DdnsConfig, EndpointConfig};
pub use error::{Error, Result, Stage};
