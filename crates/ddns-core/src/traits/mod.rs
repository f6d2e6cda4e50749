//! Core traits for the DDNS reconciler
//!
//! One trait per step of a reconciliation pass:
//!
//! - [`AddressObserver`]: Discover the current public IPv4 address
//! - [`RecordResolver`]: Read the value currently published in DNS
//! - [`RecordUpdater`]: Push a new value to the record store

pub mod address_observer;
pub mod record_resolver;
pub mod record_updater;

pub use address_observer::{AddressObserver, ObservedAddress};
pub use record_resolver::{DnsAnswer, PublishedRecordSnapshot, RecordResolver, RECORD_TYPE_A};
pub use record_updater::{RecordPatch, RecordUpdateRequest, RecordUpdater, UpdateResult};
