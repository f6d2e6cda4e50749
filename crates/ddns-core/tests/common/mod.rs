//! Test doubles and common utilities for reconciliation contract tests
//!
//! Each double counts its calls so tests can assert exactly which network
//! steps a pass reached.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{
    AddressObserver, ObservedAddress, RecordResolver, RecordUpdateRequest, RecordUpdater,
    UpdateResult,
};
use ddns_core::DdnsConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An AddressObserver returning a fixed address (or a fixed failure)
pub struct FixedObserver {
    address: Option<String>,
    call_count: Arc<AtomicUsize>,
}

impl FixedObserver {
    pub fn new(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// An observer whose response never contains an address
    pub fn without_address() -> Self {
        Self {
            address: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter for observe()
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait::async_trait]
impl AddressObserver for FixedObserver {
    async fn observe(&self) -> Result<ObservedAddress> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.address
            .clone()
            .map(ObservedAddress::from)
            .ok_or_else(|| Error::not_found("IP address not found"))
    }

    fn observer_name(&self) -> &'static str {
        "fixed"
    }
}

/// A RecordResolver returning a fixed answer (or a fixed failure)
pub struct FixedResolver {
    answer: std::result::Result<String, u32>,
    call_count: Arc<AtomicUsize>,
    queried: Arc<Mutex<Vec<String>>>,
}

impl FixedResolver {
    pub fn new(address: &str) -> Self {
        Self {
            answer: Ok(address.to_string()),
            call_count: Arc::new(AtomicUsize::new(0)),
            queried: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A resolver that reports the given DNS status code
    pub fn failing_with_status(status: u32) -> Self {
        Self {
            answer: Err(status),
            call_count: Arc::new(AtomicUsize::new(0)),
            queried: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared counter for resolve()
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }

    /// Shared list of names passed to resolve()
    pub fn queried(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.queried)
    }
}

#[async_trait::async_trait]
impl RecordResolver for FixedResolver {
    async fn resolve(&self, record_name: &str) -> Result<ObservedAddress> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(record_name.to_string());
        match &self.answer {
            Ok(address) => Ok(ObservedAddress::from(address.as_str())),
            Err(status) => Err(Error::resolution(record_name, *status)),
        }
    }

    fn resolver_name(&self) -> &'static str {
        "fixed"
    }
}

/// How the recording store answers update calls
#[derive(Clone, Copy)]
pub enum StoreBehavior {
    Accept,
    Reject(u16),
    DryRun,
}

/// A RecordUpdater that records requests and keeps a tiny in-memory store
pub struct RecordingUpdater {
    behavior: StoreBehavior,
    call_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordUpdateRequest>>>,
    /// record_id -> (name, content)
    store: Arc<Mutex<std::collections::HashMap<String, (String, String)>>>,
}

impl RecordingUpdater {
    pub fn new(behavior: StoreBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            store: Arc::new(Mutex::new(std::collections::HashMap::new())),
        }
    }

    /// Create an updater that shares counters and store with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            behavior: other.behavior,
            call_count: Arc::clone(&other.call_count),
            requests: Arc::clone(&other.requests),
            store: Arc::clone(&other.store),
        }
    }

    pub fn update_call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordUpdateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn stored(&self, record_id: &str) -> Option<(String, String)> {
        self.store.lock().unwrap().get(record_id).cloned()
    }
}

#[async_trait::async_trait]
impl RecordUpdater for RecordingUpdater {
    async fn apply_update(&self, request: &RecordUpdateRequest) -> Result<UpdateResult> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match self.behavior {
            StoreBehavior::Accept => {
                self.store.lock().unwrap().insert(
                    request.record_id.clone(),
                    (request.name.clone(), request.content.clone()),
                );
                Ok(UpdateResult::Applied)
            }
            StoreBehavior::Reject(status) => {
                Err(Error::update_rejected(status, r#"{"error":"auth"}"#))
            }
            StoreBehavior::DryRun => Ok(UpdateResult::DryRun),
        }
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Helper to create a complete configuration for testing
pub fn test_config(record_name: &str) -> DdnsConfig {
    DdnsConfig::new("test-token", "zone-123", "record-456", record_name)
}
