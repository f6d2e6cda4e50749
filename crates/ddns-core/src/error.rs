//! Error types for the DDNS reconciler
//!
//! Every error is fatal to the current reconciliation pass. Errors raised
//! while talking to a remote service carry the [`Stage`] they came from so
//! the operator can tell which step failed.

use std::fmt;
use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Step of a reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Discovering the public IPv4 address
    ObserveAddress,
    /// Resolving the published record value over DoH
    ResolveRecord,
    /// Pushing the new value to the record store
    ApplyUpdate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ObserveAddress => "observe address",
            Stage::ResolveRecord => "resolve record",
            Stage::ApplyUpdate => "apply update",
        };
        f.write_str(name)
    }
}

/// Core error type for the DDNS reconciler
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration, detected before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Connection, TLS, timeout or body-read failure
    #[error("Network error during {stage}: {message}")]
    Network {
        /// Pass step that failed
        stage: Stage,
        /// Underlying cause
        message: String,
    },

    /// The address-echo response carried no `ip=` line
    #[error("Address not found: {0}")]
    NotFound(String),

    /// Unexpected HTTP status from a remote service
    #[error("Remote error during {stage}: HTTP {status}")]
    Remote {
        /// Pass step that failed
        stage: Stage,
        /// HTTP status code returned
        status: u16,
    },

    /// DNS-level failure inside a successful DoH response (e.g. NXDOMAIN)
    #[error("DNS resolution failed for {name}: status {status}")]
    Resolution {
        /// Queried record name
        name: String,
        /// DNS response code
        status: u32,
    },

    /// The DoH response succeeded but contained no answers
    #[error("No answer for {0}")]
    NoAnswer(String),

    /// Malformed response body
    #[error("Decode error during {stage}: {message}")]
    Decode {
        /// Pass step that failed
        stage: Stage,
        /// Underlying cause
        message: String,
    },

    /// The record store refused the update
    #[error("Update rejected (HTTP {status}): {body}")]
    UpdateRejected {
        /// HTTP status code returned by the store
        status: u16,
        /// Raw response body, kept verbatim for diagnosis
        body: String,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP client construction error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a network error for the given stage
    pub fn network(stage: Stage, msg: impl Into<String>) -> Self {
        Self::Network {
            stage,
            message: msg.into(),
        }
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a remote status error for the given stage
    pub fn remote(stage: Stage, status: u16) -> Self {
        Self::Remote { stage, status }
    }

    /// Create a DNS resolution error
    pub fn resolution(name: impl Into<String>, status: u32) -> Self {
        Self::Resolution {
            name: name.into(),
            status,
        }
    }

    /// Create a "no answer" error
    pub fn no_answer(name: impl Into<String>) -> Self {
        Self::NoAnswer(name.into())
    }

    /// Create a decode error for the given stage
    pub fn decode(stage: Stage, msg: impl Into<String>) -> Self {
        Self::Decode {
            stage,
            message: msg.into(),
        }
    }

    /// Create an update-rejected error
    pub fn update_rejected(status: u16, body: impl Into<String>) -> Self {
        Self::UpdateRejected {
            status,
            body: body.into(),
        }
    }

    /// Whether this error was raised before any network activity
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
