// # Record Resolver Trait
//
// Defines the interface for reading the address currently published for a
// DNS name.
//
// ## Implementations
//
// - DNS-over-HTTPS JSON: `ddns-resolver-doh` crate

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::address_observer::ObservedAddress;

/// DNS type code for an IPv4 address record
pub const RECORD_TYPE_A: u16 = 1;

/// A single answer entry of a DoH JSON response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsAnswer {
    /// Owner name of the answer
    #[serde(default)]
    pub name: String,

    /// DNS type code
    #[serde(rename = "type", default)]
    pub record_type: u16,

    /// Time-to-live in seconds
    #[serde(rename = "TTL", default)]
    pub ttl: u32,

    /// Record data (the address for A records)
    pub data: String,
}

/// The published value of a DNS name at the time of the query
///
/// Mirrors the DoH JSON shape `{Status, Answer: [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRecordSnapshot {
    /// DNS response code (0 = NOERROR)
    #[serde(rename = "Status")]
    pub status: u32,

    /// Answer section, in response order
    #[serde(rename = "Answer", default)]
    pub answers: Vec<DnsAnswer>,
}

impl PublishedRecordSnapshot {
    /// Extract the current address of `record_name` from this snapshot
    ///
    /// The first answer is used regardless of its type code.
    ///
    /// # Returns
    ///
    /// - `Err(Error::Resolution)`: The DNS status is not 0
    /// - `Err(Error::NoAnswer)`: The answer section is empty
    pub fn current_address(&self, record_name: &str) -> Result<ObservedAddress, crate::Error> {
        if self.status != 0 {
            return Err(crate::Error::resolution(record_name, self.status));
        }

        let first = self
            .answers
            .first()
            .ok_or_else(|| crate::Error::no_answer(record_name))?;

        if first.record_type != RECORD_TYPE_A {
            tracing::warn!(
                "First answer for {} has type {} (not A); comparing against it anyway",
                record_name,
                first.record_type
            );
        }

        Ok(ObservedAddress::new(first.data.clone()))
    }
}

/// Trait for record resolver implementations
#[async_trait]
pub trait RecordResolver: Send + Sync {
    /// Resolve the address currently published for `record_name`
    ///
    /// # Returns
    ///
    /// - `Ok(ObservedAddress)`: Data of the first answer
    /// - `Err(Error)`: Remote, decode, resolution or no-answer failure
    async fn resolve(&self, record_name: &str) -> Result<ObservedAddress, crate::Error>;

    /// Name of the resolver (for logging)
    fn resolver_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_first_answer_returned() {
        let snapshot: PublishedRecordSnapshot = serde_json::from_str(
            r#"{"Status":0,"Answer":[{"data":"203.0.113.7","type":1,"TTL":300,"name":"x"}]}"#,
        )
        .unwrap();

        let address = snapshot.current_address("x").unwrap();
        assert_eq!(address.as_str(), "203.0.113.7");
    }

    #[test]
    fn test_only_first_answer_consumed() {
        let snapshot: PublishedRecordSnapshot = serde_json::from_str(
            r#"{"Status":0,"Answer":[
                {"data":"198.51.100.1","type":1,"TTL":60,"name":"x"},
                {"data":"198.51.100.2","type":1,"TTL":60,"name":"x"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.current_address("x").unwrap().as_str(), "198.51.100.1");
    }

    #[test]
    fn test_non_zero_status() {
        let snapshot: PublishedRecordSnapshot =
            serde_json::from_str(r#"{"Status":3,"Answer":[]}"#).unwrap();

        match snapshot.current_address("missing.example.com") {
            Err(Error::Resolution { name, status }) => {
                assert_eq!(name, "missing.example.com");
                assert_eq!(status, 3);
            }
            other => panic!("expected resolution error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_answers() {
        let snapshot: PublishedRecordSnapshot =
            serde_json::from_str(r#"{"Status":0,"Answer":[]}"#).unwrap();

        assert!(matches!(
            snapshot.current_address("x"),
            Err(Error::NoAnswer(_))
        ));
    }

    #[test]
    fn test_missing_answer_section() {
        let snapshot: PublishedRecordSnapshot =
            serde_json::from_str(r#"{"Status":0}"#).unwrap();

        assert!(matches!(
            snapshot.current_address("x"),
            Err(Error::NoAnswer(_))
        ));
    }

    #[test]
    fn test_non_a_answer_accepted() {
        let snapshot: PublishedRecordSnapshot = serde_json::from_str(
            r#"{"Status":0,"Answer":[{"data":"target.example.net.","type":5,"TTL":300,"name":"x"}]}"#,
        )
        .unwrap();

        assert_eq!(
            snapshot.current_address("x").unwrap().as_str(),
            "target.example.net."
        );
    }
}
