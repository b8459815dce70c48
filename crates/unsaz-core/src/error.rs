//! Error types
//!
//! One variant per failure mode of the scan/load/render pipeline. Variants
//! carry plain strings so errors stay `Clone` and can be collected into the
//! transaction table's failure list.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a capture archive or rendering its contents
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "message")]
pub enum UnsazError {
    /// The archive could not be opened or its member list enumerated
    #[error("Cannot read archive: {0}")]
    ArchiveRead(String),

    /// A transaction is missing one of its three members
    #[error("Transaction {id}: missing archive member {member}")]
    MissingMember { id: u64, member: String },

    /// The metadata descriptor lacks a required node or is not valid XML
    #[error("Transaction {id}: malformed metadata: {reason}")]
    MalformedMetadata { id: u64, reason: String },

    /// An embedded address is neither IPv4, IPv4-mapped IPv6 nor IPv6
    #[error("Invalid address: {value:?}")]
    AddressFormat { value: String },

    /// A selective mode asked for an identifier the archive does not hold
    #[error("Unknown transaction: {0}")]
    UnknownTransaction(u64),

    /// IO error while reading a member or writing output
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, UnsazError>;

impl From<std::io::Error> for UnsazError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<zip::result::ZipError> for UnsazError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ArchiveRead(err.to_string())
    }
}

impl From<serde_json::Error> for UnsazError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_member_message() {
        let err = UnsazError::MissingMember {
            id: 7,
            member: "raw/7_s.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Transaction 7: missing archive member raw/7_s.txt"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err: UnsazError = io.into();
        assert!(matches!(err, UnsazError::Io(ref m) if m.contains("short read")));
    }

    #[test]
    fn test_error_serde() {
        let err = UnsazError::UnknownTransaction(42);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"type":"UnknownTransaction","message":42}"#);
    }
}
