//! unsaz Core Library
//!
//! Reads HTTP transactions captured by the Fiddler debugging proxy from a
//! `.saz` archive and renders them for display. The CLI is a thin layer on
//! top of this crate.
//!
//! # Modules
//!
//! - [`member`] - Archive member naming convention
//! - [`archive`] - Archive scanner and member access
//! - [`metadata`] - XML metadata descriptor parsing
//! - [`address`] - Peer address normalization
//! - [`timestamp`] - Capture timestamps
//! - [`message`] - Raw message splitter
//! - [`transaction`] - Transaction types
//! - [`loader`] - Transaction loader and table
//! - [`presenter`] - Selection, display options and status colors
//! - [`sink`] - Text and JSON output sinks
//! - [`defaults`] - Naming and layout constants
//! - [`error`] - Error types

pub mod address;
pub mod archive;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod member;
pub mod message;
pub mod metadata;
pub mod presenter;
pub mod sink;
pub mod timestamp;
pub mod transaction;

// Re-export commonly used types
pub use address::{normalize_address, AddressStyle};
pub use archive::{MemberSet, SazArchive, ScanIndex};
pub use error::{Result, UnsazError};
pub use loader::{load_transaction, LoadFailure, TransactionTable};
pub use member::{member_name, parse_member_name, MemberName, MemberRole};
pub use message::{split_message, MessageRecord};
pub use metadata::{parse_metadata, SessionMetadata};
pub use presenter::{render, DisplayOptions, Selection, StatusClass};
pub use sink::{JsonSink, TextSink, TransactionSink};
pub use timestamp::CaptureTimestamp;
pub use transaction::{Endpoint, Side, Transaction};
