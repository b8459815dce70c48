//! Transaction loader
//!
//! Turns the scanner's member index into fully parsed transactions. In
//! whole-archive mode a broken transaction is recorded as a [`LoadFailure`]
//! and the rest still load; in single-transaction mode any error is returned.

use std::collections::BTreeMap;
use std::io::{BufReader, Read, Seek};

use serde::Serialize;

use crate::archive::{MemberSet, SazArchive};
use crate::error::{Result, UnsazError};
use crate::member::MemberRole;
use crate::message::{split_message, MessageRecord};
use crate::metadata::parse_metadata;
use crate::transaction::{Endpoint, Transaction};

/// A transaction that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub id: u64,
    pub error: UnsazError,
}

/// Immutable, identifier-ordered set of loaded transactions
#[derive(Debug, Default)]
pub struct TransactionTable {
    transactions: BTreeMap<u64, Transaction>,
    failures: Vec<LoadFailure>,
}

impl TransactionTable {
    /// Load every transaction in the archive, collecting failures
    pub fn load_all<R: Read + Seek>(archive: &mut SazArchive<R>) -> Self {
        let mut table = Self::default();

        for (id, members) in archive.scan() {
            match load_transaction(archive, id, &members) {
                Ok(transaction) => {
                    table.transactions.insert(id, transaction);
                }
                Err(error) => {
                    tracing::debug!(id, "Failed to load transaction: {error}");
                    table.failures.push(LoadFailure { id, error });
                }
            }
        }

        tracing::debug!(
            "Loaded {} transactions, {} failed",
            table.transactions.len(),
            table.failures.len()
        );
        table
    }

    /// Load only transaction `id`; any failure is fatal
    pub fn load_one<R: Read + Seek>(archive: &mut SazArchive<R>, id: u64) -> Result<Self> {
        let members = archive
            .scan()
            .remove(&id)
            .ok_or(UnsazError::UnknownTransaction(id))?;
        let transaction = load_transaction(archive, id, &members)?;

        let mut table = Self::default();
        table.transactions.insert(id, transaction);
        Ok(table)
    }

    /// Look up one transaction
    pub fn get(&self, id: u64) -> Result<&Transaction> {
        self.transactions
            .get(&id)
            .ok_or(UnsazError::UnknownTransaction(id))
    }

    /// Transactions in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions skipped during a whole-archive load
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }
}

/// Load one transaction from its scanned members
pub fn load_transaction<R: Read + Seek>(
    archive: &mut SazArchive<R>,
    id: u64,
    members: &MemberSet,
) -> Result<Transaction> {
    let metadata_name = members.require(id, MemberRole::Metadata)?;
    let client_name = members.require(id, MemberRole::Client)?;
    let server_name = members.require(id, MemberRole::Server)?;

    let metadata = parse_metadata(id, &archive.read_member(metadata_name)?)?;
    let client_message = read_message(archive, client_name)?;
    let server_message = read_message(archive, server_name)?;

    Ok(Transaction {
        id,
        client: Endpoint {
            timestamp: metadata.client_begin_request,
            address: metadata.client_address,
            message: client_message,
        },
        server: Endpoint {
            timestamp: metadata.server_begin_response,
            address: metadata.server_address,
            message: server_message,
        },
        flags: metadata.flags,
    })
}

fn read_message<R: Read + Seek>(archive: &mut SazArchive<R>, name: &str) -> Result<MessageRecord> {
    let member = archive.open_member(name)?;
    Ok(split_message(BufReader::new(member))?)
}
