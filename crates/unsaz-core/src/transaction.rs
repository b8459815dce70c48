//! Transaction types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

use crate::message::MessageRecord;
use crate::timestamp::CaptureTimestamp;

/// Which half of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Client,
    Server,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Client => write!(f, "client"),
            Side::Server => write!(f, "server"),
        }
    }
}

/// One side of a transaction with its capture time and peer address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// When the client began the request, or the server began the response
    pub timestamp: CaptureTimestamp,
    pub address: IpAddr,
    pub message: MessageRecord,
}

/// One correlated request/response exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: u64,
    pub client: Endpoint,
    pub server: Endpoint,
    /// All session flags from the metadata descriptor
    pub flags: BTreeMap<String, String>,
}

impl Transaction {
    pub fn endpoint(&self, side: Side) -> &Endpoint {
        match side {
            Side::Client => &self.client,
            Side::Server => &self.server,
        }
    }
}
