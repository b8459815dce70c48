//! Metadata descriptor parsing
//!
//! Each transaction carries an XML descriptor shaped like:
//!
//! ```xml
//! <Session>
//!   <SessionTimers ClientBeginRequest="..." ServerBeginResponse="..." />
//!   <SessionFlags>
//!     <SessionFlag N="x-clientip" V="::ffff:127.0.0.1" />
//!     <SessionFlag N="x-hostip" V="93.184.216.34" />
//!   </SessionFlags>
//! </Session>
//! ```

use std::collections::BTreeMap;
use std::net::IpAddr;

use roxmltree::{Document, Node};

use crate::address::normalize_address;
use crate::error::{Result, UnsazError};
use crate::timestamp::CaptureTimestamp;

const TIMERS: &str = "SessionTimers";
const FLAGS: &str = "SessionFlags";
const FLAG: &str = "SessionFlag";
const CLIENT_BEGIN_REQUEST: &str = "ClientBeginRequest";
const SERVER_BEGIN_RESPONSE: &str = "ServerBeginResponse";
const CLIENT_IP_FLAG: &str = "x-clientip";
const HOST_IP_FLAG: &str = "x-hostip";

/// Fields extracted from one metadata descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMetadata {
    pub client_begin_request: CaptureTimestamp,
    pub server_begin_response: CaptureTimestamp,
    pub client_address: IpAddr,
    pub server_address: IpAddr,
    /// Every session flag, by name
    pub flags: BTreeMap<String, String>,
}

/// Parse a descriptor for transaction `id`
pub fn parse_metadata(id: u64, bytes: &[u8]) -> Result<SessionMetadata> {
    let malformed = |reason: String| UnsazError::MalformedMetadata { id, reason };

    let text = std::str::from_utf8(bytes).map_err(|e| malformed(format!("not UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let doc = Document::parse(text).map_err(|e| malformed(format!("invalid XML: {e}")))?;
    let root = doc.root_element();

    let timers = child(root, TIMERS).ok_or_else(|| malformed(format!("no {TIMERS} element")))?;
    let timer = |name: &str| {
        timers
            .attribute(name)
            .map(CaptureTimestamp::parse)
            .ok_or_else(|| malformed(format!("no {name} timer")))
    };
    let client_begin_request = timer(CLIENT_BEGIN_REQUEST)?;
    let server_begin_response = timer(SERVER_BEGIN_RESPONSE)?;

    let flags = collect_flags(root);
    let address = |name: &str| -> Result<IpAddr> {
        let value = flags
            .get(name)
            .ok_or_else(|| malformed(format!("no {name} flag")))?;
        normalize_address(value)
    };
    let client_address = address(CLIENT_IP_FLAG)?;
    let server_address = address(HOST_IP_FLAG)?;

    Ok(SessionMetadata {
        client_begin_request,
        server_begin_response,
        client_address,
        server_address,
        flags,
    })
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// First occurrence wins when a flag name repeats
fn collect_flags(root: Node<'_, '_>) -> BTreeMap<String, String> {
    let mut flags = BTreeMap::new();
    let Some(container) = child(root, FLAGS) else {
        return flags;
    };
    for flag in container.children().filter(|n| n.has_tag_name(FLAG)) {
        if let (Some(name), Some(value)) = (flag.attribute("N"), flag.attribute("V")) {
            flags
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    flags
}
