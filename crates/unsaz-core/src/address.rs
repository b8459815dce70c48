//! Peer address normalization
//!
//! The capture tool records peer addresses in IPv6-capable form, so IPv4
//! peers usually appear as `::ffff:a.b.c.d`. Those are folded back to the
//! dotted quad; genuine IPv6 addresses are kept as-is.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv6Addr};

use crate::error::{Result, UnsazError};

/// How addresses are shown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressStyle {
    /// IPv4-mapped addresses shown as dotted quads
    #[default]
    Ipv4,
    /// Every address shown in IPv6 form
    Ipv6,
}

impl AddressStyle {
    /// Render a normalized address in this style
    pub fn render(self, addr: IpAddr) -> String {
        match (self, addr) {
            (AddressStyle::Ipv6, IpAddr::V4(v4)) => v4.to_ipv6_mapped().to_string(),
            _ => addr.to_string(),
        }
    }
}

/// Parse an embedded address value into its canonical form
///
/// `::ffff:192.0.2.1` becomes `192.0.2.1`, `2001:db8::1` stays unchanged and
/// plain IPv4 literals pass through.
pub fn normalize_address(value: &str) -> Result<IpAddr> {
    let trimmed = value.trim();
    let addr: IpAddr = trimmed.parse().map_err(|_| UnsazError::AddressFormat {
        value: value.to_string(),
    })?;
    Ok(match addr {
        IpAddr::V6(v6) => unmap(v6),
        v4 => v4,
    })
}

fn unmap(v6: Ipv6Addr) -> IpAddr {
    match v6.to_ipv4_mapped() {
        Some(v4) => IpAddr::V4(v4),
        None => IpAddr::V6(v6),
    }
}
