//! Archive member naming convention
//!
//! Transaction members are named `raw/<N>_<role>.<ext>` where `<N>` is a
//! decimal identifier shared by the three members of one transaction and
//! `<role>` is `m` (metadata), `c` (client payload) or `s` (server payload).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::defaults::{MEMBER_PREFIX, METADATA_EXTENSION, PAYLOAD_EXTENSION};

/// Role a member plays within its transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// XML descriptor with timers and session flags
    Metadata,
    /// Raw request as sent by the client
    Client,
    /// Raw response as sent by the server
    Server,
}

impl MemberRole {
    /// Suffix letter used in member names
    pub fn suffix(self) -> char {
        match self {
            MemberRole::Metadata => 'm',
            MemberRole::Client => 'c',
            MemberRole::Server => 's',
        }
    }

    fn from_suffix(c: char) -> Option<Self> {
        match c {
            'm' => Some(MemberRole::Metadata),
            'c' => Some(MemberRole::Client),
            's' => Some(MemberRole::Server),
            _ => None,
        }
    }

    /// Extension the capture tool writes for this role
    pub fn default_extension(self) -> &'static str {
        match self {
            MemberRole::Metadata => METADATA_EXTENSION,
            MemberRole::Client | MemberRole::Server => PAYLOAD_EXTENSION,
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberRole::Metadata => write!(f, "metadata"),
            MemberRole::Client => write!(f, "client"),
            MemberRole::Server => write!(f, "server"),
        }
    }
}

/// A member name that follows the transaction naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberName<'a> {
    pub prefix: &'a str,
    /// Identifier digits exactly as they appear in the name
    pub digits: &'a str,
    pub id: u64,
    pub role: MemberRole,
    pub extension: &'a str,
}

/// Match `name` against `raw/<digits>_<m|c|s>.<ext>`
///
/// Returns `None` for anything outside the `raw/` directory, for nested
/// paths, and for identifiers that do not fit in a `u64`.
pub fn parse_member_name(name: &str) -> Option<MemberName<'_>> {
    let rest = name.strip_prefix(MEMBER_PREFIX)?;
    if rest.contains('/') {
        return None;
    }

    let underscore = rest.find('_')?;
    let digits = &rest[..underscore];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = digits.parse::<u64>().ok()?;

    let mut tail = rest[underscore + 1..].chars();
    let role = MemberRole::from_suffix(tail.next()?)?;
    if tail.next()? != '.' {
        return None;
    }
    let extension = tail.as_str();
    if extension.is_empty() {
        return None;
    }

    Some(MemberName {
        prefix: MEMBER_PREFIX,
        digits,
        id,
        role,
        extension,
    })
}

/// Canonical member name for a role, e.g. `raw/7_s.txt`
pub fn member_name(id: u64, role: MemberRole) -> String {
    format!(
        "{MEMBER_PREFIX}{id}_{}.{}",
        role.suffix(),
        role.default_extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata_member() {
        let m = parse_member_name("raw/12_m.xml").unwrap();
        assert_eq!(m.prefix, "raw/");
        assert_eq!(m.digits, "12");
        assert_eq!(m.id, 12);
        assert_eq!(m.role, MemberRole::Metadata);
        assert_eq!(m.extension, "xml");
    }

    #[test]
    fn test_parse_payload_members() {
        assert_eq!(
            parse_member_name("raw/3_c.txt").map(|m| m.role),
            Some(MemberRole::Client)
        );
        assert_eq!(
            parse_member_name("raw/3_s.txt").map(|m| m.role),
            Some(MemberRole::Server)
        );
    }

    #[test]
    fn test_leading_zeros_keep_digits() {
        let m = parse_member_name("raw/007_m.xml").unwrap();
        assert_eq!(m.digits, "007");
        assert_eq!(m.id, 7);
    }

    #[test]
    fn test_rejects_non_matching_names() {
        for name in [
            "[Content_Types].xml",
            "_index.htm",
            "raw/",
            "raw/_m.xml",
            "raw/1x_m.xml",
            "raw/1_w.xml",
            "raw/1_m",
            "raw/1_m.",
            "raw/1_mxml",
            "raw/sub/1_m.xml",
            "other/1_m.xml",
            "RAW/1_m.xml",
            "raw/99999999999999999999999_m.xml",
        ] {
            assert!(parse_member_name(name).is_none(), "{name} should not match");
        }
    }

    #[test]
    fn test_member_name() {
        assert_eq!(member_name(7, MemberRole::Metadata), "raw/7_m.xml");
        assert_eq!(member_name(7, MemberRole::Client), "raw/7_c.txt");
        assert_eq!(member_name(7, MemberRole::Server), "raw/7_s.txt");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(MemberRole::Client.to_string(), "client");
        assert_eq!(MemberRole::Metadata.suffix(), 'm');
    }
}
