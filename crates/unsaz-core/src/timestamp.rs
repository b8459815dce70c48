//! Capture timestamps
//!
//! Timer attributes look like `2013-05-17T10:21:35.6230469+02:00`. The raw
//! text is always kept. The zone suffix is dropped before parsing because the
//! stored offset is not reliable, so the parsed value is a naive time local to
//! the capturing host.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A timer value as stored by the capture tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptureTimestamp {
    /// Attribute text, verbatim
    pub raw: String,
    /// Best-effort parse without zone; `None` if the text is not ISO-8601-like
    pub local: Option<NaiveDateTime>,
}

impl CaptureTimestamp {
    pub fn parse(raw: &str) -> Self {
        let local = NaiveDateTime::parse_from_str(strip_zone(raw.trim()), FORMAT).ok();
        if local.is_none() {
            tracing::warn!("Unrecognized timestamp format: {raw:?}");
        }
        Self {
            raw: raw.to_string(),
            local,
        }
    }
}

impl fmt::Display for CaptureTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.raw)
    }
}

/// Remove a trailing `Z` or `±hh:mm` after the time part
fn strip_zone(s: &str) -> &str {
    let Some(t) = s.find('T') else {
        return s;
    };
    match s[t..].find(['Z', 'z', '+', '-']) {
        Some(pos) => &s[..t + pos],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_strip_zone() {
        assert_eq!(
            strip_zone("2013-05-17T10:21:35.6230469+02:00"),
            "2013-05-17T10:21:35.6230469"
        );
        assert_eq!(
            strip_zone("2013-05-17T10:21:35.6230469-07:00"),
            "2013-05-17T10:21:35.6230469"
        );
        assert_eq!(strip_zone("2013-05-17T10:21:35Z"), "2013-05-17T10:21:35");
        assert_eq!(strip_zone("2013-05-17T10:21:35"), "2013-05-17T10:21:35");
        assert_eq!(strip_zone("garbage"), "garbage");
    }

    #[test]
    fn test_parse_keeps_raw_and_drops_zone() {
        let ts = CaptureTimestamp::parse("2013-05-17T10:21:35.6230469+02:00");
        assert_eq!(ts.raw, "2013-05-17T10:21:35.6230469+02:00");

        let local = ts.local.unwrap();
        assert_eq!(local.hour(), 10);
        assert_eq!(local.second(), 35);
        assert_eq!(local.nanosecond(), 623_046_900);
    }

    #[test]
    fn test_parse_unrecognized() {
        let ts = CaptureTimestamp::parse("yesterday");
        assert_eq!(ts.raw, "yesterday");
        assert!(ts.local.is_none());
    }

    #[test]
    fn test_display_pads_raw() {
        let ts = CaptureTimestamp::parse("2013-05-17T10:21:35Z");
        assert_eq!(format!("[{ts:<22}]"), "[2013-05-17T10:21:35Z  ]");
    }
}
