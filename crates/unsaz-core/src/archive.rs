//! Archive scanner
//!
//! Wraps a zip container and indexes its members by transaction identifier.
//! Members that do not follow the `raw/<N>_<role>.<ext>` convention are
//! ignored; an identifier exists only if its metadata member exists.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::error::{Result, UnsazError};
use crate::member::{member_name, parse_member_name, MemberRole};

/// Names of the members found for one transaction identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSet {
    pub metadata: Option<String>,
    pub client: Option<String>,
    pub server: Option<String>,
}

impl MemberSet {
    /// Member name for a role, if present in the archive
    pub fn get(&self, role: MemberRole) -> Option<&str> {
        match role {
            MemberRole::Metadata => self.metadata.as_deref(),
            MemberRole::Client => self.client.as_deref(),
            MemberRole::Server => self.server.as_deref(),
        }
    }

    /// Member name for a role, or `MissingMember` naming the canonical member
    pub fn require(&self, id: u64, role: MemberRole) -> Result<&str> {
        self.get(role).ok_or_else(|| UnsazError::MissingMember {
            id,
            member: member_name(id, role),
        })
    }

    fn slot(&mut self, role: MemberRole) -> &mut Option<String> {
        match role {
            MemberRole::Metadata => &mut self.metadata,
            MemberRole::Client => &mut self.client,
            MemberRole::Server => &mut self.server,
        }
    }
}

/// Identifier-ordered member index produced by [`SazArchive::scan`]
pub type ScanIndex = BTreeMap<u64, MemberSet>;

/// A capture archive opened for reading
pub struct SazArchive<R> {
    zip: ZipArchive<R>,
}

impl SazArchive<File> {
    /// Open a capture archive from disk
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            UnsazError::ArchiveRead(format!("Failed to open {}: {e}", path.display()))
        })?;
        Self::from_reader(file).map_err(|e| match e {
            UnsazError::ArchiveRead(msg) => {
                UnsazError::ArchiveRead(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }
}

impl<R: Read + Seek> SazArchive<R> {
    /// Read the central directory of a zip container
    pub fn from_reader(reader: R) -> Result<Self> {
        let zip = ZipArchive::new(reader)?;
        tracing::debug!("Opened archive with {} members", zip.len());
        Ok(Self { zip })
    }

    /// Number of members in the container, matching or not
    pub fn member_count(&self) -> usize {
        self.zip.len()
    }

    /// Group matching members by identifier
    ///
    /// Only identifiers with a metadata member are returned. Payload members
    /// without a metadata sibling are dropped with a debug log.
    pub fn scan(&self) -> ScanIndex {
        let mut index = ScanIndex::new();

        for name in self.zip.file_names() {
            let Some(parsed) = parse_member_name(name) else {
                continue;
            };
            let slot = index.entry(parsed.id).or_default().slot(parsed.role);
            if slot.is_none() {
                *slot = Some(name.to_string());
                continue;
            }
            tracing::warn!(
                id = parsed.id,
                "Ignoring {name}: {} member already provided by {}",
                parsed.role,
                slot.as_deref().unwrap_or_default()
            );
        }

        index.retain(|id, members| {
            if members.metadata.is_none() {
                tracing::debug!(id, "Ignoring payload members without metadata");
                return false;
            }
            true
        });

        tracing::debug!("Found {} transactions", index.len());
        index
    }

    /// Open one member for a forward-only read
    pub fn open_member(&mut self, name: &str) -> Result<impl Read + '_> {
        Ok(self.zip.by_name(name)?)
    }

    /// Read one member fully into memory
    pub fn read_member(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.open_member(name)?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Build an in-memory zip holding the given members
    pub fn build_zip(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in members {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    pub fn metadata_xml(client_ip: &str, host_ip: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Session SID="1" BitFlags="0">
  <SessionTimers ClientConnected="2013-05-17T10:21:35.5000000+02:00" ClientBeginRequest="2013-05-17T10:21:35.6230469+02:00" ServerBeginResponse="2013-05-17T10:21:35.9042969+02:00" ClientDoneResponse="2013-05-17T10:21:35.9200000+02:00" />
  <PipeInfo CltReuse="true" />
  <SessionFlags>
    <SessionFlag N="x-clientip" V="{client_ip}" />
    <SessionFlag N="x-clientport" V="51234" />
    <SessionFlag N="x-hostip" V="{host_ip}" />
  </SessionFlags>
</Session>"#
        )
    }

    pub const REQUEST: &[u8] =
        b"GET http://example.com/ HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n";

    pub fn response(status_line: &str) -> Vec<u8> {
        format!("{status_line}\r\nContent-Length: 5\r\n\r\nhello").into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_scan_groups_members_by_id() {
        let xml = metadata_xml("::ffff:127.0.0.1", "93.184.216.34");
        let resp = response("HTTP/1.1 200 OK");
        let data = build_zip(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("raw/2_m.xml", xml.as_bytes()),
            ("raw/2_c.txt", REQUEST),
            ("raw/2_s.txt", resp.as_slice()),
            ("raw/10_m.xml", xml.as_bytes()),
            ("raw/10_c.txt", REQUEST),
            ("raw/10_s.txt", resp.as_slice()),
            ("raw/1_m.xml", xml.as_bytes()),
        ]);

        let archive = SazArchive::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(archive.member_count(), 8);

        let index = archive.scan();
        let ids: Vec<u64> = index.keys().copied().collect();
        assert_eq!(ids, vec![1, 2, 10]);
        assert_eq!(index[&10].client.as_deref(), Some("raw/10_c.txt"));
        assert_eq!(index[&1].client, None);
    }

    #[test]
    fn test_scan_drops_payloads_without_metadata() {
        let data = build_zip(&[("raw/4_c.txt", REQUEST), ("raw/4_s.txt", REQUEST)]);
        let archive = SazArchive::from_reader(Cursor::new(data)).unwrap();
        assert!(archive.scan().is_empty());
    }

    #[test]
    fn test_scan_keeps_first_duplicate() {
        let data = build_zip(&[("raw/7_m.xml", b"<a/>"), ("raw/07_m.xml", b"<b/>")]);
        let archive = SazArchive::from_reader(Cursor::new(data)).unwrap();
        let index = archive.scan();
        assert_eq!(index.len(), 1);
        assert_eq!(index[&7].metadata.as_deref(), Some("raw/7_m.xml"));
    }

    #[test]
    fn test_require_reports_canonical_name() {
        let members = MemberSet {
            metadata: Some("raw/7_m.xml".to_string()),
            client: Some("raw/7_c.txt".to_string()),
            server: None,
        };
        assert_eq!(members.require(7, MemberRole::Client).unwrap(), "raw/7_c.txt");
        assert_eq!(
            members.require(7, MemberRole::Server).unwrap_err(),
            UnsazError::MissingMember {
                id: 7,
                member: "raw/7_s.txt".to_string()
            }
        );
    }

    #[test]
    fn test_read_member() {
        let data = build_zip(&[("raw/1_c.txt", REQUEST)]);
        let mut archive = SazArchive::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(archive.read_member("raw/1_c.txt").unwrap(), REQUEST);
        assert!(archive.read_member("raw/1_s.txt").is_err());
    }

    #[test]
    fn test_open_rejects_non_zip() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), b"not a zip file").unwrap();
        let err = SazArchive::open(temp.path()).err().unwrap();
        assert!(matches!(err, UnsazError::ArchiveRead(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SazArchive::open(&dir.path().join("missing.saz")).err().unwrap();
        assert!(matches!(err, UnsazError::ArchiveRead(ref m) if m.contains("missing.saz")));
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("capture.saz");
        let xml = metadata_xml("127.0.0.1", "10.0.0.1");
        std::fs::write(&path, build_zip(&[("raw/1_m.xml", xml.as_bytes())])).unwrap();

        let archive = SazArchive::open(&path).unwrap();
        assert_eq!(archive.scan().len(), 1);
    }
}
