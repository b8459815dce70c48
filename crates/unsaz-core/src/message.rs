//! Message splitter
//!
//! Breaks a raw captured HTTP message into start line, header block and body
//! in a single forward pass. Nothing is decoded: no charset handling, no
//! chunked reassembly, no decompression.

use std::io::{self, BufRead};

/// One side of a transaction, split but not interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRecord {
    /// First line without its terminator
    pub start_line: String,
    /// Header lines verbatim, terminators included, blank separator excluded
    pub header_block: String,
    /// Everything after the blank separator line
    pub body: Vec<u8>,
}

impl MessageRecord {
    /// Body as text, with invalid UTF-8 replaced
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Header lines without terminators
    pub fn header_lines(&self) -> impl Iterator<Item = &str> {
        self.header_block.lines()
    }
}

/// Split a raw message read from `reader`
///
/// Header lines accumulate until a line that is empty after trimming
/// trailing whitespace. Without such a line the whole remainder is the
/// header block and the body is empty.
pub fn split_message<R: BufRead>(mut reader: R) -> io::Result<MessageRecord> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    let start_line = String::from_utf8_lossy(strip_terminator(&line)).into_owned();

    let mut header_block = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 || is_blank(&line) {
            break;
        }
        header_block.extend_from_slice(&line);
    }

    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;

    Ok(MessageRecord {
        start_line,
        header_block: String::from_utf8_lossy(&header_block).into_owned(),
        body,
    })
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}
