//! Output sinks
//!
//! A sink receives one transaction side at a time, already selected and
//! ordered by the presenter. [`TextSink`] writes the aligned, optionally
//! colored listing; [`JsonSink`] writes one JSON object per line.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDateTime;
use crossterm::style::{style, Color, Stylize};
use serde::Serialize;

use crate::defaults::{ADDRESS_COLUMN_WIDTH, COLUMN_GAP, ID_COLUMN_WIDTH, TIMESTAMP_COLUMN_WIDTH};
use crate::error::Result;
use crate::presenter::{DisplayOptions, StatusClass, CLIENT_COLOR};
use crate::transaction::{Side, Transaction};

/// Destination for rendered transaction sides
pub trait TransactionSink {
    /// Render one side of a transaction
    fn emit(&mut self, transaction: &Transaction, side: Side) -> Result<()>;

    /// Called once after the last side
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Human-readable listing, one summary line per side
pub struct TextSink<W> {
    out: W,
    options: DisplayOptions,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, options: DisplayOptions) -> Self {
        Self { out, options }
    }

    fn summary_line(&self, transaction: &Transaction, side: Side) -> String {
        let endpoint = transaction.endpoint(side);
        let address = self.options.address_style.render(endpoint.address);
        let mut line = format!(
            "{id:>id_w$}{gap}{timestamp:<ts_w$}{gap}",
            id = transaction.id,
            timestamp = endpoint.timestamp,
            gap = COLUMN_GAP,
            id_w = ID_COLUMN_WIDTH,
            ts_w = TIMESTAMP_COLUMN_WIDTH,
        );
        if self.options.show_start_line {
            line.push_str(&format!(
                "{address:<addr_w$}{gap}{start}",
                gap = COLUMN_GAP,
                addr_w = ADDRESS_COLUMN_WIDTH,
                start = endpoint.message.start_line,
            ));
        } else {
            line.push_str(&address);
        }
        line
    }
}

/// Display color for one side of a transaction
pub fn side_color(transaction: &Transaction, side: Side) -> Color {
    match side {
        Side::Client => CLIENT_COLOR,
        Side::Server => StatusClass::from_status_line(&transaction.server.message.start_line).color(),
    }
}

impl<W: Write> TransactionSink for TextSink<W> {
    fn emit(&mut self, transaction: &Transaction, side: Side) -> Result<()> {
        let line = self.summary_line(transaction, side);
        if self.options.color {
            writeln!(self.out, "{}", style(line).with(side_color(transaction, side)))?;
        } else {
            writeln!(self.out, "{line}")?;
        }

        let message = &transaction.endpoint(side).message;
        if self.options.show_headers {
            for header in message.header_lines() {
                writeln!(self.out, "{header}")?;
            }
        }
        if self.options.show_body && !message.body.is_empty() {
            self.out.write_all(&message.body)?;
            if !message.body.ends_with(b"\n") {
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SideRecord<'a> {
    id: u64,
    side: Side,
    timestamp: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_time: Option<NaiveDateTime>,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_line: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    flags: &'a BTreeMap<String, String>,
}

/// JSON Lines output for scripting
pub struct JsonSink<W> {
    out: W,
    options: DisplayOptions,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W, options: DisplayOptions) -> Self {
        Self { out, options }
    }
}

impl<W: Write> TransactionSink for JsonSink<W> {
    fn emit(&mut self, transaction: &Transaction, side: Side) -> Result<()> {
        let endpoint = transaction.endpoint(side);
        let message = &endpoint.message;
        let record = SideRecord {
            id: transaction.id,
            side,
            timestamp: &endpoint.timestamp.raw,
            local_time: endpoint.timestamp.local,
            address: self.options.address_style.render(endpoint.address),
            start_line: self
                .options
                .show_start_line
                .then_some(message.start_line.as_str()),
            headers: self
                .options
                .show_headers
                .then(|| message.header_lines().collect()),
            body: self.options.show_body.then(|| message.body_text()),
            flags: &transaction.flags,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
