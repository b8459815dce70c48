//! Presenter
//!
//! Decides which transaction sides are rendered and in which order, then
//! hands each one to a [`TransactionSink`]. Formatting lives in the sinks.

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::address::AddressStyle;
use crate::error::Result;
use crate::loader::TransactionTable;
use crate::sink::TransactionSink;
use crate::transaction::Side;

/// Which transactions, and which sides of them, to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every transaction, client then server, ascending identifier
    #[default]
    All,
    /// Both sides of one transaction
    Transaction(u64),
    /// Only the request of one transaction
    Client(u64),
    /// Only the response of one transaction
    Server(u64),
}

impl Selection {
    /// Identifier of a selective mode, `None` for [`Selection::All`]
    pub fn id(self) -> Option<u64> {
        match self {
            Selection::All => None,
            Selection::Transaction(id) | Selection::Client(id) | Selection::Server(id) => Some(id),
        }
    }

    fn sides(self) -> &'static [Side] {
        match self {
            Selection::All | Selection::Transaction(_) => &[Side::Client, Side::Server],
            Selection::Client(_) => &[Side::Client],
            Selection::Server(_) => &[Side::Server],
        }
    }
}

/// Field selection and styling for rendered lines
///
/// Identifier, timestamp and address are always shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_start_line: bool,
    pub show_headers: bool,
    pub show_body: bool,
    pub address_style: AddressStyle,
    /// Emit ANSI colors
    pub color: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_start_line: true,
            show_headers: false,
            show_body: false,
            address_style: AddressStyle::default(),
            color: false,
        }
    }
}

impl DisplayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_line(mut self, show: bool) -> Self {
        self.show_start_line = show;
        self
    }

    pub fn with_headers(mut self, show: bool) -> Self {
        self.show_headers = show;
        self
    }

    pub fn with_body(mut self, show: bool) -> Self {
        self.show_body = show;
        self
    }

    pub fn with_address_style(mut self, style: AddressStyle) -> Self {
        self.address_style = style;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Status class of a response, from the first digit of its status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Informational,
    Success,
    Redirect,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusClass {
    /// Classify a status line such as `HTTP/1.1 404 Not Found`
    pub fn from_status_line(line: &str) -> Self {
        let digit = line
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.chars().next());
        match digit {
            Some('1') => StatusClass::Informational,
            Some('2') => StatusClass::Success,
            Some('3') => StatusClass::Redirect,
            Some('4') => StatusClass::ClientError,
            Some('5') => StatusClass::ServerError,
            _ => StatusClass::Unknown,
        }
    }

    pub fn color(self) -> Color {
        match self {
            StatusClass::Informational => Color::Blue,
            StatusClass::Success => Color::Green,
            StatusClass::Redirect => Color::Yellow,
            StatusClass::ClientError => Color::Red,
            StatusClass::ServerError => Color::Magenta,
            StatusClass::Unknown => Color::Cyan,
        }
    }
}

/// Color for request lines
pub const CLIENT_COLOR: Color = Color::White;

/// Render `selection` from `table` into `sink`
///
/// Selective modes fail with `UnknownTransaction` when the identifier is not
/// in the table.
pub fn render<S>(table: &TransactionTable, selection: Selection, sink: &mut S) -> Result<()>
where
    S: TransactionSink + ?Sized,
{
    match selection.id() {
        None => {
            for transaction in table.iter() {
                for &side in selection.sides() {
                    sink.emit(transaction, side)?;
                }
            }
        }
        Some(id) => {
            let transaction = table.get(id)?;
            for &side in selection.sides() {
                sink.emit(transaction, side)?;
            }
        }
    }
    sink.finish()
}
