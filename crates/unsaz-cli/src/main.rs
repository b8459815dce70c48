//! unsaz CLI
//!
//! Command-line interface for listing the HTTP transactions stored in a
//! Fiddler `.saz` capture archive.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use unsaz_core::{
    render, AddressStyle, DisplayOptions, JsonSink, SazArchive, Selection, TextSink,
    TransactionSink, TransactionTable,
};

/// Command line tool for processing Fiddler .saz files
///
/// Lists every captured transaction as a request line and a response line,
/// colored by response status.
#[derive(Parser, Debug)]
#[command(name = "unsaz")]
#[command(version, about, long_about = None)]
struct Args {
    /// Fiddler input file
    saz_file: PathBuf,

    /// List a single transaction
    #[arg(short = 'i', value_name = "ID", conflicts_with_all = ["client", "server"])]
    transaction: Option<u64>,

    /// List a single request
    #[arg(short = 'c', value_name = "ID", conflicts_with = "server")]
    client: Option<u64>,

    /// List a single response
    #[arg(short = 's', value_name = "ID")]
    server: Option<u64>,

    /// Hide request/response line
    #[arg(short = 'L', long = "no-line")]
    no_line: bool,

    /// Show request/response headers
    #[arg(short = 'H', long)]
    headers: bool,

    /// Show request/response body
    #[arg(short = 'B', long)]
    body: bool,

    /// Show IPv4-mapped addresses as IPv4 (default)
    #[arg(short = '4', conflicts_with = "ipv6")]
    ipv4: bool,

    /// Show all addresses in IPv6 form
    #[arg(short = '6')]
    ipv6: bool,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// When to color the output
    #[arg(long, env = "UNSAZ_COLOR", default_value = "auto")]
    color: ColorChoice,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl Args {
    fn selection(&self) -> Selection {
        match (self.transaction, self.client, self.server) {
            (Some(id), _, _) => Selection::Transaction(id),
            (_, Some(id), _) => Selection::Client(id),
            (_, _, Some(id)) => Selection::Server(id),
            _ => Selection::All,
        }
    }

    fn display_options(&self) -> DisplayOptions {
        let address_style = if self.ipv6 && !self.ipv4 {
            AddressStyle::Ipv6
        } else {
            AddressStyle::Ipv4
        };
        DisplayOptions::new()
            .with_start_line(!self.no_line)
            .with_headers(self.headers)
            .with_body(self.body)
            .with_address_style(address_style)
            .with_color(self.use_color())
    }

    fn use_color(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        }
    }
}

/// Load the archive and render the selection into `out`
///
/// Returns `Ok(false)` when some transactions were skipped in whole-archive
/// mode; selective modes fail outright instead.
fn run(args: &Args, out: &mut dyn Write) -> unsaz_core::Result<bool> {
    let selection = args.selection();

    let table = {
        let mut archive = SazArchive::open(&args.saz_file)?;
        match selection.id() {
            Some(id) => TransactionTable::load_one(&mut archive, id)?,
            None => TransactionTable::load_all(&mut archive),
        }
    };

    for failure in table.failures() {
        tracing::error!(id = failure.id, "Skipping transaction: {}", failure.error);
    }

    let options = args.display_options();
    let mut sink: Box<dyn TransactionSink + '_> = match args.format {
        OutputFormat::Text => Box::new(TextSink::new(out, options)),
        OutputFormat::Json => Box::new(JsonSink::new(out, options)),
    };
    render(&table, selection, sink.as_mut())?;

    Ok(table.failures().is_empty())
}

fn main() -> ExitCode {
    // Initialize logging; diagnostics go to stderr, results to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("Reading {}", args.saz_file.display());

    let mut stdout = io::stdout().lock();
    match run(&args, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
