//! # pagetable
//!
//! A CLI tool for rendering one page of a JSON result set as an HTML table.
//!
//! ## Overview
//!
//! pagetable is built on top of pagetablelib. It reads a dataset that has
//! already been exported to JSON, cuts the requested page, escapes every cell
//! and reformats cells that look like dates.
//!
//! ## Usage
//!
//! ```bash
//! # First page of a result set
//! pagetable results.json
//!
//! # Third page, 25 rows per page
//! pagetable results.json --page 2 --page-size 25
//!
//! # Classify columns once instead of per cell
//! pagetable results.json --typing column --sample 50
//!
//! # Table-ready JSON instead of markup
//! pagetable results.json --output json
//!
//! # Full page with the search form and date range
//! pagetable document results.json --title "Tweets" --today 2023-05-01
//! ```

mod render;

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::Style;
use pagetablelib::{
    ColumnTyping, Dataset, DocumentOptions, PageBounds, RenderOptions, DEFAULT_PAGE_SIZE,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use render::{render_document_output, render_table_output, OutputMode};

/// Environment variable holding an EnvFilter directive
const LOG_ENV: &str = "PAGETABLE_LOG";

/// Arguments shared by the root command and every subcommand
fn page_args() -> Vec<Arg> {
    vec![
        Arg::new("file")
            .help("JSON dataset: an array of records or {\"columns\", \"rows\"}")
            .required(true),
        Arg::new("page")
            .short('p')
            .long("page")
            .value_parser(value_parser!(usize))
            .default_value("0")
            .help("Zero-based page index"),
        Arg::new("page-size")
            .short('n')
            .long("page-size")
            .value_parser(value_parser!(usize))
            .default_value("100")
            .help("Rows per page"),
        Arg::new("bounds")
            .long("bounds")
            .value_parser(["clamped", "legacy"])
            .default_value("clamped")
            .help("Page boundary: stop at the data, or size every page by the dataset length (legacy)"),
        Arg::new("typing")
            .long("typing")
            .value_parser(["cell", "column"])
            .default_value("cell")
            .help("Check every cell for dates, or classify each column once"),
        Arg::new("sample")
            .long("sample")
            .value_parser(value_parser!(usize))
            .help("Rows inspected per column with --typing column"),
        Arg::new("output")
            .short('o')
            .long("output")
            .value_parser(["html", "json"])
            .default_value("html")
            .help("Output format"),
    ]
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("pagetable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a page of a JSON result set as an HTML table")
        .subcommand_negates_reqs(true)
        .args(page_args())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("table")
                .about("Render one page as a <table> element (default command)")
                .args(page_args()),
        )
        .subcommand(
            Command::new("document")
                .about("Render one page inside a full HTML page with the search form")
                .args(page_args())
                .arg(
                    Arg::new("title")
                        .long("title")
                        .default_value("Search")
                        .help("Document title"),
                )
                .arg(
                    Arg::new("today")
                        .long("today")
                        .value_parser(parse_date)
                        .help("Date the pickers start at (YYYY-MM-DD, defaults to today)"),
                )
                .arg(
                    Arg::new("stylesheet")
                        .long("stylesheet")
                        .help("Stylesheet URL to link"),
                )
                .arg(
                    Arg::new("query")
                        .short('q')
                        .long("query")
                        .help("Pre-filled search text"),
                ),
        )
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Send tracing output to stderr, honoring PAGETABLE_LOG over -v
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build render options from matches
fn build_options(matches: &ArgMatches) -> Result<RenderOptions, anyhow::Error> {
    let page_size = matches
        .get_one::<usize>("page-size")
        .copied()
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let bounds = matches
        .get_one::<String>("bounds")
        .map(|s| s.parse::<PageBounds>())
        .transpose()?
        .unwrap_or_default();
    let typing = match matches
        .get_one::<String>("typing")
        .map(|s| s.parse::<ColumnTyping>())
        .transpose()?
        .unwrap_or_default()
    {
        ColumnTyping::PerColumn { .. } => ColumnTyping::PerColumn {
            sample: matches.get_one::<usize>("sample").copied(),
        },
        ColumnTyping::PerCell => ColumnTyping::PerCell,
    };

    Ok(RenderOptions::new()
        .page_size(page_size)?
        .bounds(bounds)
        .column_typing(typing))
}

/// Load the dataset and read the page/output arguments shared by all commands
fn load_page(matches: &ArgMatches) -> Result<(Dataset, usize, OutputMode), anyhow::Error> {
    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow::anyhow!("missing dataset file"))?;
    let dataset = Dataset::from_json_file(file)?;
    let page = matches.get_one::<usize>("page").copied().unwrap_or(0);
    let mode = matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputMode>())
        .transpose()?
        .unwrap_or_default();
    debug!(file = %file, page, ?mode, rows = dataset.len(), "rendering page");
    Ok((dataset, page, mode))
}

/// Handler for the table command
fn table_handler(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let options = build_options(matches)?;
    let (dataset, page, mode) = load_page(matches)?;
    render_table_output(&dataset, page, &options, mode)
}

/// Handler for the document command
fn document_handler(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let options = build_options(matches)?;
    let (dataset, page, mode) = load_page(matches)?;

    debug!(title = ?matches.get_one::<String>("title"), "building document");
    let mut document = DocumentOptions::new();
    if let Some(title) = matches.get_one::<String>("title") {
        document = document.title(title);
    }
    if let Some(today) = matches.get_one::<NaiveDate>("today") {
        document = document.today(*today);
    }
    if let Some(url) = matches.get_one::<String>("stylesheet") {
        document = document.stylesheet(url);
    }
    if let Some(query) = matches.get_one::<String>("query") {
        document = document.query(query);
    }

    render_document_output(&dataset, page, &options, &document, mode)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    setup_logging(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("document", sub)) => document_handler(sub),
        Some(("table", sub)) => table_handler(sub),
        // No subcommand: treat the root arguments as `table`
        _ => table_handler(&matches),
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let prefix = Style::new().red().bold().for_stderr();
            eprintln!("{} {:#}", prefix.apply_to("Error:"), e);
            ExitCode::FAILURE
        }
    }
}
