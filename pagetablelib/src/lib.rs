//! # pagetablelib
//!
//! Renders one page of a tabular result set as an HTML table.
//!
//! ## Overview
//!
//! The library takes a [`Dataset`] that has already been fetched (ordered column
//! names plus rows keyed by column) and produces markup for a single page of it.
//! Two helpers do the per-cell work:
//!
//! - **escape_text**: turns any cell into a string that is safe to embed in HTML
//! - **looks_like_date**: decides whether a cell should be shown as a timestamp
//!
//! Values that look like dates are reformatted as `DD MMM YYYY HH:mm`; everything
//! else is escaped and shown verbatim.
//!
//! ## Pipeline
//!
//! 1. **data**: `Dataset`, `Row`, `CellValue`, JSON ingestion
//! 2. **query**: page window arithmetic, optional per-column classification
//! 3. **output**: `PageTable` (escaped display strings), then HTML
//!
//! ## Example
//!
//! ```rust
//! use pagetablelib::{render_table, Dataset};
//!
//! let data = Dataset::from_json_str(r#"[
//!     {"id": "1", "name": "Alice", "joined": "2023-05-01"},
//!     {"id": "2", "name": "<Bob>", "joined": "2023/05/01"}
//! ]"#).unwrap();
//!
//! let html = render_table(&data, 0);
//! assert!(html.contains("<td>01 May 2023 00:00</td>"));
//! assert!(html.contains("<td>&#60;Bob&#62;</td>"));
//! assert!(html.contains("<td>2023/05/01</td>"));
//! ```

pub mod data;
pub mod error;
pub mod format;
pub mod options;
pub mod output;
pub mod query;

pub use data::{CellValue, Dataset, Row};
pub use error::PagetableError;
pub use format::{
    escape_str, escape_text, format_timestamp, looks_like_date, parse_loose, TIMESTAMP_FORMAT,
};
pub use options::{ColumnTyping, PageBounds, RenderOptions, DEFAULT_PAGE_SIZE};
pub use output::{
    init_date_range, render_document, render_table, render_table_with, DateField, DateInput,
    DocumentOptions, PageTable,
};
pub use query::{classify_columns, ColumnKind, ColumnKinds, PageWindow};

/// Result type for pagetablelib operations
pub type Result<T> = std::result::Result<T, PagetableError>;
