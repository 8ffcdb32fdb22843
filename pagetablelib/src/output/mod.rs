//! Output formatting: present a page as HTML.
//!
//! This module handles the third and final stage of the pipeline -
//! formatting a page for display. It provides:
//!
//! - **PageTable**: Table-ready data with escaped headers and cells
//! - **render_table**: One page as a `<table>` element
//! - **render_document**: The table inside a page with the search form
//! - **DateInput**: Date pickers, initialized explicitly via `init_date_range`
//!
//! ## Example
//!
//! ```rust
//! use pagetablelib::{Dataset, PageTable, RenderOptions};
//!
//! let data = Dataset::from_json_str(r#"[{"id": "1"}, {"id": "2"}]"#).unwrap();
//! let options = RenderOptions::new().page_size(1).unwrap();
//! let table = PageTable::build(&data, 1, &options);
//! assert_eq!(table.rows, vec![vec!["2".to_string()]]);
//! assert_eq!(table.page_count, 2);
//! ```

pub mod document;
pub mod pickers;
pub mod table;

pub use document::{render_document, DocumentOptions};
pub use pickers::{init_date_range, DateField, DateInput, END_DATE_ID, START_DATE_ID};
pub use table::{render_table, render_table_with, PageTable};
