//! Query processing: cut a page and classify columns.
//!
//! This module handles the second stage of the pipeline - deciding which rows
//! belong to the requested page and, optionally, what kind each column holds.
//! It provides:
//!
//! - **PageWindow**: Row range of one page under a `PageBounds` mode
//! - **ColumnKinds**: Per-column `Text`/`Date` decision, computed once
//!
//! ## Example
//!
//! ```rust
//! use pagetablelib::{Dataset, PageBounds, PageWindow};
//!
//! let data = Dataset::from_json_str(r#"[{"n": 1}, {"n": 2}, {"n": 3}]"#).unwrap();
//! let window = PageWindow::compute(&data, 1, 2, PageBounds::Clamped);
//! assert_eq!(window.rows(), 2..3);
//! ```

pub mod columns;
pub mod page;

pub use columns::{classify_columns, ColumnKind, ColumnKinds};
pub use page::PageWindow;
