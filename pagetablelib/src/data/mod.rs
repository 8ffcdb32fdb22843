//! Input data: the result set to be rendered.
//!
//! This module handles the first stage of the pipeline - holding the rows and
//! column order handed over by whatever fetched them. It provides:
//!
//! - **CellValue**: One raw cell (null, text, number, bool, timestamp)
//! - **Row**: One record keyed by column name
//! - **Dataset**: Column order plus rows, with the column invariant enforced
//! - **Loading**: `Dataset::from_json_str` / `from_json_file`
//!
//! ## Example
//!
//! ```rust
//! use pagetablelib::data::{CellValue, Dataset};
//!
//! let data = Dataset::from_json_str(r#"{"columns": ["id"], "rows": [{"id": 7}]}"#).unwrap();
//! assert_eq!(data.cell(0, "id"), Some(&CellValue::Number(7.0)));
//! ```

pub mod dataset;
pub mod load;

pub use dataset::{CellValue, Dataset, Row};
