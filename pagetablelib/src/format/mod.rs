//! Per-cell formatting helpers.
//!
//! - **escape**: `escape_text` / `escape_str`, numeric character references for
//!   markup-significant and non-ASCII characters
//! - **date**: `looks_like_date`, `parse_loose`, `format_timestamp`

pub mod date;
pub mod escape;

pub use date::{format_timestamp, looks_like_date, parse_loose, TIMESTAMP_FORMAT};
pub use escape::{escape_attr, escape_str, escape_text};
