//! Input options for rendering a page.
//!
//! This module contains all configuration types that control how a page is
//! cut from the dataset and how its cells are classified.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PagetableError;
use crate::Result;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Class list of the rendered `<table>` (striped, bordered, compact).
pub const DEFAULT_TABLE_CLASS: &str = "table table-striped table-bordered table-sm";

/// How the last row of a page is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageBounds {
    /// Stop at the end of the data: a page holds
    /// `min(page_size, len - page_index * page_size)` rows
    #[default]
    Clamped,
    /// Every page holds `min(page_size, len)` rows regardless of its offset,
    /// with `len` capped at the rows actually held. Indices past the end
    /// render as rows of empty cells.
    Legacy,
}

impl FromStr for PageBounds {
    type Err = PagetableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "clamped" | "clamp" => Ok(PageBounds::Clamped),
            "legacy" => Ok(PageBounds::Legacy),
            _ => Err(PagetableError::InvalidOption {
                option: "page bounds",
                value: s.to_string(),
            }),
        }
    }
}

/// When cells are checked for date-likeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnTyping {
    /// Run the date heuristic on every cell
    #[default]
    PerCell,
    /// Classify each column once and reuse the decision for all its cells.
    /// `sample` limits how many leading rows are inspected (all when `None`).
    PerColumn { sample: Option<usize> },
}

impl FromStr for ColumnTyping {
    type Err = PagetableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cell" | "per-cell" => Ok(ColumnTyping::PerCell),
            "column" | "per-column" => Ok(ColumnTyping::PerColumn { sample: None }),
            _ => Err(PagetableError::InvalidOption {
                option: "column typing",
                value: s.to_string(),
            }),
        }
    }
}

/// Options for [`render_table_with`](crate::render_table_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Rows per page (at least 1)
    pub page_size: usize,
    /// Page boundary computation
    pub bounds: PageBounds,
    /// Date classification granularity
    pub column_typing: ColumnTyping,
    /// `class` attribute of the table element
    pub table_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            bounds: PageBounds::default(),
            column_typing: ColumnTyping::default(),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the page size. Zero is rejected.
    pub fn page_size(mut self, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(PagetableError::InvalidPageSize);
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Builder: set the page boundary mode
    pub fn bounds(mut self, bounds: PageBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Builder: reproduce the offset-blind page bound
    pub fn legacy_bounds(self) -> Self {
        self.bounds(PageBounds::Legacy)
    }

    /// Builder: set the column typing mode
    pub fn column_typing(mut self, typing: ColumnTyping) -> Self {
        self.column_typing = typing;
        self
    }

    /// Builder: classify each column once, inspecting at most `sample` rows
    pub fn per_column(self, sample: Option<usize>) -> Self {
        self.column_typing(ColumnTyping::PerColumn { sample })
    }

    /// Builder: replace the table's class list
    pub fn table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }
}
