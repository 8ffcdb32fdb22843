//! Core data structures for a tabular result set

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::PagetableError;
use crate::Result;

/// A single raw cell, before any display formatting.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Absent or null
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A number (integers are carried as whole floats)
    Number(f64),
    /// Free text, which may or may not look like a date
    Text(String),
    /// A value already known to be a date/time
    Timestamp(NaiveDateTime),
}

impl CellValue {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Check if this cell is absent
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String form of the cell, or `None` when it is absent.
    pub fn as_display(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", number_string(*n)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// Shortest round-trip form, with `NaN`, `Infinity` and `-Infinity` spelled
/// out. Magnitudes of 1e21 and above, or below 1e-6, switch to exponent form
/// with an explicit sign (`1e+21`, `1.5e-7`).
fn number_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if n == 0.0 {
        // -0 prints as plain 0
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_string(n)
    } else {
        n.to_string()
    }
}

fn exponent_string(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Timestamp(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
            Value::String(s) => CellValue::Text(s),
            // Nested structures are shown as their compact JSON
            nested => CellValue::Text(nested.to_string()),
        }
    }
}

/// One record, keyed by column name.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Row {
    values: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a cell
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.values.insert(column.into(), value.into());
    }

    /// Cell for `column`, if the row has that key
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Give `column` a null value if the row has no such key
    fn fill(&mut self, column: &str) {
        if !self.values.contains_key(column) {
            self.values.insert(column.to_string(), CellValue::Null);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A full result set: display-ordered column names plus rows.
///
/// Every column in `columns` is a key of every row: keys a row lacks are
/// stored as null and display as an empty cell. The renderer only ever
/// borrows a Dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
    /// Declared total row count, when the producer reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<usize>,
}

impl Dataset {
    /// Create a dataset, checking that column names are unique. A row that
    /// lacks one of the columns gets a null cell for it.
    pub fn new(columns: Vec<String>, mut rows: Vec<Row>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(PagetableError::DuplicateColumn(column.clone()));
            }
        }

        for row in &mut rows {
            for column in &columns {
                row.fill(column);
            }
        }

        Ok(Self {
            columns,
            rows,
            length: None,
        })
    }

    /// Builder: record a declared total length, which may differ from the
    /// number of rows actually held.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Column names in display order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Total row count: the declared length if one was given, else the number
    /// of materialized rows.
    pub fn len(&self) -> usize {
        self.length.unwrap_or(self.rows.len())
    }

    /// Number of rows actually held
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Cell at `index` in `column`, or `None` if either is out of range
    pub fn cell(&self, index: usize, column: &str) -> Option<&CellValue> {
        self.row(index).and_then(|row| row.get(column))
    }

    /// All values of one column, in row order
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().filter_map(move |row| row.get(column))
    }
}
