//! JSON ingestion for datasets.
//!
//! Three shapes are accepted:
//!
//! - object form: `{"columns": [...], "rows": [{...}], "length": N}` where
//!   `columns` and `length` are optional
//! - indexed form: `{"columns": [...], "length": N, "0": {...}, "1": {...}}`,
//!   the array-like object a query client hands back
//! - records form: `[{...}, {...}]`
//!
//! When no column list is given, the columns are every key seen across the
//! rows, in first-seen order. A row without one of the columns gets a null
//! cell.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use super::dataset::{Dataset, Row};
use crate::error::PagetableError;
use crate::Result;

impl Dataset {
    /// Parse a dataset from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Read and parse a dataset from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| PagetableError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            columns = dataset.columns().len(),
            rows = dataset.row_count(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Build a dataset from an already-parsed JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(records) => from_records(None, records, None),
            Value::Object(mut object) => {
                let columns = match object.remove("columns") {
                    None | Some(Value::Null) => None,
                    Some(Value::Array(names)) => Some(column_names(names)?),
                    Some(_) => {
                        return Err(PagetableError::InvalidDataset(
                            "'columns' must be an array of strings".to_string(),
                        ))
                    }
                };
                let length = match object.remove("length") {
                    None | Some(Value::Null) => None,
                    Some(Value::Number(n)) => match n.as_u64() {
                        Some(n) => Some(n as usize),
                        None => {
                            return Err(PagetableError::InvalidDataset(
                                "'length' must be a non-negative integer".to_string(),
                            ))
                        }
                    },
                    Some(_) => {
                        return Err(PagetableError::InvalidDataset(
                            "'length' must be a non-negative integer".to_string(),
                        ))
                    }
                };
                let records = match object.remove("rows") {
                    Some(Value::Array(records)) => records,
                    Some(_) => {
                        return Err(PagetableError::InvalidDataset(
                            "'rows' must be an array".to_string(),
                        ))
                    }
                    None => indexed_records(&mut object, length),
                };
                from_records(columns, records, length)
            }
            _ => Err(PagetableError::InvalidDataset(
                "expected an array of records or an object".to_string(),
            )),
        }
    }
}

fn column_names(names: Vec<Value>) -> Result<Vec<String>> {
    names
        .into_iter()
        .map(|name| match name {
            Value::String(s) => Ok(s),
            other => Err(PagetableError::InvalidDataset(format!(
                "column names must be strings, found {}",
                other
            ))),
        })
        .collect()
}

/// Pull rows stored under the keys `"0"`, `"1"`, ... out of an object,
/// stopping at the first missing index or at the declared length.
fn indexed_records(object: &mut Map<String, Value>, length: Option<usize>) -> Vec<Value> {
    (0..length.unwrap_or(usize::MAX))
        .map_while(|index| object.remove(&index.to_string()))
        .collect()
}

/// Every key seen across `objects`, in first-seen order
fn union_of_keys(objects: &[Map<String, Value>]) -> Vec<String> {
    let mut seen = HashSet::new();
    objects
        .iter()
        .flat_map(|object| object.keys())
        .filter(|key| seen.insert(key.as_str()))
        .cloned()
        .collect()
}

fn from_records(
    columns: Option<Vec<String>>,
    records: Vec<Value>,
    length: Option<usize>,
) -> Result<Dataset> {
    let objects: Vec<Map<String, Value>> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Object(object) => Ok(object),
            _ => Err(PagetableError::InvalidDataset(format!(
                "row {} is not an object",
                index
            ))),
        })
        .collect::<Result<_>>()?;

    let columns = columns.unwrap_or_else(|| union_of_keys(&objects));

    let rows: Vec<Row> = objects.into_iter().map(|object| object.into_iter().collect()).collect();

    let dataset = Dataset::new(columns, rows)?;
    Ok(match length {
        Some(length) => dataset.with_length(length),
        None => dataset,
    })
}
