//! Per-column type classification.
//!
//! Instead of running the date heuristic on every cell, a column can be
//! classified once and the decision reused for all of its cells.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::data::Dataset;
use crate::format::looks_like_date;

/// What a column holds, for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Date,
}

/// Column name → kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnKinds(BTreeMap<String, ColumnKind>);

impl ColumnKinds {
    /// Kind of `column`; unknown columns are text.
    pub fn get(&self, column: &str) -> ColumnKind {
        self.0.get(column).copied().unwrap_or(ColumnKind::Text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.0.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Classify every column of `dataset`.
///
/// A column is [`ColumnKind::Date`] when it has at least one non-null value
/// among the inspected rows and every non-null inspected value looks like a
/// date. Only the first `sample` rows are inspected when a sample size is
/// given.
pub fn classify_columns(dataset: &Dataset, sample: Option<usize>) -> ColumnKinds {
    let limit = sample.unwrap_or(usize::MAX);
    let kinds = dataset
        .columns()
        .iter()
        .map(|column| {
            let mut seen = 0usize;
            let all_dates = dataset
                .column_values(column)
                .take(limit)
                .filter(|value| !value.is_null())
                .inspect(|_| seen += 1)
                .all(looks_like_date);
            let kind = if seen > 0 && all_dates {
                ColumnKind::Date
            } else {
                ColumnKind::Text
            };
            trace!(column = %column, ?kind, inspected = seen, "classified column");
            (column.clone(), kind)
        })
        .collect();

    ColumnKinds(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_json_str(
            r#"[
                {"id": "1", "created": "2023-05-01", "note": null,  "mixed": "2023-05-01"},
                {"id": "2", "created": null,         "note": null,  "mixed": "soon"},
                {"id": "3", "created": "2023-06-01", "note": null,  "mixed": "2023-07-01"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_classification() {
        let kinds = classify_columns(&sample(), None);
        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds.get("id"), ColumnKind::Text);
        assert_eq!(kinds.get("created"), ColumnKind::Date);
        assert_eq!(kinds.get("note"), ColumnKind::Text);
        assert_eq!(kinds.get("mixed"), ColumnKind::Text);
        assert_eq!(kinds.get("unknown"), ColumnKind::Text);
    }

    #[test]
    fn test_sample_limits_inspection() {
        let kinds = classify_columns(&sample(), Some(1));
        assert_eq!(kinds.get("mixed"), ColumnKind::Date);
        let kinds = classify_columns(&sample(), Some(2));
        assert_eq!(kinds.get("mixed"), ColumnKind::Text);
    }

    #[test]
    fn test_serializes_as_map() {
        let kinds = classify_columns(&sample(), None);
        let json = serde_json::to_value(&kinds).unwrap();
        assert_eq!(json["created"], "date");
        assert_eq!(json["id"], "text");
    }
}
