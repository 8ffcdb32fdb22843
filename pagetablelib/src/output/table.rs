//! Table-ready data for one page, and its HTML form.
//!
//! The data flow is:
//! 1. Dataset (raw cells)
//! 2. PageWindow + optional ColumnKinds (which rows, which columns are dates)
//! 3. PageTable (escaped display strings)
//! 4. HTML
//!
//! PageTable holds no raw values: every header and cell is already safe to
//! place inside an element, so it can be serialized to JSON or turned into
//! markup without further escaping.

use serde::Serialize;
use tracing::debug;

use crate::data::{CellValue, Dataset};
use crate::format::{
    escape_attr, escape_str, escape_text, format_timestamp, looks_like_date, parse_loose,
};
use crate::options::{ColumnTyping, RenderOptions};
use crate::query::{classify_columns, ColumnKind, ColumnKinds, PageWindow};

/// One page of a dataset, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageTable {
    /// `class` attribute of the table element
    pub class: String,
    /// Escaped column names, in display order
    pub headers: Vec<String>,
    /// Body rows; one escaped or date-formatted string per column
    pub rows: Vec<Vec<String>>,
    /// Zero-based page index
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Total row count of the dataset
    pub total_rows: usize,
    /// Pages needed to show every row
    pub page_count: usize,
    /// Column classification, when cells were typed per column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_kinds: Option<ColumnKinds>,
}

impl PageTable {
    /// Cut page `page` from `dataset` and format its cells.
    pub fn build(dataset: &Dataset, page: usize, options: &RenderOptions) -> Self {
        let window = PageWindow::compute(dataset, page, options.page_size, options.bounds);
        let column_kinds = match options.column_typing {
            ColumnTyping::PerCell => None,
            ColumnTyping::PerColumn { sample } => Some(classify_columns(dataset, sample)),
        };

        let headers: Vec<String> = dataset.columns().iter().map(|c| escape_str(c)).collect();
        let rows: Vec<Vec<String>> = window
            .rows()
            .map(|index| {
                dataset
                    .columns()
                    .iter()
                    .map(|column| {
                        let kind = column_kinds.as_ref().map(|kinds| kinds.get(column));
                        // Rows past the end (legacy bounds) render as empty cells
                        dataset
                            .cell(index, column)
                            .map(|value| display_cell(value, kind))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        debug!(
            page,
            start = window.start,
            rows = window.count,
            columns = dataset.columns().len(),
            bounds = ?options.bounds,
            "built page table"
        );

        PageTable {
            class: options.table_class.clone(),
            headers,
            rows,
            page,
            page_size: options.page_size,
            total_rows: dataset.len(),
            page_count: PageWindow::page_count(dataset.len(), options.page_size),
            column_kinds,
        }
    }

    /// Render as a single `<table>` element.
    pub fn to_html(&self) -> String {
        let mut html = format!("<table class='{}'>", escape_attr(&self.class));

        html.push_str("<tr>");
        for header in &self.headers {
            html.push_str("<th>");
            html.push_str(header);
            html.push_str("</th>");
        }
        html.push_str("</tr>");

        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str("<td>");
                html.push_str(cell);
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }

        html.push_str("</table>");
        html
    }
}

/// Display string of one cell.
///
/// With no column kind, the date heuristic runs on the cell itself. In a date
/// column, text and timestamps that parse are reformatted; in a text column
/// nothing is.
fn display_cell(value: &CellValue, kind: Option<ColumnKind>) -> String {
    let as_date = match kind {
        None => looks_like_date(value),
        Some(ColumnKind::Date) => matches!(value, CellValue::Text(_) | CellValue::Timestamp(_)),
        Some(ColumnKind::Text) => false,
    };

    if as_date {
        if let Some(ts) = parse_loose(value) {
            return format_timestamp(&ts);
        }
    }
    escape_text(value)
}

/// Render page `page` of `dataset` with the default options: 100 rows per
/// page, clamped bounds, per-cell date detection.
pub fn render_table(dataset: &Dataset, page: usize) -> String {
    render_table_with(dataset, page, &RenderOptions::default())
}

/// Render page `page` of `dataset` as an HTML table.
///
/// Never fails: unusable cells degrade to escaped text, and a page past the
/// end yields a header with no body rows (or, with legacy bounds, rows of
/// empty cells).
pub fn render_table_with(dataset: &Dataset, page: usize, options: &RenderOptions) -> String {
    PageTable::build(dataset, page, options).to_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;
    use chrono::NaiveDate;

    const TABLE_OPEN: &str = "<table class='table table-striped table-bordered table-sm'>";

    fn people() -> Dataset {
        Dataset::from_json_str(
            r#"{"columns": ["id", "name"], "rows": [
                {"id": "1", "name": "Alice"},
                {"id": "2", "name": "Bob"}
            ]}"#,
        )
        .unwrap()
    }

    fn numbered(n: usize) -> Dataset {
        let rows = (0..n)
            .map(|i| Row::new().with("n", i as i64).with("when", "2023-05-01"))
            .collect();
        Dataset::new(vec!["n".to_string(), "when".to_string()], rows).unwrap()
    }

    fn body_rows(html: &str) -> usize {
        // The header row is the only one holding <th>
        html.matches("<tr>").count() - 1
    }

    #[test]
    fn test_two_by_two_table() {
        let html = render_table(&people(), 0);
        assert_eq!(
            html,
            format!(
                "{}<tr><th>id</th><th>name</th></tr>\
                 <tr><td>1</td><td>Alice</td></tr>\
                 <tr><td>2</td><td>Bob</td></tr></table>",
                TABLE_OPEN
            )
        );
    }

    #[test]
    fn test_date_cells_are_reformatted() {
        let data = Dataset::from_json_str(
            r#"[{"a": "2023-05-01", "b": "2023/05/01", "c": "42", "d": null}]"#,
        )
        .unwrap();
        let table = PageTable::build(&data, 0, &RenderOptions::default());
        assert_eq!(
            table.rows,
            vec![vec![
                "01 May 2023 00:00".to_string(),
                "2023/05/01".to_string(),
                "42".to_string(),
                String::new(),
            ]]
        );
    }

    #[test]
    fn test_headers_and_cells_are_escaped() {
        let data = Dataset::from_json_str(r#"[{"<h>": "a & b"}]"#).unwrap();
        let html = render_table(&data, 0);
        assert!(html.contains("<th>&#60;h&#62;</th>"));
        assert!(html.contains("<td>a &#38; b</td>"));
        assert!(!html.contains("<h>"));
    }

    #[test]
    fn test_timestamp_cells() {
        let ts = NaiveDate::from_ymd_opt(2021, 3, 4)
            .unwrap()
            .and_hms_opt(5, 6, 0)
            .unwrap();
        let data = Dataset::new(vec!["t".to_string()], vec![Row::new().with("t", ts)]).unwrap();
        assert!(render_table(&data, 0).contains("<td>04 Mar 2021 05:06</td>"));
    }

    #[test]
    fn test_five_rows_first_page() {
        let html = render_table(&numbered(5), 0);
        assert_eq!(body_rows(&html), 5);
    }

    #[test]
    fn test_page_past_end_is_empty_by_default() {
        let html = render_table(&numbered(5), 1);
        assert_eq!(body_rows(&html), 0);
        assert!(html.contains("<th>n</th><th>when</th>"));
    }

    #[test]
    fn test_page_past_end_with_legacy_bounds() {
        let options = RenderOptions::new().legacy_bounds();
        let table = PageTable::build(&numbered(5), 1, &options);
        assert_eq!(table.rows.len(), 5);
        assert!(table
            .rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty())));
        assert_eq!(body_rows(&table.to_html()), 5);
    }

    #[test]
    fn test_legacy_bounds_ignore_inflated_length() {
        let options = RenderOptions::new()
            .page_size(100_000_000)
            .unwrap()
            .legacy_bounds();
        let data = numbered(5).with_length(100_000_000);
        let table = PageTable::build(&data, 1, &options);
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.total_rows, 100_000_000);
    }

    #[test]
    fn test_missing_key_renders_empty_cell() {
        let data = Dataset::from_json_str(
            r#"{"columns": ["id", "name"], "rows": [{"id": "1", "name": "A"}, {"id": "2"}]}"#,
        )
        .unwrap();
        let html = render_table(&data, 0);
        assert!(html.contains("<tr><td>2</td><td></td></tr>"));
    }

    #[test]
    fn test_partial_page() {
        let options = RenderOptions::default();
        let table = PageTable::build(&numbered(150), 1, &options);
        assert_eq!(table.rows.len(), 50);
        assert_eq!(table.rows[0][0], "100");
        assert_eq!(table.page_count, 2);
        assert_eq!(table.total_rows, 150);

        let legacy = PageTable::build(&numbered(150), 1, &options.legacy_bounds());
        assert_eq!(legacy.rows.len(), 100);
        assert_eq!(legacy.rows[49][0], "149");
        assert_eq!(legacy.rows[50][0], "");
    }

    #[test]
    fn test_custom_page_size() {
        let options = RenderOptions::new().page_size(2).unwrap();
        let table = PageTable::build(&numbered(5), 2, &options);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "4");
        assert_eq!(table.page_count, 3);
    }

    #[test]
    fn test_per_column_typing() {
        let data = Dataset::from_json_str(
            r#"[
                {"when": "2023-05-01", "label": "2023-05-01"},
                {"when": "2023/06/01", "label": "plain"}
            ]"#,
        )
        .unwrap();

        // Sampling one row makes "when" a date column, so the second cell is
        // reformatted even though it is not on the allow-list
        let options = RenderOptions::new().per_column(Some(1));
        let table = PageTable::build(&data, 0, &options);
        assert_eq!(table.rows[1][0], "01 Jun 2023 00:00");

        assert_eq!(table.rows[1][1], "plain");

        // A full scan sees the mixed values, so both columns stay text and
        // even the allow-listed cells are shown verbatim
        let table = PageTable::build(&data, 0, &RenderOptions::new().per_column(None));
        assert_eq!(table.rows[0][0], "2023-05-01");
        assert_eq!(table.rows[0][1], "2023-05-01");
        let kinds = table.column_kinds.unwrap();
        assert_eq!(kinds.get("when"), ColumnKind::Text);
        assert_eq!(kinds.get("label"), ColumnKind::Text);
    }

    #[test]
    fn test_custom_class_is_attribute_escaped() {
        let options = RenderOptions::new().table_class("x' onclick='y");
        let html = render_table_with(&people(), 0, &options);
        assert!(html.starts_with("<table class='x&#39; onclick=&#39;y'>"));
    }

    #[test]
    fn test_json_shape() {
        let table = PageTable::build(&people(), 0, &RenderOptions::default());
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["headers"][1], "name");
        assert_eq!(json["rows"][1][1], "Bob");
        assert_eq!(json["page_count"], 1);
        assert!(json.get("column_kinds").is_none());
    }
}
