//! A complete HTML page: search form, date range, and the results table.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::pickers::{init_date_range, DateInput};
use super::table::render_table_with;
use crate::data::Dataset;
use crate::format::{escape_attr, escape_str};
use crate::options::RenderOptions;

/// Options for [`render_document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOptions {
    /// Page title
    pub title: String,
    /// Date both pickers start at
    pub today: NaiveDate,
    /// Stylesheet URL linked from the head
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
    /// Pre-filled search text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: "Search".to_string(),
            today: Local::now().date_naive(),
            stylesheet: None,
            query: None,
        }
    }
}

impl DocumentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: set the pickers' starting date
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Builder: link a stylesheet
    pub fn stylesheet(mut self, url: impl Into<String>) -> Self {
        self.stylesheet = Some(url.into());
        self
    }

    /// Builder: pre-fill the search box
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Render page `page` of `dataset` inside a full HTML5 document.
pub fn render_document(
    dataset: &Dataset,
    page: usize,
    options: &RenderOptions,
    document: &DocumentOptions,
) -> String {
    let mut start = DateInput::start();
    let mut end = DateInput::end();
    init_date_range(&mut start, &mut end, document.today);

    let stylesheet = document
        .stylesheet
        .as_deref()
        .map(|url| format!("<link rel='stylesheet' href='{}'>", escape_attr(url)))
        .unwrap_or_default();
    let query = escape_attr(document.query.as_deref().unwrap_or(""));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang='en'>\n<head>\n");
    html.push_str("<meta charset='utf-8'>\n");
    html.push_str(&format!("<title>{}</title>\n", escape_str(&document.title)));
    if !stylesheet.is_empty() {
        html.push_str(&stylesheet);
        html.push('\n');
    }
    html.push_str("</head>\n<body>\n");
    html.push_str("<form id='search' method='get' action='search'>\n");
    html.push_str(&format!(
        "<input type='text' id='query' name='query' value='{}'>\n",
        query
    ));
    html.push_str(&start.to_html());
    html.push('\n');
    html.push_str(&end.to_html());
    html.push('\n');
    html.push_str("<button type='submit'>Search</button>\n</form>\n");
    html.push_str("<div id='results'>");
    html.push_str(&render_table_with(dataset, page, options));
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DocumentOptions {
        DocumentOptions::new()
            .title("Tweets & more")
            .today(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap())
    }

    fn data() -> Dataset {
        Dataset::from_json_str(r#"[{"user": "ann", "at": "2023-05-01T10:15:00"}]"#).unwrap()
    }

    #[test]
    fn test_document_structure() {
        let html = render_document(&data(), 0, &RenderOptions::default(), &options());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Tweets &#38; more</title>"));
        assert!(html.contains("id='start_date' name='start_date' value='2023-05-01'"));
        assert!(html.contains("id='end_date' name='end_date' value='2023-05-01'"));
        assert!(html.contains("<div id='results'><table"));
        assert!(html.contains("<td>01 May 2023 10:15</td>"));
        assert!(!html.contains("<link"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_stylesheet_and_query() {
        let doc = options()
            .stylesheet("https://cdn.example/bootstrap.min.css")
            .query("it's <here>");
        let html = render_document(&data(), 0, &RenderOptions::default(), &doc);
        assert!(html.contains("<link rel='stylesheet' href='https://cdn.example/bootstrap.min.css'>"));
        assert!(html.contains("value='it&#39;s &#60;here&#62;'"));
    }
}
