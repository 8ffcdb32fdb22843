//! Output dispatch for the CLI: HTML markup or table-ready JSON

use std::str::FromStr;

use pagetablelib::{render_document, Dataset, DocumentOptions, PageTable, RenderOptions};
use serde::Serialize;

/// What the CLI prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Markup, ready to drop into a page
    #[default]
    Html,
    /// The `PageTable` as pretty JSON
    Json,
}

impl FromStr for OutputMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(OutputMode::Html),
            "json" => Ok(OutputMode::Json),
            other => Err(anyhow::anyhow!("unknown output mode: {}", other)),
        }
    }
}

/// JSON payload of the `document` command
#[derive(Debug, Serialize)]
struct DocumentContext<'a> {
    document: &'a DocumentOptions,
    table: PageTable,
}

/// Render one page as a table
pub fn render_table_output(
    dataset: &Dataset,
    page: usize,
    options: &RenderOptions,
    mode: OutputMode,
) -> Result<String, anyhow::Error> {
    let table = PageTable::build(dataset, page, options);
    match mode {
        OutputMode::Html => Ok(format!("{}\n", table.to_html())),
        OutputMode::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&table)?)),
    }
}

/// Render one page inside the full search document
pub fn render_document_output(
    dataset: &Dataset,
    page: usize,
    options: &RenderOptions,
    document: &DocumentOptions,
    mode: OutputMode,
) -> Result<String, anyhow::Error> {
    match mode {
        OutputMode::Html => Ok(render_document(dataset, page, options, document)),
        OutputMode::Json => {
            let context = DocumentContext {
                document,
                table: PageTable::build(dataset, page, options),
            };
            Ok(format!("{}\n", serde_json::to_string_pretty(&context)?))
        }
    }
}
