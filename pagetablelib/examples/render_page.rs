//! Render a page of a JSON dataset and print the table-ready rows.

use pagetablelib::{Dataset, PageTable, RenderOptions};
use std::env;

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "data.json".to_string());
    let page = env::args()
        .nth(2)
        .and_then(|p| p.parse().ok())
        .unwrap_or(0);

    let dataset = Dataset::from_json_file(&path).expect("Failed to load dataset");
    let table = PageTable::build(&dataset, page, &RenderOptions::new().per_column(Some(100)));

    println!("{}", table.headers.join(" | "));
    for row in &table.rows {
        println!("{}", row.join(" | "));
    }
    println!();
    println!(
        "page {} of {} ({} rows)",
        table.page + 1,
        table.page_count,
        table.total_rows
    );
}
