// src/extract/document.rs

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("CSS selector for table rows should be valid"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("CSS selector for table cells should be valid"));

/// Trimmed cell text of one result table, row by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Text at `(row, cell)`, or `None` if the row or cell does not exist.
    pub fn cell(&self, row: usize, cell: usize) -> Option<&str> {
        self.rows.get(row)?.get(cell).map(String::as_str)
    }
}

/// Anything the extractor can read result tables out of.
pub trait ResultDocument {
    /// All elements matching the result-table marker, in document order.
    fn result_tables(&self) -> &[ResultTable];
}

impl ResultDocument for Vec<ResultTable> {
    fn result_tables(&self) -> &[ResultTable] {
        self
    }
}

/// A result page parsed with `scraper`.
///
/// The DOM is read once into owned text so the document can move across
/// threads; `scraper::Html` itself cannot.
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    tables: Vec<ResultTable>,
}

impl HtmlDocument {
    /// Parse `html` and collect every table matching `table_selector`.
    pub fn parse(html: &str, table_selector: &str) -> Result<Self> {
        let selector = Selector::parse(table_selector)
            .map_err(|e| anyhow!("invalid result table selector {:?}: {:?}", table_selector, e))?;
        let doc = Html::parse_document(html);
        let tables: Vec<ResultTable> = doc.select(&selector).map(read_table).collect();
        debug!(
            selector = table_selector,
            tables = tables.len(),
            "parsed result page"
        );
        Ok(Self { tables })
    }

    pub fn into_tables(self) -> Vec<ResultTable> {
        self.tables
    }
}

impl ResultDocument for HtmlDocument {
    fn result_tables(&self) -> &[ResultTable] {
        &self.tables
    }
}

fn read_table(table: ElementRef<'_>) -> ResultTable {
    let rows = table
        .select(&ROW_SELECTOR)
        .map(|row| row.select(&CELL_SELECTOR).map(cell_text).collect())
        .collect();
    ResultTable::new(rows)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <table class="table"><tr><th>Head</th></tr><tr><td> a </td><td>
              b
          </td></tr></table>
          <table class="other"><tr><td>ignored</td></tr></table>
          <table class="table"><tr><td><span>nested</span> text</td></tr></table>
        </body></html>
    "#;

    #[test]
    fn test_parse_selects_marked_tables() {
        let doc = HtmlDocument::parse(PAGE, "table.table").unwrap();
        let tables = doc.result_tables();
        assert_eq!(tables.len(), 2);

        // header row has no <td> cells
        assert_eq!(tables[0].rows()[0], Vec::<String>::new());
        assert_eq!(tables[0].cell(1, 0), Some("a"));
        assert_eq!(tables[0].cell(1, 1), Some("b"));
        assert_eq!(tables[1].cell(0, 0), Some("nested text"));
    }

    #[test]
    fn test_missing_cells_are_none() {
        let doc = HtmlDocument::parse(PAGE, "table.table").unwrap();
        let table = &doc.result_tables()[0];
        assert_eq!(table.cell(1, 5), None);
        assert_eq!(table.cell(9, 0), None);
    }

    #[test]
    fn test_bad_selector_is_an_error() {
        assert!(HtmlDocument::parse(PAGE, "table[").is_err());
    }

    #[test]
    fn test_page_without_tables() {
        let doc = HtmlDocument::parse("<p>Captcha mismatch</p>", "table.table").unwrap();
        assert!(doc.into_tables().is_empty());
    }
}
