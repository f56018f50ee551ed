//! HTML table extraction
//!
//! Reads every `<table>` on a page into a [`RawTable`], treating the first
//! row as the header row. Tables are returned in document order, nested
//! tables included, so positional indexes line up with what a browser's
//! `document.querySelectorAll("table")` would give.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::models::RawTable;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid CSS selector '{0}'")]
    Selector(String),

    #[error("table index {index} out of range: page has {available} table(s)")]
    TableIndexOutOfRange { index: usize, available: usize },

    #[error("row {row} has {cells} cells but the header has {columns}")]
    RaggedRow { row: usize, cells: usize, columns: usize },
}

fn selector(css: &str) -> Result<Selector, TableError> {
    Selector::parse(css).map_err(|_| TableError::Selector(css.to_string()))
}

/// Parse every table on the page
pub fn read_html_tables(html: &str) -> Result<Vec<RawTable>, TableError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;

    let mut tables = Vec::new();
    for table in document.select(&table_sel) {
        let mut rows = table
            .select(&row_sel)
            // rows of nested tables belong to the nested table
            .filter(|tr| owning_table(*tr).map(|t| t.id()) == Some(table.id()))
            .map(row_cells)
            .collect::<Vec<_>>()
            .into_iter();

        let headers = rows.next().unwrap_or_default();
        let mut body = Vec::new();
        for (i, mut cells) in rows.enumerate() {
            if cells.len() > headers.len() {
                return Err(TableError::RaggedRow {
                    row: i,
                    cells: cells.len(),
                    columns: headers.len(),
                });
            }
            cells.resize(headers.len(), String::new());
            body.push(cells);
        }

        let mut raw = RawTable::new(headers, body);
        strip_thousands_separators(&mut raw);
        tables.push(raw);
    }

    debug!("Parsed {} table(s) from page", tables.len());
    Ok(tables)
}

/// Pick one table by position
pub fn select_table(mut tables: Vec<RawTable>, index: usize) -> Result<RawTable, TableError> {
    if index >= tables.len() {
        return Err(TableError::TableIndexOutOfRange {
            index,
            available: tables.len(),
        });
    }
    Ok(tables.swap_remove(index))
}

fn owning_table(tr: ElementRef<'_>) -> Option<ElementRef<'_>> {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

fn row_cells(tr: ElementRef<'_>) -> Vec<String> {
    let mut cells = Vec::new();
    for cell in tr.children().filter_map(ElementRef::wrap) {
        let name = cell.value().name();
        if name != "td" && name != "th" {
            continue;
        }
        let text = cell.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1);
        for _ in 0..span {
            cells.push(text.clone());
        }
    }
    cells
}

/// Drop `,` grouping from columns where every non-empty cell is a grouped number.
/// A column holding anything else, such as a `-` placeholder, is left as text.
fn strip_thousands_separators(table: &mut RawTable) {
    for col in 0..table.headers.len() {
        let mut any_value = false;
        let numeric = table.rows.iter().all(|row| {
            let cell = row[col].as_str();
            if cell.is_empty() {
                return true;
            }
            any_value = true;
            is_grouped_number(cell)
        });
        if numeric && any_value {
            for row in table.rows.iter_mut() {
                row[col] = row[col].replace(',', "");
            }
        }
    }
}

/// `1,234,567.89`, `-12`, `0.5` and similar
pub(crate) fn is_grouped_number(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    if int_part.is_empty() {
        return false;
    }
    if !int_part.contains(',') {
        return int_part.bytes().all(|b| b.is_ascii_digit());
    }

    let mut groups = int_part.split(',');
    let first = groups.next().unwrap_or_default();
    (1..=3).contains(&first.len())
        && first.bytes().all(|b| b.is_ascii_digit())
        && groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}
