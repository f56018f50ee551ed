//! Table normalizer
//!
//! Turns a scraped OHLCV table into its cleaned form:
//! dates parsed, volume placeholders zeroed and coerced to `i64`,
//! footnote-marked column names renamed. Row count, row order and
//! column order never change.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::models::{Cell, CleanedTable, RawTable};

pub const DATE_COLUMN: &str = "Date";
pub const VOLUME_COLUMN: &str = "Volume";

/// Literal the source page uses for missing volume
pub const VOLUME_PLACEHOLDER: &str = "-";

/// Source column name and its cleaned name
pub const COLUMN_RENAMES: [(&str, &str); 2] = [("Open*", "Open"), ("Close**", "Close")];

/// Date layouts accepted in the `Date` column, tried in order.
/// The first one is the layout the historical-data page uses.
pub const SOURCE_DATE_FORMATS: [&str; 4] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("table has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' is not a recognizable date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: volume '{value}' is not a 64-bit integer")]
    InvalidVolume { row: usize, value: String },

    #[error("row {row} has {cells} cells but the header has {columns}")]
    RowWidth { row: usize, cells: usize, columns: usize },
}

/// Clean a raw table: parse dates, coerce volume, rename columns
pub fn normalize(raw: RawTable) -> Result<CleanedTable, NormalizeError> {
    let RawTable { headers, rows } = raw;
    if let Some((row, cells)) = rows
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != headers.len())
    {
        return Err(NormalizeError::RowWidth {
            row,
            cells: cells.len(),
            columns: headers.len(),
        });
    }
    let mut table = CleanedTable {
        columns: headers,
        rows: rows
            .into_iter()
            .map(|row| row.into_iter().map(Cell::Text).collect())
            .collect(),
    };

    parse_dates(&mut table)?;
    coerce_volume(&mut table)?;
    rename_columns(&mut table);

    debug!("Normalized table with {} rows", table.row_count());
    Ok(table)
}

/// Parse every `Date` cell into a calendar date
pub fn parse_dates(table: &mut CleanedTable) -> Result<(), NormalizeError> {
    let idx = table
        .column_index(DATE_COLUMN)
        .ok_or(NormalizeError::MissingColumn(DATE_COLUMN))?;

    for (row_num, row) in table.rows.iter_mut().enumerate() {
        let Some(cell) = row.get_mut(idx) else {
            return Err(NormalizeError::InvalidDate { row: row_num, value: String::new() });
        };
        if let Cell::Text(text) = &*cell {
            let date = parse_source_date(text).ok_or_else(|| NormalizeError::InvalidDate {
                row: row_num,
                value: text.clone(),
            })?;
            *cell = Cell::Date(date);
        }
    }
    Ok(())
}

/// Replace the volume placeholder with zero and coerce the column to `i64`
pub fn coerce_volume(table: &mut CleanedTable) -> Result<(), NormalizeError> {
    let idx = table
        .column_index(VOLUME_COLUMN)
        .ok_or(NormalizeError::MissingColumn(VOLUME_COLUMN))?;

    for (row_num, row) in table.rows.iter_mut().enumerate() {
        let Some(cell) = row.get_mut(idx) else {
            return Err(NormalizeError::InvalidVolume { row: row_num, value: String::new() });
        };
        if let Cell::Text(text) = &*cell {
            let volume = if text == VOLUME_PLACEHOLDER {
                0
            } else {
                parse_volume(text).ok_or_else(|| NormalizeError::InvalidVolume {
                    row: row_num,
                    value: text.clone(),
                })?
            };
            *cell = Cell::Integer(volume);
        }
    }
    Ok(())
}

/// `Open*` becomes `Open` and `Close**` becomes `Close`; absent names are left alone
pub fn rename_columns(table: &mut CleanedTable) {
    for column in table.columns.iter_mut() {
        if let Some((_, to)) = COLUMN_RENAMES.iter().find(|(from, _)| column.as_str() == *from) {
            *column = to.to_string();
        }
    }
}

pub fn parse_source_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    SOURCE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

fn parse_volume(text: &str) -> Option<i64> {
    let text = text.trim();
    let text = match text.strip_prefix('+') {
        Some(rest) if rest.starts_with('-') => return None,
        Some(rest) => rest,
        None => text,
    };
    if !crate::html_table::is_grouped_number(text) || text.contains('.') {
        return None;
    }
    text.replace(',', "").parse::<i64>().ok()
}
