//! CSV output for cleaned tables.
//!
//! One file per table: header row first, no index column, UTF-8.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::CleanedTable;

/// Serialize a cleaned table to any writer
pub fn write_table<W: Write>(table: &CleanedTable, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a cleaned table to `path`, replacing any existing file
pub fn write_table_file(table: &CleanedTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_table(table, file).with_context(|| format!("Failed to write {}", path.display()))
}
