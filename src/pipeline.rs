//! Fetch → clean → write, one asset at a time
//!
//! Assets run strictly in sequence and the first failure ends the run.
//! Files written before the failure stay on disk; the failing asset's
//! file is never created because writing only starts after cleaning.

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::api::PageFetcher;
use crate::assets::AssetSource;
use crate::csv_export::write_table_file;
use crate::html_table::{read_html_tables, select_table};
use crate::models::{Cell, Config, ExportSummary};
use crate::normalizer::{normalize, VOLUME_COLUMN};

/// Export a single asset's history to its CSV file
pub async fn export_asset<F>(fetcher: &F, source: &AssetSource, config: &Config) -> Result<ExportSummary>
where
    F: PageFetcher + Sync + ?Sized,
{
    let url = source.url(&config.base_url)?;
    info!("🌐 Fetching {} history from {}", source.symbol, url);

    let html = fetcher
        .fetch_page(url.as_str())
        .await
        .with_context(|| format!("Failed to fetch {} page {}", source.symbol, url))?;

    let tables = read_html_tables(&html)
        .with_context(|| format!("Failed to read tables on {} page", source.symbol))?;
    let raw = select_table(tables, source.table_index)
        .with_context(|| format!("Unexpected {} page layout", source.symbol))?;

    let table = normalize(raw).with_context(|| format!("Failed to clean {} table", source.symbol))?;

    let zero_volume_rows = table
        .column(VOLUME_COLUMN)
        .map(|cells| cells.iter().filter(|c| matches!(c, Cell::Integer(0))).count())
        .unwrap_or(0);

    let path = config.output_dir.join(source.output_file);
    write_table_file(&table, &path)?;

    info!("✅ Wrote {} rows for {} to {}", table.row_count(), source.symbol, path.display());

    Ok(ExportSummary {
        symbol: source.symbol.to_string(),
        path,
        rows: table.row_count(),
        zero_volume_rows,
    })
}

/// Export every source in order, stopping at the first failure
pub async fn export_all<F>(fetcher: &F, sources: &[AssetSource], config: &Config) -> Result<Vec<ExportSummary>>
where
    F: PageFetcher + Sync + ?Sized,
{
    let mut summaries = Vec::with_capacity(sources.len());
    for source in sources {
        match export_asset(fetcher, source, config).await {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                error!("❌ {} export failed: {:#}", source.symbol, e);
                return Err(e);
            }
        }
    }
    Ok(summaries)
}
