use anyhow::{Result, anyhow};
use clap::Parser;
use serde::Serialize;

use crypto_history::api::{PageClient, PageFetcher};
use crypto_history::assets::find_asset;
use crypto_history::html_table::read_html_tables;
use crypto_history::models::Config;

/// List the tables on an asset's historical-data page
#[derive(Parser)]
#[command(name = "inspect_tables")]
#[command(about = "Show every table on an asset's page with its index, so table indexes can be re-checked")]
struct Args {
    /// Asset symbol or name (e.g. BTC, monero)
    asset: String,

    /// Print the overview as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TableOverview {
    index: usize,
    headers: Vec<String>,
    rows: usize,
    first_row: Option<Vec<String>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let source = find_asset(&args.asset).ok_or_else(|| anyhow!("Unknown asset '{}'", args.asset))?;

    let config = Config::from_env()?;
    let url = source.url(&config.base_url)?;
    let html = PageClient::new(&config)?.fetch_page(url.as_str()).await?;

    let overview: Vec<TableOverview> = read_html_tables(&html)?
        .into_iter()
        .enumerate()
        .map(|(index, table)| TableOverview {
            index,
            first_row: table.rows.first().cloned(),
            rows: table.row_count(),
            headers: table.headers,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    println!("=== Tables on {} ===", url);
    println!("Configured index for {}: {}", source.symbol, source.table_index);
    for table in &overview {
        let marker = if table.index == source.table_index { "👉" } else { "  " };
        println!("{} [{}] {} rows | {}", marker, table.index, table.rows, table.headers.join(", "));
        if let Some(row) = &table.first_row {
            println!("       first row: {}", row.join(", "));
        }
    }
    Ok(())
}
