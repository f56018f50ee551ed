use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crypto_history::api::PageClient;
use crypto_history::assets::select_assets;
use crypto_history::models::Config;
use crypto_history::pipeline::export_all;

/// Historical crypto price exporter
#[derive(Parser)]
#[command(name = "crypto-history")]
#[command(version = "0.1.0")]
#[command(about = "Export daily OHLCV history for BTC, ETH, XRP, LTC and XMR to CSV")]
#[command(long_about = "
Fetches the historical-data page of each asset, cleans the price table
(dates parsed, missing volume set to 0, footnote markers dropped from the
Open/Close headers) and writes one CSV per asset:

  btc_data.csv  eth_data.csv  xrp_data.csv  ltc_data.csv  xmr_data.csv

Assets run one after another; the first failure stops the run.

Examples:
  cargo run                          # all five assets into the current directory
  cargo run -- -o data               # write into ./data
  cargo run -- -a btc -a xmr         # only bitcoin and monero
")]
struct Args {
    /// Directory for the CSV files (overrides OUTPUT_DIR)
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Restrict the run to these assets, by symbol or name (repeatable)
    #[arg(long = "asset", short = 'a')]
    assets: Vec<String>,

    /// Debug-level logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "crypto_history=debug" } else { "crypto_history=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = Config::from_env()?.with_output_dir(args.output_dir);
    std::fs::create_dir_all(&config.output_dir)?;

    let sources = select_assets(&args.assets)?;
    info!("🚀 Exporting {} asset(s) into {}", sources.len(), config.output_dir.display());

    let client = PageClient::new(&config)?;
    let summaries = export_all(&client, &sources, &config).await?;

    for summary in &summaries {
        info!(
            "📊 {}: {} rows ({} without volume) -> {}",
            summary.symbol,
            summary.rows,
            summary.zero_volume_rows,
            summary.path.display()
        );
    }
    info!("🎉 Export completed successfully!");
    Ok(())
}
