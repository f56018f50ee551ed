//! Integration tests for the fetch → clean → write pipeline against a mock page server

use test_log::test;
use pretty_assertions::assert_eq;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures::{ALTCOIN_PAGE, BITCOIN_PAGE, BROKEN_PAGE};
use crate::common::logging::log_test_step;
use crate::common::{mount_page, test_config};
use crypto_history::api::PageClient;
use crypto_history::assets::{ALL_ASSETS, BITCOIN, ETHEREUM, LITECOIN, MONERO, XRP};
use crypto_history::pipeline::{export_all, export_asset};

fn read_csv(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let headers = reader
        .headers()
        .expect("Missing header row")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Bad CSV record").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

#[test(tokio::test)]
async fn test_exports_all_five_assets() {
    log_test_step("Exporting all assets from a mock server");

    let server = MockServer::start().await;
    mount_page(&server, &BITCOIN, BITCOIN_PAGE).await;
    for source in [&ETHEREUM, &XRP, &LITECOIN, &MONERO] {
        mount_page(&server, source, ALTCOIN_PAGE).await;
    }

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&server, dir.path());
    let client = PageClient::new(&config).expect("Failed to build client");

    let summaries = export_all(&client, &ALL_ASSETS, &config).await.expect("Export failed");
    let symbols: Vec<_> = summaries.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BTC", "ETH", "XRP", "LTC", "XMR"]);

    for file in ["btc_data.csv", "eth_data.csv", "xrp_data.csv", "ltc_data.csv", "xmr_data.csv"] {
        let (headers, rows) = read_csv(&dir.path().join(file));
        assert_eq!(headers, vec!["Date", "Open", "High", "Low", "Close", "Volume", "Market Cap"]);
        assert_eq!(rows.len(), 3, "{file}");
    }
}

#[test(tokio::test)]
async fn test_bitcoin_rows_cleaned() {
    let server = MockServer::start().await;
    mount_page(&server, &BITCOIN, BITCOIN_PAGE).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&server, dir.path());
    let client = PageClient::new(&config).expect("Failed to build client");

    let summary = export_asset(&client, &BITCOIN, &config).await.expect("Export failed");
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.zero_volume_rows, 1);

    let (_, rows) = read_csv(&summary.path);
    assert_eq!(
        rows[0],
        vec!["2020-12-09", "19201.57", "19667.45", "18911.18", "19625.84", "0", "364548312153"]
    );
    assert_eq!(rows[1][0], "2020-12-08");
    assert_eq!(rows[1][5], "31844200000");
    assert_eq!(rows[2][5], "26896357742");
}

#[test(tokio::test)]
async fn test_altcoin_history_read_from_third_table() {
    let server = MockServer::start().await;
    mount_page(&server, &MONERO, ALTCOIN_PAGE).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&server, dir.path());
    let client = PageClient::new(&config).expect("Failed to build client");

    export_asset(&client, &MONERO, &config).await.expect("Export failed");

    let (_, rows) = read_csv(&dir.path().join("xmr_data.csv"));
    let volumes: Vec<_> = rows.iter().map(|r| r[5].as_str()).collect();
    assert_eq!(volumes, vec!["9432032177", "10653473574", "0"]);
    assert_eq!(rows[2][0], "2014-05-21");
}

#[test(tokio::test)]
async fn test_missing_table_aborts_run() {
    log_test_step("Second asset page has no history table");

    let server = MockServer::start().await;
    mount_page(&server, &BITCOIN, BITCOIN_PAGE).await;
    mount_page(&server, &ETHEREUM, BROKEN_PAGE).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&server, dir.path());
    let client = PageClient::new(&config).expect("Failed to build client");

    let result = export_all(&client, &[BITCOIN, ETHEREUM, XRP], &config).await;
    let err = result.expect_err("Run should abort");
    assert!(format!("{:#}", err).contains("ETH"));

    assert!(dir.path().join("btc_data.csv").exists());
    assert!(!dir.path().join("eth_data.csv").exists());
    assert!(!dir.path().join("xrp_data.csv").exists());
}

#[test(tokio::test)]
async fn test_http_error_status_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&server, dir.path());
    let client = PageClient::new(&config).expect("Failed to build client");

    let err = export_asset(&client, &BITCOIN, &config).await.expect_err("503 should fail");
    assert!(format!("{:#}", err).contains("503"));
    assert!(!dir.path().join("btc_data.csv").exists());
}
