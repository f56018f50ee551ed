//! Fixed historical-data sources, one per asset
//!
//! Each source names its table by position on the page. The positions were
//! read off the live page layout: the bitcoin page's history is its first
//! table, the other four pages carry it as the third. If the layout moves,
//! `inspect_tables` lists what a page currently holds.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSource {
    pub symbol: &'static str,
    /// Path segment under `/currencies/`
    pub slug: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Zero-based position of the history table among the page's tables
    pub table_index: usize,
    pub output_file: &'static str,
}

impl AssetSource {
    /// Historical-data page for this asset's date range
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let mut base = Url::parse(base_url)?;
        // join() replaces the last segment unless the base path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut url = base.join(&format!("currencies/{}/historical-data/", self.slug))?;
        url.query_pairs_mut()
            .append_pair("start", &self.start.format("%Y%m%d").to_string())
            .append_pair("end", &self.end.format("%Y%m%d").to_string());
        Ok(url)
    }
}

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid source date"),
    }
}

pub const BITCOIN: AssetSource = AssetSource {
    symbol: "BTC",
    slug: "bitcoin",
    start: ymd(2013, 4, 29),
    end: ymd(2020, 12, 9),
    table_index: 0,
    output_file: "btc_data.csv",
};

pub const ETHEREUM: AssetSource = AssetSource {
    symbol: "ETH",
    slug: "ethereum",
    start: ymd(2013, 4, 29),
    end: ymd(2020, 3, 31),
    table_index: 2,
    output_file: "eth_data.csv",
};

pub const XRP: AssetSource = AssetSource {
    symbol: "XRP",
    slug: "xrp",
    start: ymd(2013, 4, 29),
    end: ymd(2020, 3, 31),
    table_index: 2,
    output_file: "xrp_data.csv",
};

pub const LITECOIN: AssetSource = AssetSource {
    symbol: "LTC",
    slug: "litecoin",
    start: ymd(2013, 4, 29),
    end: ymd(2020, 3, 31),
    table_index: 2,
    output_file: "ltc_data.csv",
};

pub const MONERO: AssetSource = AssetSource {
    symbol: "XMR",
    slug: "monero",
    start: ymd(2014, 5, 21),
    end: ymd(2020, 3, 31),
    table_index: 2,
    output_file: "xmr_data.csv",
};

/// All sources, in export order
pub const ALL_ASSETS: [AssetSource; 5] = [BITCOIN, ETHEREUM, XRP, LITECOIN, MONERO];

/// Look up a source by symbol or slug, ignoring case
pub fn find_asset(name: &str) -> Option<&'static AssetSource> {
    ALL_ASSETS
        .iter()
        .find(|a| a.symbol.eq_ignore_ascii_case(name) || a.slug.eq_ignore_ascii_case(name))
}

/// Sources for the requested names, or every source when none are given
pub fn select_assets(names: &[String]) -> Result<Vec<AssetSource>> {
    if names.is_empty() {
        return Ok(ALL_ASSETS.to_vec());
    }
    names
        .iter()
        .map(|name| {
            find_asset(name)
                .cloned()
                .ok_or_else(|| anyhow!("Unknown asset '{}', expected one of BTC, ETH, XRP, LTC, XMR", name))
        })
        .collect()
}
