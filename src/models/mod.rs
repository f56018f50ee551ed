use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Date format written to the CSV output
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A table exactly as scraped: header names plus rows of text cells
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A single cleaned cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Date(NaiveDate),
    Integer(i64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Date(date) => write!(f, "{}", date.format(OUTPUT_DATE_FORMAT)),
            Cell::Integer(value) => write!(f, "{}", value),
        }
    }
}

/// Table after normalization, ready for export
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl CleanedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of one column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }
}

/// Outcome of exporting one asset
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub symbol: String,
    pub path: PathBuf,
    pub rows: usize,
    pub zero_volume_rows: usize,
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://coinmarketcap.com".to_string(),
            output_dir: PathBuf::from("."),
            http_timeout: Duration::from_secs(30),
            user_agent: "crypto-history/0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a whole number of seconds, got: {}", raw)
            })?),
            None => defaults.http_timeout,
        };

        Ok(Config {
            base_url: lookup("COINMARKETCAP_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            http_timeout,
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    /// Command-line output directory wins over the environment
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}
