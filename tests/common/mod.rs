//! Common test utilities and helpers

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crypto_history::assets::AssetSource;
use crypto_history::models::Config;

/// Captured page layouts
pub mod fixtures {
    /// Single history table, as on the bitcoin page
    pub const BITCOIN_PAGE: &str = include_str!("../fixtures/bitcoin_page.html");
    /// History as the third table, as on the other asset pages
    pub const ALTCOIN_PAGE: &str = include_str!("../fixtures/altcoin_page.html");
    /// A page whose layout lost the history table
    pub const BROKEN_PAGE: &str = "<html><body><table><tr><th>Name</th></tr></table></body></html>";
}

/// Config pointing at a mock server and writing into `output_dir`
pub fn test_config(server: &MockServer, output_dir: &std::path::Path) -> Config {
    Config {
        base_url: server.uri(),
        output_dir: output_dir.to_path_buf(),
        ..Config::default()
    }
}

/// Serve `body` for the source's historical-data request
pub async fn mount_page(server: &MockServer, source: &AssetSource, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/currencies/{}/historical-data/", source.slug)))
        .and(query_param("start", source.start.format("%Y%m%d").to_string()))
        .and(query_param("end", source.end.format("%Y%m%d").to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Logging utilities for tests
pub mod logging {
    use tracing::info;

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }
}
