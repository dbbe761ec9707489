use std::fs;
use tracing::{error, info};

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gesmes:Envelope xmlns:gesmes="http://www.gesmes.org/xml/2002-08-01" xmlns="http://www.ecb.int/vocabulary/2002-08-01/eurofxref">
    <gesmes:subject>Reference rates</gesmes:subject>
    <gesmes:Sender>
        <gesmes:name>European Central Bank</gesmes:name>
    </gesmes:Sender>
    <Cube>
        <Cube time="2024-03-15">
            <Cube currency="USD" rate="1.0926"/>
            <Cube currency="JPY" rate="162.35"/>
            <Cube currency="GBP" rate="0.8541"/>
        </Cube>
    </Cube>
</gesmes:Envelope>"#;

    pub async fn create_feed_mock_server(feed_body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/eurofxref/eurofxref-daily.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(feed_body))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_feed_mock_server(test_utils::SAMPLE_FEED).await;

    // Setup config file pointing at the mock feed
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        providers:
          ecb:
            base_url: {}
            timeout_secs: 5
        currency: "USD"
    "#,
        mock_server.uri()
    );

    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = ecbfx::run(Some(config_path.to_str().unwrap()), None).await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_cli_currency_overrides_config() {
    let mock_server = test_utils::create_feed_mock_server(test_utils::SAMPLE_FEED).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    // The configured currency is not quoted by the feed; the override is.
    let config_content = format!(
        r#"
        providers:
          ecb:
            base_url: {}
        currency: "XTS"
    "#,
        mock_server.uri()
    );

    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = ecbfx::run(Some(config_path.to_str().unwrap()), Some("GBP")).await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_unsupported_configured_currency_fails() {
    let mock_server = test_utils::create_feed_mock_server(test_utils::SAMPLE_FEED).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        providers:
          ecb:
            base_url: {}
        currency: "XTS"
    "#,
        mock_server.uri()
    );

    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = ecbfx::run(Some(config_path.to_str().unwrap()), None).await;
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("supported by the ECB"),
        "unexpected error message: {message}"
    );
}

#[test_log::test(tokio::test)]
#[ignore = "requires network access to the ECB feed"]
async fn test_real_ecb_feed() {
    use ecbfx::locale::MemoryLocaleStore;
    use ecbfx::providers::ecb::{DEFAULT_FEED_BASE_URL, EcbRateProvider};
    use ecbfx::rate_provider::ExchangeRateProvider;
    use std::sync::Arc;
    use std::time::Duration;

    let provider = EcbRateProvider::new(
        DEFAULT_FEED_BASE_URL,
        Duration::from_secs(10),
        Arc::new(MemoryLocaleStore::new()),
    );

    info!("Fetching live rates from the ECB feed");
    let result = provider.get_live_rates("EUR").await;

    match result {
        Ok(rates) => {
            info!(count = rates.len(), "Received ECB rates");
            assert!(
                rates.len() > 1,
                "Live feed should quote more than the EUR seed"
            );
            assert!(rates.iter().any(|r| r.currency_code == "USD"));
        }
        Err(e) => {
            error!("ECB feed request failed: {e}\n{e:?}");
            panic!("ECB feed request failed: {e}");
        }
    }
}
