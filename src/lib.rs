pub mod config;
pub mod error;
pub mod locale;
pub mod log;
pub mod plugin;
pub mod providers;
pub mod rate;
pub mod rate_provider;
pub mod ui;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::locale::{LocalizationService, MemoryLocaleStore};
use crate::plugin::Plugin;
use crate::providers::ecb::EcbRateProvider;
use crate::rate_provider::ExchangeRateProvider;

pub async fn run(config_path: Option<&str>, currency: Option<&str>) -> Result<()> {
    info!("ECB rate fetch starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let locales: Arc<dyn LocalizationService> = Arc::new(MemoryLocaleStore::new());

    let (base_url, timeout_secs) = config.providers.ecb.as_ref().map_or(
        (
            providers::ecb::DEFAULT_FEED_BASE_URL,
            config::DEFAULT_TIMEOUT_SECS,
        ),
        |p| (p.base_url.as_str(), p.timeout_secs),
    );

    let provider = EcbRateProvider::new(
        base_url,
        Duration::from_secs(timeout_secs),
        Arc::clone(&locales),
    );
    provider.install().await;

    let target = currency.unwrap_or(&config.currency);
    let rates = provider.get_live_rates(target).await?;

    println!("{}", ui::rates_table(&rates, target));
    Ok(())
}
