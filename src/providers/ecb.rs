use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::RateError;
use crate::locale::LocalizationService;
use crate::plugin::Plugin;
use crate::rate::ExchangeRate;
use crate::rate_provider::ExchangeRateProvider;

pub const DEFAULT_FEED_BASE_URL: &str = "https://www.ecb.europa.eu";
const FEED_PATH: &str = "/stats/eurofxref/eurofxref-daily.xml";

/// Resource key for the user-facing "currency not quoted" message.
pub const UNSUPPORTED_CURRENCY_KEY: &str = "exchange_rate.ecb.unsupported_currency";
const UNSUPPORTED_CURRENCY_TEXT: &str = "You can use the ECB (European Central Bank) \
    exchange rate provider only when the primary exchange rate currency is supported by the ECB";

const REFERENCE_CURRENCY: &str = "EUR";
const RATE_SCALE: u32 = 4;

// Feed schema: gesmes:Envelope > Cube > Cube[@time] > Cube[@currency, @rate].
// The gesmes header elements are ignored during deserialization.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Cube")]
    cube: CubeHolder,
}

#[derive(Debug, Deserialize)]
struct CubeHolder {
    #[serde(rename = "Cube")]
    daily: DailyCube,
}

#[derive(Debug, Deserialize)]
struct DailyCube {
    #[serde(rename = "@time")]
    time: String,
    #[serde(rename = "Cube", default)]
    entries: Vec<CurrencyCube>,
}

#[derive(Debug, Deserialize)]
struct CurrencyCube {
    #[serde(rename = "@currency")]
    currency: String,
    #[serde(rename = "@rate")]
    rate: String,
}

fn parse_snapshot_date(raw: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
        .unwrap_or_else(|| {
            debug!("Snapshot date '{}' did not parse, using current time", raw);
            Utc::now()
        })
}

fn parse_feed(body: &str) -> Result<(DateTime<Utc>, Vec<ExchangeRate>)> {
    let envelope: Envelope =
        quick_xml::de::from_str(body).context("Failed to parse ECB feed XML")?;

    let daily = envelope.cube.daily;
    let updated_on = parse_snapshot_date(&daily.time);

    // Entries with an unparseable rate are dropped; the rest of the snapshot
    // stays usable.
    let rates = daily
        .entries
        .into_iter()
        .filter_map(|entry| match Decimal::from_str(&entry.rate) {
            Ok(rate) => Some(ExchangeRate {
                currency_code: entry.currency,
                rate,
                updated_on,
            }),
            Err(e) => {
                debug!(
                    "Skipping currency {} with malformed rate '{}': {}",
                    entry.currency, entry.rate, e
                );
                None
            }
        })
        .collect();

    Ok((updated_on, rates))
}

/// Exchange rates from the European Central Bank daily reference feed.
///
/// The feed quotes every currency against EUR; `get_live_rates` rebases the
/// snapshot to the requested currency.
pub struct EcbRateProvider {
    base_url: String,
    timeout: Duration,
    locales: Arc<dyn LocalizationService>,
}

impl EcbRateProvider {
    pub fn new(base_url: &str, timeout: Duration, locales: Arc<dyn LocalizationService>) -> Self {
        EcbRateProvider {
            base_url: base_url.to_string(),
            timeout,
            locales,
        }
    }

    async fn fetch_feed(&self) -> Result<(DateTime<Utc>, Vec<ExchangeRate>)> {
        let url = format!("{}{}", self.base_url, FEED_PATH);
        debug!("Requesting ECB reference rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("ecbfx/0.1")
            .timeout(self.timeout)
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from ECB feed", response.status()));
        }

        let body = response.text().await?;
        parse_feed(&body)
    }

    async fn unsupported_currency_message(&self) -> String {
        self.locales
            .get_resource(UNSUPPORTED_CURRENCY_KEY)
            .await
            .unwrap_or_else(|| UNSUPPORTED_CURRENCY_TEXT.to_string())
    }
}

#[async_trait]
impl ExchangeRateProvider for EcbRateProvider {
    #[instrument(
        name = "EcbRateFetch",
        skip(self),
        fields(currency = %currency_code)
    )]
    async fn get_live_rates(
        &self,
        currency_code: &str,
    ) -> Result<Vec<ExchangeRate>, RateError> {
        let target = currency_code.trim();
        if target.is_empty() {
            return Err(RateError::InvalidArgument);
        }

        // EUR is the feed's reference currency and never listed in it.
        let mut rates_to_euro = vec![ExchangeRate {
            currency_code: REFERENCE_CURRENCY.to_string(),
            rate: Decimal::ONE,
            updated_on: Utc::now(),
        }];

        match self.fetch_feed().await {
            Ok((updated_on, feed_rates)) => {
                rates_to_euro[0].updated_on = updated_on;
                rates_to_euro.extend(feed_rates);
            }
            Err(e) => {
                warn!("ECB feed unavailable, serving EUR only: {e:#}");
            }
        }

        if target.eq_ignore_ascii_case(REFERENCE_CURRENCY) {
            return Ok(rates_to_euro);
        }

        let Some(target_rate) = rates_to_euro
            .iter()
            .find(|r| r.currency_code.eq_ignore_ascii_case(target))
            .map(|r| r.rate)
        else {
            return Err(RateError::UnsupportedCurrency {
                code: target.to_string(),
                message: self.unsupported_currency_message().await,
            });
        };

        Ok(rates_to_euro
            .into_iter()
            .map(|r| ExchangeRate {
                rate: (r.rate / target_rate).round_dp(RATE_SCALE),
                ..r
            })
            .collect())
    }
}

#[async_trait]
impl Plugin for EcbRateProvider {
    async fn install(&self) {
        self.locales
            .add_or_update_resource(UNSUPPORTED_CURRENCY_KEY, UNSUPPORTED_CURRENCY_TEXT)
            .await;
    }

    async fn uninstall(&self) {
        self.locales.delete_resource(UNSUPPORTED_CURRENCY_KEY).await;
    }
}
