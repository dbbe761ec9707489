//! Live exchange rate retrieval for the application.

use async_trait::async_trait;

use crate::error::RateError;
use crate::rate::ExchangeRate;

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Returns all rates quoted by the feed, rebased to `currency_code`.
    async fn get_live_rates(&self, currency_code: &str) -> Result<Vec<ExchangeRate>, RateError>;
}
