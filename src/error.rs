//! Caller-visible failures of the rate provider.

use thiserror::Error;

/// Errors surfaced by [`crate::rate_provider::ExchangeRateProvider`].
///
/// Transport and feed-parse problems are absorbed by the provider and
/// degrade the result set instead of showing up here.
#[derive(Error, Debug)]
pub enum RateError {
    #[error("exchange rate currency code must not be empty")]
    InvalidArgument,

    /// The requested base currency is not quoted by the feed. The message is
    /// resolved through the host localization service and safe to show to
    /// end users.
    #[error("{message}")]
    UnsupportedCurrency { code: String, message: String },
}
