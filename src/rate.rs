//! Exchange rate data model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A single quoted rate relative to a base currency.
///
/// Rates from one fetch all share the same `updated_on` snapshot date.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub currency_code: String,
    pub rate: Decimal,
    pub updated_on: DateTime<Utc>,
}
