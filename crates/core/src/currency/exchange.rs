//! Exchange rates into the base currency.

use rust_decimal::Decimal;
use salesdesk_shared::CurrencyCode;
use salesdesk_shared::types::currency::{EUR, USD};
use serde::{Deserialize, Serialize};

/// Point-in-time rates into the base currency (TRY), as stored on the parent
/// offer or sale record.
///
/// These are caller-supplied estimates, not live FX quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// 1 USD = `usd` TRY.
    pub usd: Decimal,
    /// 1 EUR = `eur` TRY.
    pub eur: Decimal,
}

impl ExchangeRates {
    /// Creates a rate table.
    #[must_use]
    pub const fn new(usd: Decimal, eur: Decimal) -> Self {
        Self { usd, eur }
    }

    /// Returns the multiplier that converts `currency` into the base currency.
    ///
    /// USD and EUR use their configured rate; a zero rate counts as "not yet
    /// supplied" and falls back to 1 so totals are never zeroed out. TRY and
    /// any unrecognized code are treated as already being in base currency.
    #[must_use]
    pub fn rate_for(&self, currency: &CurrencyCode) -> Decimal {
        let rate = match currency.as_str() {
            USD => self.usd,
            EUR => self.eur,
            _ => Decimal::ONE,
        };

        if rate.is_zero() { Decimal::ONE } else { rate }
    }
}
