//! Totals aggregation service.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use salesdesk_shared::CurrencyCode;

use super::types::{
    AggregationResult, CurrencyTotal, LineItem, LineTotals, Payment, PaymentSummary, PaymentTotal,
};
use crate::currency::conversion::bounded_add;
use crate::currency::{ExchangeRates, convert_to_base};

/// Service for aggregating line items and payments into per-currency and
/// base-currency totals.
///
/// Stateless apart from the rate table; every call allocates its own output
/// and never touches its inputs. Work is linear in the number of items.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalsAggregator {
    rates: ExchangeRates,
}

impl TotalsAggregator {
    /// Creates an aggregator using the given rates.
    #[must_use]
    pub const fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }

    /// Returns the rate table in use.
    #[must_use]
    pub const fn rates(&self) -> ExchangeRates {
        self.rates
    }

    /// Sums line items per normalized currency.
    ///
    /// The result is sorted ascending by currency code.
    #[must_use]
    pub fn aggregate_lines<'a, I>(&self, items: I) -> Vec<CurrencyTotal>
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let mut buckets: BTreeMap<CurrencyCode, CurrencyTotal> = BTreeMap::new();

        for item in items {
            let currency = item.currency_code();
            let line = item.breakdown();
            buckets
                .entry(currency)
                .or_insert_with_key(|code| CurrencyTotal::zero(code.clone()))
                .add_line(&line);
        }

        buckets.into_values().collect()
    }

    /// Converts per-currency totals into a single base-currency total.
    #[must_use]
    pub fn overall(&self, by_currency: &[CurrencyTotal]) -> CurrencyTotal {
        by_currency
            .iter()
            .fold(CurrencyTotal::zero(CurrencyCode::base()), |mut acc, total| {
                acc.add_scaled(total, self.rates.rate_for(&total.currency));
                acc
            })
    }

    /// Sums payments per normalized currency and in base currency.
    #[must_use]
    pub fn aggregate_payments(&self, payments: &[Payment]) -> PaymentSummary {
        let mut buckets: BTreeMap<CurrencyCode, PaymentTotal> = BTreeMap::new();

        for payment in payments {
            buckets
                .entry(payment.currency_code())
                .or_insert_with_key(|code| PaymentTotal::zero(code.clone()))
                .add(payment.amount.unwrap_or_default());
        }

        let mut overflowed = false;
        let overall = buckets.values().fold(Decimal::ZERO, |acc, payment| {
            let converted = convert_to_base(
                payment.total,
                self.rates.rate_for(&payment.currency),
                &mut overflowed,
            );
            bounded_add(acc, converted, &mut overflowed)
        });

        PaymentSummary {
            by_currency: buckets.into_values().collect(),
            overall,
            overflowed,
        }
    }

    /// Computes line totals for an offer (no payments).
    #[must_use]
    pub fn offer_totals(
        &self,
        products: &[LineItem],
        licenses: &[LineItem],
        rentals: &[LineItem],
    ) -> LineTotals {
        let by_currency = self.aggregate_lines(products.iter().chain(licenses).chain(rentals));
        let overall = self.overall(&by_currency);

        LineTotals {
            by_currency,
            overall,
        }
    }

    /// Computes line and payment totals for a sale.
    #[must_use]
    pub fn aggregate(
        &self,
        products: &[LineItem],
        licenses: &[LineItem],
        rentals: &[LineItem],
        payments: &[Payment],
    ) -> AggregationResult {
        let LineTotals {
            by_currency,
            overall,
        } = self.offer_totals(products, licenses, rentals);

        AggregationResult {
            by_currency,
            overall,
            payments: self.aggregate_payments(payments),
        }
    }
}

/// Aggregates products, licenses, rentals and payments using the given USD
/// and EUR rates into base currency.
///
/// Never fails: missing numbers count as zero, missing currencies as TRY,
/// and a zero rate falls back to 1.
#[must_use]
pub fn aggregate(
    products: &[LineItem],
    licenses: &[LineItem],
    rentals: &[LineItem],
    payments: &[Payment],
    usd_rate: Decimal,
    eur_rate: Decimal,
) -> AggregationResult {
    TotalsAggregator::new(ExchangeRates::new(usd_rate, eur_rate))
        .aggregate(products, licenses, rentals, payments)
}
