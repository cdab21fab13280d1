//! Currency display formatting.
//!
//! Rounding here is fixed half-away-from-zero at the configured number of
//! decimal places. Aggregated figures are never rounded before display.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use salesdesk_shared::{CurrencyCode, FormatConfig};
use serde::Serialize;

use crate::totals::{AggregationResult, CurrencyTotal, LineTotals, PaymentTotal};

/// Formats amounts for display using a configurable symbol table and
/// separators.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    symbols: HashMap<CurrencyCode, String>,
    decimal_places: u32,
    decimal_separator: String,
    group_separator: String,
}

/// One currency's totals, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedCurrencyTotal {
    /// Normalized currency code.
    pub currency: CurrencyCode,
    /// Formatted subtotal.
    pub sub_total: String,
    /// Formatted discount.
    pub discount_total: String,
    /// Formatted tax.
    pub tax_total: String,
    /// Formatted grand total.
    pub grand_total: String,
}

/// One currency's payments, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedPaymentTotal {
    /// Normalized currency code.
    pub currency: CurrencyCode,
    /// Formatted sum.
    pub total: String,
}

/// Offer totals formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedLineTotals {
    /// Per-currency totals.
    pub by_currency: Vec<FormattedCurrencyTotal>,
    /// Base-currency rollup.
    pub overall: FormattedCurrencyTotal,
}

/// Sale totals formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    /// Per-currency totals.
    pub by_currency: Vec<FormattedCurrencyTotal>,
    /// Base-currency rollup.
    pub overall: FormattedCurrencyTotal,
    /// Per-currency payments.
    pub payments: Vec<FormattedPaymentTotal>,
    /// Payments in base currency.
    pub payments_overall: String,
    /// Amount still owed in base currency.
    pub balance_due: String,
}

impl CurrencyFormatter {
    /// Creates a formatter from configuration.
    ///
    /// Configured symbols are layered over the built-in table. Keys are
    /// normalized, so `tl` configures `TRY`.
    #[must_use]
    pub fn new(config: FormatConfig) -> Self {
        Self {
            symbols: config.symbol_table(),
            decimal_places: config.decimal_places,
            decimal_separator: config.decimal_separator,
            group_separator: config.group_separator,
        }
    }

    /// Formats an amount in the given (raw) currency.
    ///
    /// Known codes get their symbol as a prefix (`₺1.234,50`). Unknown codes
    /// are written out uppercased after normalization (`XYZ 1.234,50`).
    #[must_use]
    pub fn format(&self, amount: Decimal, currency: &str) -> String {
        self.format_code(amount, &CurrencyCode::from(currency))
    }

    /// Formats an amount in an already-normalized currency.
    #[must_use]
    pub fn format_code(&self, amount: Decimal, currency: &CurrencyCode) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let number = self.format_number(rounded.abs());

        match self.symbols.get(currency) {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{currency} {sign}{number}"),
        }
    }

    /// Renders every figure of a sale for display.
    #[must_use]
    pub fn format_totals(&self, result: &AggregationResult) -> FormattedTotals {
        let base = CurrencyCode::base();

        FormattedTotals {
            by_currency: result.by_currency.iter().map(|t| self.format_total(t)).collect(),
            overall: self.format_total(&result.overall),
            payments: result
                .payments
                .by_currency
                .iter()
                .map(|p| self.format_payment(p))
                .collect(),
            payments_overall: self.format_code(result.payments.overall, &base),
            balance_due: self.format_code(result.balance_due(), &base),
        }
    }

    /// Renders every figure of an offer for display.
    #[must_use]
    pub fn format_line_totals(&self, totals: &LineTotals) -> FormattedLineTotals {
        FormattedLineTotals {
            by_currency: totals.by_currency.iter().map(|t| self.format_total(t)).collect(),
            overall: self.format_total(&totals.overall),
        }
    }

    fn format_total(&self, total: &CurrencyTotal) -> FormattedCurrencyTotal {
        FormattedCurrencyTotal {
            currency: total.currency.clone(),
            sub_total: self.format_code(total.sub_total, &total.currency),
            discount_total: self.format_code(total.discount_total, &total.currency),
            tax_total: self.format_code(total.tax_total, &total.currency),
            grand_total: self.format_code(total.grand_total, &total.currency),
        }
    }

    fn format_payment(&self, payment: &PaymentTotal) -> FormattedPaymentTotal {
        FormattedPaymentTotal {
            currency: payment.currency.clone(),
            total: self.format_code(payment.total, &payment.currency),
        }
    }

    /// Groups integer digits and pads the fraction to `decimal_places`.
    fn format_number(&self, mut value: Decimal) -> String {
        value.rescale(self.decimal_places);
        let digits = value.to_string();

        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut grouped = String::with_capacity(digits.len() + integer.len() / 3);
        for (i, ch) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push_str(&self.group_separator);
            }
            grouped.push(ch);
        }

        // `rescale` cannot add places near `Decimal::MAX`, so pad here.
        if self.decimal_places == 0 {
            grouped
        } else {
            let width = self.decimal_places as usize;
            format!("{grouped}{}{fraction:0<width$}", self.decimal_separator)
        }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(FormatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::{LineItem, Payment, aggregate};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1234.5), "TRY", "₺1.234,50")]
    #[case(dec!(1234.5), "tl", "₺1.234,50")]
    #[case(dec!(27118), "TRY", "₺27.118,00")]
    #[case(dec!(900), "Dolar", "$900,00")]
    #[case(dec!(1000000), "euro", "€1.000.000,00")]
    #[case(dec!(0), "USD", "$0,00")]
    #[case(dec!(-1234.5), "TRY", "-₺1.234,50")]
    #[case(dec!(0.005), "TRY", "₺0,01")]
    #[case(dec!(2.345), "TRY", "₺2,35")]
    #[case(dec!(-0.001), "TRY", "₺0,00")]
    #[case(dec!(123456.789), "gbp", "£123.456,79")]
    #[case(Decimal::MAX, "TRY", "₺79.228.162.514.264.337.593.543.950.335,00")]
    #[case(Decimal::MIN, "usd", "-$79.228.162.514.264.337.593.543.950.335,00")]
    #[case(dec!(7922816251426433759354395033.5), "TRY", "₺7.922.816.251.426.433.759.354.395.033,50")]
    fn test_turkish_defaults(#[case] amount: Decimal, #[case] currency: &str, #[case] expected: &str) {
        assert_eq!(CurrencyFormatter::default().format(amount, currency), expected);
    }

    #[test]
    fn test_unknown_currency_passes_through() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format(dec!(1234.5), "xyz"), "XYZ 1.234,50");
        assert_eq!(formatter.format(dec!(-7), "chf"), "CHF -7,00");
    }

    #[test]
    fn test_injected_configuration() {
        let config = FormatConfig {
            symbols: [("usd".to_string(), "US$".to_string())].into_iter().collect(),
            decimal_places: 0,
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
        };
        let formatter = CurrencyFormatter::new(config);

        assert_eq!(formatter.format(dec!(1234567.5), "Dolar"), "US$1,234,568");
        assert_eq!(formatter.format(dec!(10), "TRY"), "₺10");
        assert_eq!(formatter.format(dec!(10), "Euro"), "€10");
    }

    #[test]
    fn test_symbol_override_is_merged() {
        let config = FormatConfig {
            symbols: [("tl".to_string(), "TL ".to_string())].into_iter().collect(),
            ..FormatConfig::default()
        };
        let formatter = CurrencyFormatter::new(config);

        assert_eq!(formatter.format(dec!(5), "TRY"), "TL 5,00");
        assert_eq!(formatter.format(dec!(5), "USD"), "$5,00");
        assert_eq!(formatter.format(dec!(5), "gbp"), "£5,00");
    }

    #[test]
    fn test_format_totals() {
        let result = aggregate(
            &[LineItem {
                currency: Some("Dolar".into()),
                qty: Some(dec!(1)),
                price: Some(dec!(1000)),
                discount_rate: Some(dec!(10)),
                ..LineItem::default()
            }],
            &[],
            &[],
            &[Payment {
                currency: Some("EUR".into()),
                amount: Some(dec!(200)),
            }],
            dec!(30),
            dec!(33),
        );
        let display = CurrencyFormatter::default().format_totals(&result);

        assert_eq!(display.by_currency[0].grand_total, "$900,00");
        assert_eq!(display.by_currency[0].discount_total, "$100,00");
        assert_eq!(display.overall.grand_total, "₺27.000,00");
        assert_eq!(display.payments[0].total, "€200,00");
        assert_eq!(display.payments_overall, "₺6.600,00");
        assert_eq!(display.balance_due, "₺20.400,00");
    }
}
