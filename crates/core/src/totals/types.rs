//! Totals data types.

use rust_decimal::Decimal;
use salesdesk_shared::CurrencyCode;
use serde::{Deserialize, Serialize};

use crate::currency::conversion::{bounded_add, bounded_mul, bounded_sub};

/// A priced unit within an offer or sale.
///
/// Products, licenses and rentals share this shape; aggregation only ever
/// touches these fields. Absent numbers count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Free-text currency token.
    #[serde(default)]
    pub currency: Option<String>,
    /// Alternate currency field used by some upstream records.
    #[serde(default)]
    pub sale_currency: Option<String>,
    /// Quantity.
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Unit price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Discount percentage (0-100), applied before tax.
    #[serde(default)]
    pub discount_rate: Option<Decimal>,
    /// VAT percentage (0-100), applied to the discounted amount.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Precomputed subtotal.
    #[serde(default)]
    pub sub_total: Option<Decimal>,
    /// Precomputed discount amount.
    #[serde(default)]
    pub discount_total: Option<Decimal>,
    /// Precomputed tax amount.
    #[serde(default)]
    pub tax_total: Option<Decimal>,
    /// Precomputed grand total.
    #[serde(default)]
    pub grand_total: Option<Decimal>,
}

/// Per-line figures after applying discount and tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakdown {
    /// Quantity times price, or the precomputed subtotal.
    pub sub_total: Decimal,
    /// Discount amount.
    pub discount_total: Decimal,
    /// Subtotal minus discount.
    pub after_discount: Decimal,
    /// Tax amount.
    pub tax_total: Decimal,
    /// Final line amount.
    pub grand_total: Decimal,
    /// Set when a figure left the `Decimal` range and was pinned to its edge.
    #[serde(skip)]
    pub(crate) overflowed: bool,
}

impl LineBreakdown {
    /// Returns true when a figure was pinned to the `Decimal` range.
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }
}

/// Adds `amount` into `slot`, recording overflow.
fn accumulate(slot: &mut Decimal, amount: Decimal, overflowed: &mut bool) {
    *slot = bounded_add(*slot, amount, overflowed);
}

/// Returns the precomputed value when it is strictly positive.
///
/// Zero is indistinguishable from "not provided" and gets recomputed.
fn authoritative(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

impl LineItem {
    /// Returns the normalized currency: `currency` when it is non-blank,
    /// otherwise `sale_currency`.
    #[must_use]
    pub fn currency_code(&self) -> CurrencyCode {
        let raw = self
            .currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or(self.sale_currency.as_deref());
        CurrencyCode::normalize(raw)
    }

    /// Computes this line's totals.
    ///
    /// Each step is skipped when a positive precomputed value exists:
    /// 1. subtotal = qty × price
    /// 2. discount = subtotal × discount rate / 100
    /// 3. after discount = subtotal − discount (always derived)
    /// 4. tax = after discount × VAT rate / 100
    /// 5. grand total = after discount + tax
    ///
    /// Figures outside the `Decimal` range are pinned to its edge and the
    /// breakdown is marked as overflowed.
    #[must_use]
    pub fn breakdown(&self) -> LineBreakdown {
        let qty = self.qty.unwrap_or_default();
        let price = self.price.unwrap_or_default();
        let discount_rate = self.discount_rate.unwrap_or_default() / Decimal::ONE_HUNDRED;
        let vat_rate = self.vat_rate.unwrap_or_default() / Decimal::ONE_HUNDRED;
        let mut overflowed = false;

        let sub_total = authoritative(self.sub_total)
            .unwrap_or_else(|| bounded_mul(qty, price, &mut overflowed));
        let discount_total = authoritative(self.discount_total)
            .unwrap_or_else(|| bounded_mul(sub_total, discount_rate, &mut overflowed));
        let after_discount = bounded_sub(sub_total, discount_total, &mut overflowed);
        let tax_total = authoritative(self.tax_total)
            .unwrap_or_else(|| bounded_mul(after_discount, vat_rate, &mut overflowed));
        let grand_total = authoritative(self.grand_total)
            .unwrap_or_else(|| bounded_add(after_discount, tax_total, &mut overflowed));

        LineBreakdown {
            sub_total,
            discount_total,
            after_discount,
            tax_total,
            grand_total,
            overflowed,
        }
    }
}

/// A payment received against a sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Free-text currency token.
    #[serde(default)]
    pub currency: Option<String>,
    /// Paid amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl Payment {
    /// Returns the normalized currency.
    #[must_use]
    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::normalize(self.currency.as_deref())
    }
}

/// Summed line totals for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotal {
    /// Normalized currency code.
    pub currency: CurrencyCode,
    /// Sum of line subtotals.
    pub sub_total: Decimal,
    /// Sum of line discounts.
    pub discount_total: Decimal,
    /// Sum of line taxes.
    pub tax_total: Decimal,
    /// Sum of line grand totals.
    pub grand_total: Decimal,
    #[serde(skip)]
    pub(crate) overflowed: bool,
}

impl CurrencyTotal {
    /// Creates an all-zero total for the given currency.
    #[must_use]
    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            currency,
            sub_total: Decimal::ZERO,
            discount_total: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            overflowed: false,
        }
    }

    /// Returns true when a figure, or a line summed into it, was pinned to
    /// the `Decimal` range.
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Adds one line's figures.
    pub fn add_line(&mut self, line: &LineBreakdown) {
        let mut overflowed = self.overflowed || line.overflowed;
        accumulate(&mut self.sub_total, line.sub_total, &mut overflowed);
        accumulate(&mut self.discount_total, line.discount_total, &mut overflowed);
        accumulate(&mut self.tax_total, line.tax_total, &mut overflowed);
        accumulate(&mut self.grand_total, line.grand_total, &mut overflowed);
        self.overflowed = overflowed;
    }

    /// Adds another total scaled by `rate`.
    pub fn add_scaled(&mut self, other: &Self, rate: Decimal) {
        let mut overflowed = self.overflowed || other.overflowed;
        for (slot, amount) in [
            (&mut self.sub_total, other.sub_total),
            (&mut self.discount_total, other.discount_total),
            (&mut self.tax_total, other.tax_total),
            (&mut self.grand_total, other.grand_total),
        ] {
            let scaled = bounded_mul(amount, rate, &mut overflowed);
            accumulate(slot, scaled, &mut overflowed);
        }
        self.overflowed = overflowed;
    }
}

/// Summed payments for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTotal {
    /// Normalized currency code.
    pub currency: CurrencyCode,
    /// Sum of payment amounts.
    pub total: Decimal,
    #[serde(skip)]
    pub(crate) overflowed: bool,
}

impl PaymentTotal {
    /// Creates an empty sum for the given currency.
    #[must_use]
    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            currency,
            total: Decimal::ZERO,
            overflowed: false,
        }
    }

    /// Returns true when the sum was pinned to the `Decimal` range.
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Adds one payment amount.
    pub fn add(&mut self, amount: Decimal) {
        accumulate(&mut self.total, amount, &mut self.overflowed);
    }
}

/// Payment rollup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    /// Per-currency sums, sorted by currency code.
    pub by_currency: Vec<PaymentTotal>,
    /// All payments converted to base currency.
    pub overall: Decimal,
    #[serde(skip)]
    pub(crate) overflowed: bool,
}

impl PaymentSummary {
    /// Returns true when any payment sum was pinned to the `Decimal` range.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.overflowed || self.by_currency.iter().any(PaymentTotal::overflowed)
    }
}

/// Line totals without payments, as shown on an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTotals {
    /// Per-currency sums, sorted by currency code.
    pub by_currency: Vec<CurrencyTotal>,
    /// All currencies converted to base currency.
    pub overall: CurrencyTotal,
}

impl LineTotals {
    /// Returns true when any figure was pinned to the `Decimal` range.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.overall.overflowed() || self.by_currency.iter().any(CurrencyTotal::overflowed)
    }
}

/// Full totals for a sale: lines plus payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// Per-currency sums, sorted by currency code.
    pub by_currency: Vec<CurrencyTotal>,
    /// All currencies converted to base currency.
    pub overall: CurrencyTotal,
    /// Payment rollup.
    pub payments: PaymentSummary,
}

impl AggregationResult {
    /// Amount still owed in base currency (negative when overpaid).
    ///
    /// Pinned to the `Decimal` range; see [`Self::overflowed`].
    #[must_use]
    pub fn balance_due(&self) -> Decimal {
        self.overall.grand_total.saturating_sub(self.payments.overall)
    }

    /// Returns true when any figure, the balance included, was pinned to the
    /// `Decimal` range. Such totals are not exact.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.overall.overflowed()
            || self.by_currency.iter().any(CurrencyTotal::overflowed)
            || self.payments.overflowed()
            || self.overall.grand_total.checked_sub(self.payments.overall).is_none()
    }
}
