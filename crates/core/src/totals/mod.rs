//! Multi-currency totals for offers and sales.
//!
//! This module provides pure business logic for:
//! - Per-line subtotal, discount, tax and grand total
//! - Per-currency sums of line items (products, licenses, rentals)
//! - Base-currency (TRY) rollup using caller-supplied rates
//! - Payment sums per currency and in base currency

pub mod service;
pub mod types;


pub use service::{TotalsAggregator, aggregate};
pub use types::*;
