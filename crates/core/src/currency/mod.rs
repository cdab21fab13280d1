//! Exchange rates, base-currency conversion, and display formatting.

pub mod conversion;
pub mod exchange;
pub mod format;

pub use conversion::convert_to_base;
pub use exchange::ExchangeRates;
pub use format::CurrencyFormatter;
