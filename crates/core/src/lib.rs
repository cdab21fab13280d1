//! Core business logic for Salesdesk.
//!
//! This crate contains pure business logic with ZERO web or I/O dependencies.
//! Every function here is synchronous and side-effect free, so callers may
//! recompute totals as often as they like from any number of threads.
//!
//! # Modules
//!
//! - `currency` - Exchange rates, base-currency conversion, and display formatting
//! - `totals` - Multi-currency line-item and payment totals for offers and sales

pub mod currency;
pub mod totals;

pub use totals::aggregate;
