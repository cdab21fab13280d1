//! Shared types, errors, and configuration for Salesdesk.
//!
//! This crate provides common types used across all other crates:
//! - Normalized currency codes
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, FormatConfig, LoggingConfig};
pub use error::{AppError, AppResult};
pub use types::CurrencyCode;
