//! Application configuration management.

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::CurrencyCode;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Currency display configuration.
    #[serde(default)]
    pub formatting: FormatConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit one JSON object per event instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Currency display configuration.
///
/// Defaults reproduce Turkish currency formatting (`₺1.234,56`).
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    /// Currency code → display symbol, layered over the built-in table
    /// (TRY, USD, EUR, GBP). Keys are normalized on use, so `tl` and `TRY`
    /// address the same entry.
    #[serde(default)]
    pub symbols: HashMap<String, String>,
    /// Digits after the decimal separator.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Separator between integer and fractional digits.
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
    /// Separator between thousands groups.
    #[serde(default = "default_group_separator")]
    pub group_separator: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            symbols: HashMap::new(),
            decimal_places: default_decimal_places(),
            decimal_separator: default_decimal_separator(),
            group_separator: default_group_separator(),
        }
    }
}

const DEFAULT_SYMBOLS: [(&str, &str); 4] = [("TRY", "₺"), ("USD", "$"), ("EUR", "€"), ("GBP", "£")];

impl FormatConfig {
    /// Returns the effective symbol table keyed by normalized code.
    ///
    /// Configured symbols replace built-in ones per currency; every other
    /// built-in symbol is kept.
    #[must_use]
    pub fn symbol_table(&self) -> HashMap<CurrencyCode, String> {
        let defaults = DEFAULT_SYMBOLS
            .into_iter()
            .map(|(code, symbol)| (CurrencyCode::from(code), symbol.to_string()));
        let overrides = self
            .symbols
            .iter()
            .map(|(code, symbol)| (CurrencyCode::from(code.as_str()), symbol.clone()));

        defaults.chain(overrides).collect()
    }
}

fn default_decimal_places() -> u32 {
    2
}

fn default_decimal_separator() -> String {
    ",".to_string()
}

fn default_group_separator() -> String {
    ".".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SALESDESK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.formatting.decimal_places, 2);
        assert_eq!(config.formatting.decimal_separator, ",");
        assert_eq!(config.formatting.group_separator, ".");
        assert!(!config.logging.json);

        let symbols = config.formatting.symbol_table();
        assert_eq!(symbols.len(), 4);
        assert_eq!(symbols.get(&CurrencyCode::from("TRY")).map(String::as_str), Some("₺"));
    }

    #[test]
    fn test_symbol_overrides_keep_other_defaults() {
        let config = FormatConfig {
            symbols: [
                ("usd".to_string(), "US$".to_string()),
                ("chf".to_string(), "Fr.".to_string()),
            ]
            .into_iter()
            .collect(),
            ..FormatConfig::default()
        };
        let symbols = config.symbol_table();

        assert_eq!(symbols.get(&CurrencyCode::from("USD")).map(String::as_str), Some("US$"));
        assert_eq!(symbols.get(&CurrencyCode::from("CHF")).map(String::as_str), Some("Fr."));
        assert_eq!(symbols.get(&CurrencyCode::from("TRY")).map(String::as_str), Some("₺"));
        assert_eq!(symbols.get(&CurrencyCode::from("EUR")).map(String::as_str), Some("€"));
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(["SALESDESK__SERVER__PORT", "RUN_MODE"], || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.formatting.decimal_places, 2);
        });
    }

    #[test]
    fn test_load_reads_environment() {
        temp_env::with_vars(
            [
                ("SALESDESK__SERVER__PORT", Some("9090")),
                ("SALESDESK__SERVER__HOST", Some("127.0.0.1")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "127.0.0.1");
            },
        );
    }

    #[test]
    fn test_load_reads_logging_and_symbol_overrides() {
        temp_env::with_vars(
            [
                ("SALESDESK__LOGGING__JSON", Some("true")),
                ("SALESDESK__FORMATTING__SYMBOLS__USD", Some("US$")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert!(config.logging.json);

                let symbols = config.formatting.symbol_table();
                assert_eq!(symbols.get(&CurrencyCode::from("USD")).map(String::as_str), Some("US$"));
                assert_eq!(symbols.get(&CurrencyCode::from("TRY")).map(String::as_str), Some("₺"));
            },
        );
    }
}
