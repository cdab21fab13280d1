//! Normalized currency codes.
//!
//! Line items and payments arrive with free-text currency tokens (`"tl"`,
//! `"Dolar"`, `"Euro"`, mixed case, or nothing at all). Every token is folded
//! into a canonical code before it is used for grouping, rate lookup, or
//! display. Unknown codes are accepted verbatim (uppercased); there is no
//! ISO 4217 validation.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

/// Turkish Lira, the base currency of every overall rollup.
pub const TRY: &str = "TRY";
/// US Dollar.
pub const USD: &str = "USD";
/// Euro.
pub const EUR: &str = "EUR";

/// A currency code after synonym resolution and case folding.
///
/// Ordering is ordinal on the code text, which is the order used for every
/// per-currency listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Normalizes a raw currency token.
    ///
    /// Trims and uppercases, then applies the synonym table:
    /// - absent or blank → `TRY`
    /// - `TL` → `TRY`
    /// - `DOLAR`, `DOLLAR` → `USD`
    /// - `EURO` → `EUR`
    ///
    /// Anything else passes through uppercased. This function is total.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        let token = raw.map(str::trim).unwrap_or_default().to_uppercase();

        match token.as_str() {
            "" | "TL" => Self(TRY.to_string()),
            "DOLAR" | "DOLLAR" => Self(USD.to_string()),
            "EURO" => Self(EUR.to_string()),
            _ => Self(token),
        }
    }

    /// Returns the base currency (`TRY`).
    #[must_use]
    pub fn base() -> Self {
        Self(TRY.to_string())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the base currency.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.0 == TRY
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::base()
    }
}

impl From<&str> for CurrencyCode {
    fn from(raw: &str) -> Self {
        Self::normalize(Some(raw))
    }
}

impl From<String> for CurrencyCode {
    fn from(raw: String) -> Self {
        Self::normalize(Some(&raw))
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("tl", "TRY")]
    #[case("TL", "TRY")]
    #[case(" Tl ", "TRY")]
    #[case("try", "TRY")]
    #[case("Dolar", "USD")]
    #[case("DOLLAR", "USD")]
    #[case("dollar", "USD")]
    #[case("usd", "USD")]
    #[case("Euro", "EUR")]
    #[case("eur", "EUR")]
    #[case("gbp", "GBP")]
    #[case("xyz", "XYZ")]
    fn test_normalize_synonyms(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(CurrencyCode::normalize(Some(raw)).as_str(), expected);
    }

    #[test]
    fn test_normalize_missing_defaults_to_try() {
        assert_eq!(CurrencyCode::normalize(None), CurrencyCode::base());
        assert_eq!(CurrencyCode::normalize(Some("")), CurrencyCode::base());
        assert_eq!(CurrencyCode::normalize(Some("   ")), CurrencyCode::base());
        assert!(CurrencyCode::default().is_base());
    }

    #[test]
    fn test_conversions_normalize() {
        assert_eq!(CurrencyCode::from("dolar").as_str(), USD);
        assert_eq!(CurrencyCode::from(String::from("euro")).as_str(), EUR);
        assert_eq!(CurrencyCode::from_str("tl").unwrap().as_str(), TRY);
        assert_eq!(CurrencyCode::from("usd").to_string(), "USD");
    }

    #[test]
    fn test_ordering_is_ordinal() {
        let mut codes: Vec<CurrencyCode> = ["usd", "try", "eur", "Gbp"]
            .into_iter()
            .map(CurrencyCode::from)
            .collect();
        codes.sort();

        let ordered: Vec<&str> = codes.iter().map(CurrencyCode::as_str).collect();
        assert_eq!(ordered, vec!["EUR", "GBP", "TRY", "USD"]);
    }

    #[test]
    fn test_serde_round_trip_normalizes() {
        let code: CurrencyCode = serde_json::from_str("\"Dolar\"").unwrap();
        assert_eq!(code.as_str(), USD);
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"USD\"");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in ".{0,12}") {
            let once = CurrencyCode::normalize(Some(&raw));
            let twice = CurrencyCode::normalize(Some(once.as_str()));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalize_is_never_empty(raw in "\\s{0,4}[a-zA-Z]{0,6}\\s{0,4}") {
            prop_assert!(!CurrencyCode::normalize(Some(&raw)).as_str().is_empty());
        }
    }
}
