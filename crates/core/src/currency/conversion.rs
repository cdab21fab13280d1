//! Currency conversion logic.
//!
//! Conversions feeding the overall rollup are NOT rounded: totals keep full
//! decimal precision and are only rounded when formatted for display.
//!
//! Arithmetic never panics. A result outside the `Decimal` range is pinned to
//! `Decimal::MAX` / `Decimal::MIN` and `overflowed` is set; callers keep the
//! flag so an out-of-range total can be reported instead of trusted.

use rust_decimal::Decimal;

/// Converts an amount into the base currency using the given rate.
#[must_use]
pub fn convert_to_base(amount: Decimal, rate: Decimal, overflowed: &mut bool) -> Decimal {
    bounded_mul(amount, rate, overflowed)
}

/// Multiplies, pinning to the representable range on overflow.
#[must_use]
pub fn bounded_mul(lhs: Decimal, rhs: Decimal, overflowed: &mut bool) -> Decimal {
    lhs.checked_mul(rhs).unwrap_or_else(|| {
        *overflowed = true;
        lhs.saturating_mul(rhs)
    })
}

/// Adds, pinning to the representable range on overflow.
#[must_use]
pub fn bounded_add(lhs: Decimal, rhs: Decimal, overflowed: &mut bool) -> Decimal {
    lhs.checked_add(rhs).unwrap_or_else(|| {
        *overflowed = true;
        lhs.saturating_add(rhs)
    })
}

/// Subtracts, pinning to the representable range on overflow.
#[must_use]
pub fn bounded_sub(lhs: Decimal, rhs: Decimal, overflowed: &mut bool) -> Decimal {
    lhs.checked_sub(rhs).unwrap_or_else(|| {
        *overflowed = true;
        lhs.saturating_sub(rhs)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_to_base() {
        // 900 USD * 30 = 27,000 TRY
        let mut overflowed = false;
        assert_eq!(convert_to_base(dec!(900), dec!(30), &mut overflowed), dec!(27000));
        assert!(!overflowed);
    }

    #[test]
    fn test_convert_keeps_precision() {
        // 100.005 * 33.3333 is not rounded to cents
        let mut overflowed = false;
        assert_eq!(
            convert_to_base(dec!(100.005), dec!(33.3333), &mut overflowed),
            dec!(3333.4966665)
        );
    }

    #[test]
    fn test_overflow_pins_to_range() {
        let mut overflowed = false;
        assert_eq!(bounded_mul(Decimal::MAX, dec!(2), &mut overflowed), Decimal::MAX);
        assert!(overflowed);

        let mut overflowed = false;
        assert_eq!(bounded_mul(Decimal::MAX, dec!(-2), &mut overflowed), Decimal::MIN);
        assert!(overflowed);

        let mut overflowed = false;
        assert_eq!(bounded_add(Decimal::MAX, Decimal::ONE, &mut overflowed), Decimal::MAX);
        assert!(overflowed);

        let mut overflowed = false;
        assert_eq!(bounded_sub(Decimal::MIN, Decimal::ONE, &mut overflowed), Decimal::MIN);
        assert!(overflowed);
    }

    #[test]
    fn test_flag_is_sticky() {
        let mut overflowed = true;
        assert_eq!(bounded_add(dec!(1), dec!(2), &mut overflowed), dec!(3));
        assert!(overflowed);
    }
}
