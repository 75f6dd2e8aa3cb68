use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// How amounts are shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountDisplay {
    /// Full precision, trailing fractional zeros trimmed
    #[default]
    Exact,
    /// Rounded to the nearest whole token. Display only, never for on-chain amounts
    Rounded,
}

/// Converts an amount of base units into a decimal string with `decimals` fractional digits.
///
/// Trailing zeros of the fractional part are trimmed, and the separator is
/// dropped entirely when nothing remains after it.
pub fn to_decimals(amount: &BigUint, decimals: u32) -> String {
    let digits = amount.to_str_radix(10);
    if decimals == 0 {
        return digits;
    }

    let decimals = decimals as usize;
    let mut padded = "0".repeat((decimals + 1).saturating_sub(digits.len()));
    padded.push_str(&digits);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

pub fn format_amount(amount: &Amount, decimals: u32, display: AmountDisplay) -> String {
    let exact = to_decimals(amount.as_biguint(), decimals);
    match display {
        AmountDisplay::Exact => exact,
        AmountDisplay::Rounded => match exact.parse::<f64>() {
            Ok(value) => format!("{:.0}", value.round()),
            Err(_) => exact,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 10).unwrap()
    }

    #[test]
    fn test_to_decimals() {
        assert_eq!(to_decimals(&big("597968399"), 9), "0.597968399");
        assert_eq!(to_decimals(&big("597968399"), 0), "597968399");
        assert_eq!(to_decimals(&big("1500000000"), 9), "1.5");
        assert_eq!(to_decimals(&big("1000000000"), 9), "1");
        assert_eq!(to_decimals(&big("0"), 9), "0");
        assert_eq!(to_decimals(&big("5"), 3), "0.005");
        assert_eq!(to_decimals(&big("1000"), 0), "1000");
    }

    #[test]
    fn test_to_decimals_large_amount() {
        assert_eq!(
            to_decimals(&big("123456789012345678901234567890"), 18),
            "123456789012.34567890123456789"
        );
    }

    #[test]
    fn test_to_decimals_wide_precision() {
        let wide = to_decimals(&big("1"), 70_000);
        assert_eq!(wide.len(), 70_002);
        assert!(wide.starts_with("0.000"));
        assert!(wide.ends_with("01"));

        assert_eq!(to_decimals(&big("0"), 70_000), "0");
        assert_eq!(to_decimals(&big("1"), u16::MAX as u32 + 1).len(), 65_538);
    }

    #[test]
    fn test_format_amount_rounded() {
        let amount = Amount::from(2_500_000_000);
        assert_eq!(format_amount(&amount, 9, AmountDisplay::Exact), "2.5");
        assert_eq!(format_amount(&amount, 9, AmountDisplay::Rounded), "3");

        let amount = Amount::from(2_499_999_999);
        assert_eq!(format_amount(&amount, 9, AmountDisplay::Rounded), "2");

        let amount = Amount::from(400_000_000);
        assert_eq!(format_amount(&amount, 9, AmountDisplay::Rounded), "0");
    }
}
