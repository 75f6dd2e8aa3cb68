use std::{
    fmt,
    iter::Sum,
    ops::Add,
    str::FromStr,
};

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{claim_info::Unlock, error::VestingError, Result};

/// Fractions are expressed in hundredths of a percent, 10000 = 100.00%.
pub const FRACTION_DENOMINATOR: u32 = 10_000;

/// Token amount in base units.
///
/// Serialized as a decimal string so amounts above 2^53 survive JSON clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Amount released by a tranche unlocking `fraction` of `self`.
    /// Equal to floor(self * fraction / 10000), computed without precision loss.
    pub fn unlock_share(&self, fraction: u32) -> Result<Amount> {
        if fraction > FRACTION_DENOMINATOR {
            return Err(VestingError::InvalidFraction(fraction));
        }
        Ok(Amount((&self.0 * fraction) / FRACTION_DENOMINATOR))
    }
}

impl FromStr for Amount {
    type Err = VestingError;

    fn from_str(s: &str) -> Result<Self> {
        // BigUint's own parser tolerates a leading '+' and '_' separators
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VestingError::InvalidAmount(s.to_string()));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Amount)
            .ok_or_else(|| VestingError::InvalidAmount(s.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<BigUint> for Amount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> de::Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a non-negative integer or a string of decimal digits")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Amount, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Amount, E> {
                Ok(Amount::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Amount, E> {
                u64::try_from(v)
                    .map(Amount::from)
                    .map_err(|_| E::custom(VestingError::InvalidAmount(v.to_string())))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Calculates the amount of tokens unlocked by a single tranche.
pub fn calculate_unlock_amount(total_amount: &str, fraction: u32) -> Result<Amount> {
    total_amount.parse::<Amount>()?.unlock_share(fraction)
}

/// Sum of the unlock amounts of every tranche strictly before `index`.
pub fn calculate_previous_unlocks_amount(
    unlocks: &[Unlock],
    total_amount: &Amount,
    index: usize,
) -> Result<Amount> {
    unlocks
        .iter()
        .take(index)
        .map(|unlock| total_amount.unlock_share(unlock.fraction))
        .sum()
}
