use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VestingError {
    #[error("Invalid amount: {0:?} is not a non-negative integer")]
    InvalidAmount(String),
    #[error("Invalid fraction: {0} is outside of [0, 10000]")]
    InvalidFraction(u32),
    #[error("Invalid unlock time: {0}")]
    InvalidUnlockTime(i64),
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}
