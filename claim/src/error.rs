use thiserror::Error;
use ton_airdrop_vesting::VestingError;

#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("Http Error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serde Error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Vesting Error: {0}")]
    VestingError(#[from] VestingError),
    #[error("Invalid jetton decimals: {0}")]
    InvalidDecimals(String),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}
