//! Evaluation of jetton airdrop vesting schedules.
//!
//! A recipient's claim is described by a [`ClaimInfo`] snapshot fetched from the
//! claim-status endpoint. When the snapshot carries vesting parameters, the
//! total allocation is released in tranches, each unlocking a fraction of the
//! total (in hundredths of a percent) at a fixed unix time.
//!
//! Everything in this crate is a pure function of the snapshot and the
//! evaluation time: nothing is cached and nothing is mutated, so a schedule
//! can be re-evaluated on every render. All on-chain amounts are carried as
//! arbitrary-precision integers ([`Amount`]); floating point is only used for
//! the display-only rounding in [`decimals::format_amount`].

pub mod amount;
pub mod claim_info;
pub mod decimals;
pub mod error;
pub mod schedule;
pub mod status;

pub use amount::{
    calculate_previous_unlocks_amount, calculate_unlock_amount, Amount, FRACTION_DENOMINATOR,
};
pub use claim_info::{ClaimInfo, Unlock, VestingParameters};
pub use decimals::{format_amount, to_decimals, AmountDisplay};
pub use error::VestingError;
pub use schedule::{
    parse_locale, RenderOptions, VestingItem, VestingLineItem, VestingSchedule, DEFAULT_DECIMALS,
};
pub use status::{determine_vesting_status, VestingStatus};

pub type Result<T> = std::result::Result<T, VestingError>;
