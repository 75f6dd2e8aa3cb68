use std::fmt;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VestingStatus {
    /// Unlock time not reached yet
    Pending,
    /// Unlocked but not reflected in the claimed amount
    Claimable,
    /// Already paid out
    Claimed,
}

impl VestingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VestingStatus::Pending => "pending",
            VestingStatus::Claimable => "claimable",
            VestingStatus::Claimed => "claimed",
        }
    }

    /// Text shown next to a tranche
    pub fn status_text(&self) -> &'static str {
        match self {
            VestingStatus::Pending => "Pending",
            VestingStatus::Claimable => "Ready to claim",
            VestingStatus::Claimed => "Claimed",
        }
    }
}

impl fmt::Display for VestingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one tranche, given what unlocked before it and the total claimed so far.
///
/// A tranche whose starting boundary is already covered by the claimed amount
/// counts as claimed, even when the claimed amount stops inside the tranche.
#[allow(clippy::if_same_then_else)]
pub fn determine_vesting_status(
    is_past: bool,
    previous_unlocks_amount: &Amount,
    unlock_amount: &Amount,
    claimed_amount: &Amount,
) -> VestingStatus {
    if !is_past {
        return VestingStatus::Pending;
    }

    if &(previous_unlocks_amount + unlock_amount) <= claimed_amount {
        VestingStatus::Claimed
    } else if previous_unlocks_amount < claimed_amount {
        VestingStatus::Claimed
    } else {
        VestingStatus::Claimable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(is_past: bool, previous: u64, unlock: u64, claimed: u64) -> VestingStatus {
        determine_vesting_status(
            is_past,
            &Amount::from(previous),
            &Amount::from(unlock),
            &Amount::from(claimed),
        )
    }

    #[test]
    fn test_future_tranche_is_pending() {
        assert_eq!(status(false, 0, 500, 1000), VestingStatus::Pending);
        assert_eq!(status(false, 0, 500, 0), VestingStatus::Pending);
    }

    #[test]
    fn test_fully_covered_tranche_is_claimed() {
        assert_eq!(status(true, 500, 500, 1000), VestingStatus::Claimed);
        assert_eq!(status(true, 500, 500, 1500), VestingStatus::Claimed);
    }

    #[test]
    fn test_partially_covered_tranche_is_claimed() {
        assert_eq!(status(true, 500, 500, 501), VestingStatus::Claimed);
        assert_eq!(status(true, 500, 500, 999), VestingStatus::Claimed);
    }

    #[test]
    fn test_uncovered_tranche_is_claimable() {
        assert_eq!(status(true, 500, 500, 500), VestingStatus::Claimable);
        assert_eq!(status(true, 0, 500, 0), VestingStatus::Claimable);
    }

    #[test]
    fn test_zero_amount_tranche() {
        // nothing to claim, so covered as soon as it unlocks
        assert_eq!(status(true, 0, 0, 0), VestingStatus::Claimed);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(VestingStatus::Pending.status_text(), "Pending");
        assert_eq!(VestingStatus::Claimable.status_text(), "Ready to claim");
        assert_eq!(VestingStatus::Claimed.status_text(), "Claimed");
        assert_eq!(
            serde_json::to_string(&VestingStatus::Claimable).unwrap(),
            "\"claimable\""
        );
    }
}
