use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{amount::Amount, schedule::VestingSchedule};

/// A single vesting tranche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlock {
    /// Unix timestamp (seconds) at which the tranche unlocks
    pub unlock_time: i64,
    /// Share of the total amount released, in hundredths of a percent (2515 = 25.15%)
    pub fraction: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingParameters {
    #[serde(default)]
    pub unlocks_list: Vec<Unlock>,
}

/// Claim state of one recipient in one airdrop, as reported by the claim-status endpoint.
///
/// Snapshots are immutable: a new fetch produces a new value that replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimInfo {
    /// Jetton master address
    pub jetton: String,
    /// Amount the recipient can claim right now
    pub available_jetton_amount: Amount,
    /// Total allocation of the recipient
    pub total_jetton_amount: Amount,
    /// Amount already claimed
    pub claimed_jetton_amount: Amount,
    /// Absent when the full allocation is claimable at once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vesting_parameters: Option<VestingParameters>,
}

impl ClaimInfo {
    /// Tranches of the schedule, empty when there is no vesting.
    pub fn unlocks(&self) -> &[Unlock] {
        self.vesting_parameters
            .as_ref()
            .map(|params| params.unlocks_list.as_slice())
            .unwrap_or_default()
    }

    pub fn is_vesting(&self) -> bool {
        !self.unlocks().is_empty()
    }

    pub fn has_available(&self) -> bool {
        !self.available_jetton_amount.is_zero()
    }

    pub fn fully_claimed(&self) -> bool {
        self.claimed_jetton_amount >= self.total_jetton_amount
    }

    pub fn schedule(&self, now: DateTime<Utc>) -> VestingSchedule<'_> {
        VestingSchedule::new(self, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_claim_info_without_vesting() {
        let json = r#"{
            "jetton": "0:0bb5a9f69043eebdda5ad2e946eb953242bd8f603fe795d90698ceec6bfc60a0",
            "available_jetton_amount": "597968399",
            "total_jetton_amount": "597968399",
            "claimed_jetton_amount": "0"
        }"#;
        let info: ClaimInfo = serde_json::from_str(json).unwrap();

        assert!(info.vesting_parameters.is_none());
        assert!(info.unlocks().is_empty());
        assert!(!info.is_vesting());
        assert!(info.has_available());
        assert!(!info.fully_claimed());
    }

    #[test]
    fn test_deserialize_claim_info_with_vesting() {
        let json = r#"{
            "jetton": "EQAvlWFDxGF2lXm67y4yzC17wYKD9A0guwPkMs1gOsM__NOT",
            "available_jetton_amount": "0",
            "total_jetton_amount": "1000000000",
            "claimed_jetton_amount": "1000000000",
            "vesting_parameters": {
                "unlocks_list": [
                    { "unlock_time": 1735689600, "fraction": 5000 },
                    { "unlock_time": 1738368000, "fraction": 5000 }
                ]
            }
        }"#;
        let info: ClaimInfo = serde_json::from_str(json).unwrap();

        assert_eq!(
            info.unlocks(),
            &[
                Unlock {
                    unlock_time: 1_735_689_600,
                    fraction: 5000
                },
                Unlock {
                    unlock_time: 1_738_368_000,
                    fraction: 5000
                },
            ]
        );
        assert!(info.is_vesting());
        assert!(!info.has_available());
        assert!(info.fully_claimed());
    }

    #[test]
    fn test_deserialize_rejects_invalid_amount() {
        let json = r#"{
            "jetton": "EQAvlWFDxGF2lXm67y4yzC17wYKD9A0guwPkMs1gOsM__NOT",
            "available_jetton_amount": "12.5",
            "total_jetton_amount": "100",
            "claimed_jetton_amount": "0"
        }"#;
        let err = serde_json::from_str::<ClaimInfo>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid amount"));
    }

    #[test]
    fn test_empty_vesting_parameters() {
        let json = r#"{
            "jetton": "EQAvlWFDxGF2lXm67y4yzC17wYKD9A0guwPkMs1gOsM__NOT",
            "available_jetton_amount": "100",
            "total_jetton_amount": "100",
            "claimed_jetton_amount": "0",
            "vesting_parameters": {}
        }"#;
        let info: ClaimInfo = serde_json::from_str(json).unwrap();
        assert!(info.vesting_parameters.is_some());
        assert!(!info.is_vesting());
    }
}
