use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ton_airdrop_vesting::{Amount, ClaimInfo};

/// How long a wallet may hold the claim transaction before it expires.
pub const TRANSACTION_TTL_SECS: i64 = 300;

/// Internal message the recipient's wallet sends to claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalMessage {
    /// Message sending mode
    pub mode: i32,
    /// Destination address in user-friendly form with bounce flag
    pub address: String,
    /// Message state init (base64)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_init: Option<String>,
    /// Message payload (base64)
    pub payload: String,
    /// TON attached to the message
    pub amount: Amount,
}

/// Successful claim-status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaimInfo {
    #[serde(flatten)]
    pub info: ClaimInfo,
    pub claim_message: InternalMessage,
}

/// Transaction in the shape a TON Connect wallet expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub valid_until: i64,
    pub messages: Vec<TransactionMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMessage {
    pub address: String,
    pub amount: Amount,
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_init: Option<String>,
}

impl From<&InternalMessage> for TransactionMessage {
    fn from(message: &InternalMessage) -> Self {
        Self {
            address: message.address.clone(),
            amount: message.amount.clone(),
            payload: message.payload.clone(),
            state_init: message.state_init.clone(),
        }
    }
}

impl UserClaimInfo {
    pub fn transaction_request(&self, now: DateTime<Utc>) -> TransactionRequest {
        TransactionRequest {
            valid_until: (now + Duration::seconds(TRANSACTION_TTL_SECS)).timestamp(),
            messages: vec![TransactionMessage::from(&self.claim_message)],
        }
    }
}
