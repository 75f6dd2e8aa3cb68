//! Maps claim API responses onto a success value or a user-facing claim error.
//!
//! Upstream failures never surface as `Err`: network errors, non-2xx statuses
//! and malformed bodies all become a [`ClaimFailure`] with a stable string code
//! and a generic message, so nothing about the network leaks to the user.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::user_claim::UserClaimInfo;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimErrorCode {
    BadRequest,
    NotFound,
    /// Airdrop data is not processed yet
    NotProcessed,
    /// Claims are locked by the airdrop admin
    Locked,
    AlreadyClaimed,
    /// Nothing unlocked since the last claim
    VestingNotReached,
    BlockchainOverload,
    InternalError,
    NetworkError,
    /// Any other code reported by the upstream, passed through verbatim
    Other(String),
}

impl ClaimErrorCode {
    /// Maps the numeric codes used in upstream error bodies.
    pub fn from_numeric(code: i64) -> Self {
        match code {
            1 => ClaimErrorCode::NotProcessed,
            2 => ClaimErrorCode::Locked,
            3 => ClaimErrorCode::AlreadyClaimed,
            4 => ClaimErrorCode::BlockchainOverload,
            other => ClaimErrorCode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ClaimErrorCode::BadRequest => "bad_request",
            ClaimErrorCode::NotFound => "not_found",
            ClaimErrorCode::NotProcessed => "not_processed",
            ClaimErrorCode::Locked => "locked",
            ClaimErrorCode::AlreadyClaimed => "already_claimed",
            ClaimErrorCode::VestingNotReached => "vesting_not_reached",
            ClaimErrorCode::BlockchainOverload => "blockchain_overload",
            ClaimErrorCode::InternalError => "internal_error",
            ClaimErrorCode::NetworkError => "network_error",
            ClaimErrorCode::Other(code) => code,
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            ClaimErrorCode::BadRequest => "Invalid Airdrop ID or recipient address.",
            ClaimErrorCode::NotFound => "Entity not found.",
            ClaimErrorCode::NotProcessed => "Airdrop is not processed yet.",
            ClaimErrorCode::Locked => "Claim is locked by the airdrop admin.",
            ClaimErrorCode::AlreadyClaimed => "Tokens have already been claimed.",
            ClaimErrorCode::VestingNotReached => "Next vesting unlock has not been reached yet.",
            ClaimErrorCode::BlockchainOverload => "Network is overloaded. Please try again later.",
            ClaimErrorCode::InternalError => "Internal server error.",
            ClaimErrorCode::NetworkError => "Network error. Please try again later.",
            ClaimErrorCode::Other(_) => "Unknown error",
        }
    }
}

impl From<&str> for ClaimErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "bad_request" => ClaimErrorCode::BadRequest,
            "not_found" => ClaimErrorCode::NotFound,
            "not_processed" => ClaimErrorCode::NotProcessed,
            "locked" => ClaimErrorCode::Locked,
            "already_claimed" => ClaimErrorCode::AlreadyClaimed,
            "vesting_not_reached" => ClaimErrorCode::VestingNotReached,
            "blockchain_overload" => ClaimErrorCode::BlockchainOverload,
            "internal_error" => ClaimErrorCode::InternalError,
            "network_error" => ClaimErrorCode::NetworkError,
            other => ClaimErrorCode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ClaimErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClaimErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClaimErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(ClaimErrorCode::from(code.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFailure {
    pub code: ClaimErrorCode,
    pub message: String,
}

impl ClaimFailure {
    fn with_default_message(code: ClaimErrorCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| code.default_message().to_string());
        Self { code, message }
    }

    pub fn network_error() -> Self {
        Self::with_default_message(ClaimErrorCode::NetworkError, None)
    }
}

impl fmt::Display for ClaimFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimResponse {
    Success(Box<UserClaimInfo>),
    Failure(ClaimFailure),
}

/// Error code reported in an upstream error body, either numeric or textual.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCode {
    Numeric(i64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<RawCode>,
    message: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl ClaimResponse {
    pub fn network_error() -> Self {
        ClaimResponse::Failure(ClaimFailure::network_error())
    }

    /// Builds a response from the HTTP status line and the raw body.
    pub fn from_http(status: u16, status_text: &str, body: &[u8]) -> Self {
        if (200..300).contains(&status) {
            return match serde_json::from_slice::<UserClaimInfo>(body) {
                Ok(claim) => ClaimResponse::Success(Box::new(claim)),
                Err(e) => {
                    warn!("malformed claim response: {e}");
                    ClaimResponse::Failure(ClaimFailure::with_default_message(
                        ClaimErrorCode::InternalError,
                        None,
                    ))
                }
            };
        }

        let body: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        ClaimResponse::Failure(map_http_error(status, status_text, body))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ClaimResponse::Success(_))
    }
}

fn map_http_error(status: u16, status_text: &str, body: ErrorBody) -> ClaimFailure {
    let message = non_empty(body.message);
    let fixed_code = match status {
        400 => Some(ClaimErrorCode::BadRequest),
        404 => Some(ClaimErrorCode::NotFound),
        409 => Some(ClaimErrorCode::AlreadyClaimed),
        423 => Some(ClaimErrorCode::Locked),
        425 => Some(ClaimErrorCode::VestingNotReached),
        429 => Some(ClaimErrorCode::BlockchainOverload),
        500 => Some(ClaimErrorCode::InternalError),
        _ => None,
    };
    if let Some(code) = fixed_code {
        return ClaimFailure::with_default_message(code, message);
    }

    let code = match body.code {
        Some(RawCode::Numeric(code)) => ClaimErrorCode::from_numeric(code),
        Some(RawCode::Text(code)) if !code.is_empty() => ClaimErrorCode::from(code.as_str()),
        _ => ClaimErrorCode::Other(status.to_string()),
    };
    let message = message
        .or_else(|| non_empty(Some(status_text.to_string())))
        .unwrap_or_else(|| "Unknown error".to_string());

    ClaimFailure { code, message }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn map_failure(status: u16, status_text: &str, body: &str) -> ClaimFailure {
        match ClaimResponse::from_http(status, status_text, body.as_bytes()) {
            ClaimResponse::Failure(failure) => failure,
            ClaimResponse::Success(claim) => panic!("unexpected success: {claim:?}"),
        }
    }

    #[test]
    fn test_success() {
        let body = fs::read("./test_fixtures/vesting_claim.json").unwrap();
        let response = ClaimResponse::from_http(200, "OK", &body);

        assert!(response.is_success());
    }

    #[test]
    fn test_malformed_success_body() {
        let body = r#"{"jetton": "x", "available_jetton_amount": "-1"}"#;
        let failure = map_failure(200, "OK", body);

        assert_eq!(failure.code, ClaimErrorCode::InternalError);
    }

    #[test]
    fn test_fixed_status_codes() {
        let cases = [
            (400, ClaimErrorCode::BadRequest, "Invalid Airdrop ID or recipient address."),
            (404, ClaimErrorCode::NotFound, "Entity not found."),
            (409, ClaimErrorCode::AlreadyClaimed, "Tokens have already been claimed."),
            (423, ClaimErrorCode::Locked, "Claim is locked by the airdrop admin."),
            (
                425,
                ClaimErrorCode::VestingNotReached,
                "Next vesting unlock has not been reached yet.",
            ),
            (
                429,
                ClaimErrorCode::BlockchainOverload,
                "Network is overloaded. Please try again later.",
            ),
            (500, ClaimErrorCode::InternalError, "Internal server error."),
        ];

        for (status, code, message) in cases {
            let failure = map_failure(status, "", "{}");
            assert_eq!(failure.code, code, "status {status}");
            assert_eq!(failure.message, message, "status {status}");
        }
    }

    #[test]
    fn test_upstream_message_preferred() {
        let failure = map_failure(404, "Not Found", r#"{"code": 1, "message": "airdrop not found"}"#);
        assert_eq!(failure.code, ClaimErrorCode::NotFound);
        assert_eq!(failure.message, "airdrop not found");

        // empty messages fall back to the default text
        let failure = map_failure(404, "Not Found", r#"{"message": ""}"#);
        assert_eq!(failure.message, "Entity not found.");
    }

    #[test]
    fn test_numeric_codes() {
        let failure = map_failure(403, "Forbidden", r#"{"code": 2, "message": "claim is locked"}"#);
        assert_eq!(failure.code, ClaimErrorCode::Locked);
        assert_eq!(failure.message, "claim is locked");

        let failure = map_failure(403, "Forbidden", r#"{"code": 4}"#);
        assert_eq!(failure.code, ClaimErrorCode::BlockchainOverload);
        assert_eq!(failure.message, "Forbidden");

        let failure = map_failure(403, "", r#"{"code": 77}"#);
        assert_eq!(failure.code, ClaimErrorCode::Other("77".to_string()));
        assert_eq!(failure.message, "Unknown error");
    }

    #[test]
    fn test_text_and_missing_codes() {
        let failure = map_failure(403, "Forbidden", r#"{"code": "already_claimed"}"#);
        assert_eq!(failure.code, ClaimErrorCode::AlreadyClaimed);
        assert_eq!(failure.code.as_str(), "already_claimed");

        let failure = map_failure(418, "I'm a teapot", r#"{"code": "teapot", "message": "short and stout"}"#);
        assert_eq!(failure.code, ClaimErrorCode::Other("teapot".to_string()));
        assert_eq!(failure.message, "short and stout");

        let failure = map_failure(502, "Bad Gateway", "<html>bad gateway</html>");
        assert_eq!(failure.code, ClaimErrorCode::Other("502".to_string()));
        assert_eq!(failure.message, "Bad Gateway");
    }

    #[test]
    fn test_network_error() {
        let ClaimResponse::Failure(failure) = ClaimResponse::network_error() else {
            panic!("expected failure");
        };
        assert_eq!(failure.code, ClaimErrorCode::NetworkError);
        assert_eq!(failure.message, "Network error. Please try again later.");
    }

    #[test]
    fn test_serialize_failure() {
        let failure = ClaimFailure {
            code: ClaimErrorCode::VestingNotReached,
            message: "wait".to_string(),
        };
        let json = serde_json::to_string(&failure).unwrap();
        assert_eq!(json, r#"{"code":"vesting_not_reached","message":"wait"}"#);

        let parsed: ClaimFailure = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, failure);
    }
}
