use std::convert::Infallible;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde_json::json;
use thiserror::Error;
use ton_airdrop_claim::{ClaimErrorCode, ClaimFailure};
use ton_airdrop_vesting::VestingError;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Claim Error: {0}")]
    ClaimFailure(ClaimFailure),

    #[error("Vesting Error: {0}")]
    VestingError(#[from] VestingError),
}

impl From<ClaimFailure> for ApiError {
    fn from(failure: ClaimFailure) -> Self {
        ApiError::ClaimFailure(failure)
    }
}

/// HTTP status reported to clients for an upstream claim failure.
pub fn claim_status_code(code: &ClaimErrorCode) -> StatusCode {
    match code {
        ClaimErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ClaimErrorCode::NotFound | ClaimErrorCode::NotProcessed => StatusCode::NOT_FOUND,
        ClaimErrorCode::AlreadyClaimed => StatusCode::CONFLICT,
        ClaimErrorCode::Locked => StatusCode::LOCKED,
        ClaimErrorCode::VestingNotReached => {
            StatusCode::from_u16(425).unwrap_or(StatusCode::FORBIDDEN)
        }
        ClaimErrorCode::BlockchainOverload => StatusCode::TOO_MANY_REQUESTS,
        ClaimErrorCode::NetworkError => StatusCode::BAD_GATEWAY,
        ClaimErrorCode::InternalError | ClaimErrorCode::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ClaimFailure(failure) => {
                warn!("Claim failure: {failure}");
                (claim_status_code(&failure.code), Json(failure)).into_response()
            }
            ApiError::VestingError(e) => {
                error!("Vesting error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({
                        "code": "invalid_claim_data",
                        "message": "Claim data could not be evaluated.",
                    })),
                )
                    .into_response()
            }
        }
    }
}

pub async fn handle_error(error: BoxError) -> Result<impl IntoResponse, Infallible> {
    if error.is::<tower::timeout::error::Elapsed>() {
        return Ok((
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({
                "code" : 408,
                "error" : "Request Timeout",
            })),
        ));
    };
    if error.is::<tower::load_shed::error::Overloaded>() {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "code" : 503,
                "error" : "Service Unavailable",
            })),
        ));
    }

    Ok((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "code" : 500,
            "error" : "Internal Server Error",
        })),
    ))
}
