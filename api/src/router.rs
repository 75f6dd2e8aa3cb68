use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
    time::Duration,
};

use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use http::Request;
use serde_derive::{Deserialize, Serialize};
use ton_airdrop_claim::{ClaimClient, ClaimResponse, TransactionRequest, UserClaimInfo};
use ton_airdrop_vesting::{
    format_amount, Amount, AmountDisplay, ClaimInfo, RenderOptions, VestingLineItem,
};
use tower::{
    buffer::BufferLayer, limit::RateLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer,
    ServiceBuilder,
};
use tower_http::{
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info, instrument, Span};

use crate::{error, Result};

/// TON itself has 9 decimals.
const TON_DECIMALS: u32 = 9;

pub struct RouterState {
    pub claim_client: ClaimClient,
    pub render_options: RenderOptions,
}

impl Debug for RouterState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterState")
            .field("claim_api_url", &self.claim_client.base_url())
            .field("decimals", &self.render_options.decimals)
            .field("symbol", &self.render_options.symbol)
            .finish()
    }
}

#[instrument]
pub fn get_routes(state: Arc<RouterState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(error::handle_error)) // handle middleware errors explicitly!
        .layer(BufferLayer::new(100)) // buffer up to 100 requests in queue
        .layer(RateLimitLayer::new(1000, Duration::from_secs(10)))
        .layer(TimeoutLayer::new(Duration::from_secs(20)))
        .layer(LoadShedLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started {} {}", request.method(), request.uri().path())
                })
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing_core::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    Router::new()
        .route("/", get(root))
        .route("/claim/:account", get(get_claim))
        .route("/version", get(get_version))
        .layer(middleware)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ClaimQuery {
    /// Airdrop id
    id: String,
}

/// Claim of one account, with amounts and vesting schedule ready for display.
#[derive(Debug, Serialize)]
struct ClaimView {
    #[serde(flatten)]
    info: ClaimInfo,
    symbol: Option<String>,
    decimals: u32,
    available_amount: String,
    total_amount: String,
    claimed_amount: String,
    /// TON attached to the claim message
    claim_fee: String,
    is_vesting: bool,
    has_available: bool,
    fully_claimed: bool,
    vesting: Vec<VestingLineItem>,
    next_claim_date: Option<DateTime<Utc>>,
    transaction: TransactionRequest,
}

fn build_claim_view(
    claim: &UserClaimInfo,
    options: &RenderOptions,
    now: DateTime<Utc>,
) -> Result<ClaimView> {
    let info = &claim.info;
    let schedule = info.schedule(now);
    let amount = |amount: &Amount| format_amount(amount, options.decimals, options.display);

    Ok(ClaimView {
        info: info.clone(),
        symbol: options.symbol.clone(),
        decimals: options.decimals,
        available_amount: amount(&info.available_jetton_amount),
        total_amount: amount(&info.total_jetton_amount),
        claimed_amount: amount(&info.claimed_jetton_amount),
        claim_fee: format_amount(
            &claim.claim_message.amount,
            TON_DECIMALS,
            AmountDisplay::Exact,
        ),
        is_vesting: info.is_vesting(),
        has_available: info.has_available(),
        fully_claimed: info.fully_claimed(),
        vesting: schedule
            .render_items(options)
            .collect::<ton_airdrop_vesting::Result<_>>()?,
        next_claim_date: schedule.next_claim_date()?,
        transaction: claim.transaction_request(now),
    })
}

/// Fetch the claim of an account and evaluate its vesting schedule
#[instrument(skip(state), err)]
async fn get_claim(
    State(state): State<Arc<RouterState>>,
    Path(account): Path<String>,
    Query(query): Query<ClaimQuery>,
) -> Result<Json<ClaimView>> {
    match state
        .claim_client
        .get_user_claim(&account, &query.id)
        .await
    {
        ClaimResponse::Success(claim) => Ok(Json(build_claim_view(
            &claim,
            &state.render_options,
            Utc::now(),
        )?)),
        ClaimResponse::Failure(failure) => Err(failure.into()),
    }
}

async fn get_version() -> impl IntoResponse {
    Json(env!("CARGO_PKG_VERSION"))
}

async fn root() -> impl IntoResponse {
    "TON Airdrop Claim API"
}
