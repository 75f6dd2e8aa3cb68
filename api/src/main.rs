mod error;
mod router;

use std::{net::SocketAddr, sync::Arc};

use clap::Parser;
use router::RouterState;
use ton_airdrop_claim::{
    apply_jetton_info, jetton::DEFAULT_TONAPI_URL, ClaimClient, JettonClient,
};
use ton_airdrop_vesting::{parse_locale, RenderOptions, DEFAULT_DECIMALS};
use tracing::{info, instrument};

use crate::error::ApiError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Bind address for the server
    #[clap(long, env, default_value_t = SocketAddr::from(([0, 0, 0, 0], 7001)))]
    bind_addr: SocketAddr,

    /// Claim API url
    #[clap(long, env, default_value = "https://mainnet-airdrop.tonapi.io")]
    claim_api_url: String,

    /// tonapi url, used to look up jetton metadata
    #[clap(long, env, default_value = DEFAULT_TONAPI_URL)]
    tonapi_url: String,

    /// Jetton master address of the airdrop
    #[clap(long, env)]
    jetton: Option<String>,

    /// Jetton decimals, used when metadata is unavailable
    #[clap(long, env, default_value_t = DEFAULT_DECIMALS, value_parser = clap::value_parser!(u32).range(0..=255))]
    decimals: u32,

    /// Locale of rendered dates
    #[clap(long, env, default_value = "en-US")]
    locale: String,
}

#[tokio::main]
#[instrument]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt().init();

    info!("args: {:?}", args);

    let mut render_options = RenderOptions {
        decimals: args.decimals,
        locale: parse_locale(&args.locale)?,
        ..RenderOptions::default()
    };

    if let Some(jetton) = &args.jetton {
        let jetton_info = JettonClient::new(args.tonapi_url.clone())
            .get_jetton_info(jetton)
            .await;
        apply_jetton_info(&mut render_options, jetton, jetton_info);
    }

    let claim_client = ClaimClient::new(args.claim_api_url.clone())?;
    info!("using claim api at {}", claim_client.base_url());

    let state = Arc::new(RouterState {
        claim_client,
        render_options,
    });

    let app = router::get_routes(state);

    info!("starting server at {}", args.bind_addr);

    axum::Server::bind(&args.bind_addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}
