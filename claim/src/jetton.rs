use serde::{Deserialize, Serialize};
use ton_airdrop_vesting::{schedule::DEFAULT_DECIMALS, RenderOptions};
use tracing::{info, instrument, warn};

use crate::{error::ClaimError, Result};

pub const DEFAULT_TONAPI_URL: &str = "https://tonapi.io";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JettonMetadata {
    pub address: String,
    pub name: String,
    pub symbol: String,
    /// Decimal places, as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<String>,
}

/// Jetton metadata as reported by tonapi.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JettonInfo {
    pub metadata: JettonMetadata,
    /// Logo url
    #[serde(default)]
    pub preview: String,
}

impl JettonInfo {
    /// Decimal places of the jetton. Jetton metadata stores them as a `uint8`.
    pub fn decimals(&self) -> Result<u32> {
        match &self.metadata.decimals {
            Some(decimals) => decimals
                .parse::<u8>()
                .map(u32::from)
                .map_err(|_| ClaimError::InvalidDecimals(decimals.clone())),
            None => Ok(DEFAULT_DECIMALS),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }
}

/// Takes decimals and symbol from jetton metadata into `options`.
///
/// The metadata decimals replace the configured ones, while a configured
/// symbol is kept. When the lookup failed or the metadata is malformed,
/// `options` is left untouched.
pub fn apply_jetton_info(
    options: &mut RenderOptions,
    jetton: &str,
    jetton_info: Result<JettonInfo>,
) {
    let jetton_info = match jetton_info {
        Ok(jetton_info) => jetton_info,
        Err(e) => {
            warn!(
                "error fetching jetton {jetton}, using {} decimals: {e}",
                options.decimals
            );
            return;
        }
    };

    match jetton_info.decimals() {
        Ok(decimals) => {
            info!("jetton {jetton}: {} with {decimals} decimals", jetton_info.symbol());
            options.decimals = decimals;
            if options.symbol.is_none() {
                options.symbol = Some(jetton_info.symbol().to_string());
            }
        }
        Err(e) => warn!(
            "bad metadata of jetton {jetton}, using {} decimals: {e}",
            options.decimals
        ),
    }
}

#[derive(Debug, Clone)]
pub struct JettonClient {
    client: reqwest::Client,
    base_url: String,
}

impl JettonClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_jetton_info(&self, jetton: &str) -> Result<JettonInfo> {
        let info = self
            .client
            .get(format!("{}/v2/jettons/{}", self.base_url, jetton))
            .send()
            .await?
            .error_for_status()?
            .json::<JettonInfo>()
            .await?;

        Ok(info)
    }
}

impl Default for JettonClient {
    fn default() -> Self {
        Self::new(DEFAULT_TONAPI_URL)
    }
}
