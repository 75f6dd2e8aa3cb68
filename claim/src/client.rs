use std::{fmt, str::FromStr, time::Duration};

use tracing::{debug, instrument, warn};

use crate::{error::ClaimError, response::ClaimResponse, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn claim_api_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://mainnet-airdrop.tonapi.io",
            Network::Testnet => "https://testnet-airdrop.tonapi.io",
        }
    }
}

impl FromStr for Network {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(ClaimError::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// Client of the airdrop claim-status endpoint.
#[derive(Debug, Clone)]
pub struct ClaimClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClaimClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn for_network(network: Network) -> Result<Self> {
        Self::new(network.claim_api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn claim_url(&self, account: &str) -> String {
        format!("{}/v1/airdrop/claim/{}", self.base_url, account)
    }

    /// Fetches the claim of `account` in airdrop `airdrop_id`.
    ///
    /// Every upstream problem, including transport errors, is reported as a
    /// [`ClaimResponse::Failure`].
    #[instrument(skip(self))]
    pub async fn get_user_claim(&self, account: &str, airdrop_id: &str) -> ClaimResponse {
        let response = match self
            .client
            .get(self.claim_url(account))
            .query(&[("id", airdrop_id)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("error requesting claim: {e}");
                return ClaimResponse::network_error();
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!("error reading claim response: {e}");
                return ClaimResponse::network_error();
            }
        };

        let claim = ClaimResponse::from_http(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            &body,
        );
        if let ClaimResponse::Failure(failure) = &claim {
            debug!("claim failed with status {}: {}", status, failure);
        }
        claim
    }
}
