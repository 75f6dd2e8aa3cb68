mod instructions;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use csv::Writer;
use instructions::*;
use ton_airdrop_claim::{
    apply_jetton_info, jetton::DEFAULT_TONAPI_URL, ClaimClient, ClaimResponse, JettonClient,
    Network, UserClaimInfo,
};
use ton_airdrop_vesting::{
    format_amount, parse_locale, schedule::format_date, AmountDisplay, ClaimInfo, RenderOptions,
    VestingLineItem, DEFAULT_DECIMALS,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// TON itself has 9 decimals.
const TON_DECIMALS: u32 = 9;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,

    /// Claim API network
    #[clap(long, env, default_value_t = Network::Mainnet)]
    pub network: Network,

    /// Claim API url, overrides --network
    #[clap(long, env)]
    pub claim_api_url: Option<String>,

    /// tonapi url, used to look up jetton metadata
    #[clap(long, env, default_value = DEFAULT_TONAPI_URL)]
    pub tonapi_url: String,

    /// Jetton master address. Defaults to the jetton of the fetched claim
    #[clap(long, env)]
    pub jetton: Option<String>,

    /// Jetton decimals, used when metadata is unavailable
    #[clap(long, env, default_value_t = DEFAULT_DECIMALS, value_parser = clap::value_parser!(u32).range(0..=255))]
    pub decimals: u32,

    /// Jetton symbol, overrides the metadata symbol
    #[clap(long, env)]
    pub symbol: Option<String>,

    /// Locale of rendered dates
    #[clap(long, env, default_value = "en-US")]
    pub locale: String,

    /// Round amounts to whole tokens
    #[clap(long, env)]
    pub rounded: bool,
}

impl Args {
    fn get_claim_client(&self) -> Result<ClaimClient> {
        let client = match &self.claim_api_url {
            Some(url) => ClaimClient::new(url.clone())?,
            None => ClaimClient::for_network(self.network)?,
        };
        info!("using claim api at {}", client.base_url());
        Ok(client)
    }

    /// Render options from the command line alone.
    fn render_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions {
            decimals: self.decimals,
            symbol: self.symbol.clone(),
            locale: parse_locale(&self.locale)?,
            display: if self.rounded {
                AmountDisplay::Rounded
            } else {
                AmountDisplay::Exact
            },
        })
    }

    /// Render options completed with the jetton metadata when it can be fetched.
    async fn render_options_for(&self, claim_jetton: &str) -> Result<RenderOptions> {
        let mut options = self.render_options()?;
        let jetton = self.jetton.as_deref().unwrap_or(claim_jetton);

        let jetton_info = JettonClient::new(self.tonapi_url.clone())
            .get_jetton_info(jetton)
            .await;
        apply_jetton_info(&mut options, jetton, jetton_info);

        Ok(options)
    }
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the claim of an account and show its vesting schedule
    Status(StatusArgs),
    /// Evaluate the vesting schedule of a saved claim
    Schedule(ScheduleArgs),
    /// Print the wallet transaction that claims the available tokens
    ClaimTx(ClaimTxArgs),
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Recipient address
    #[clap(long, env)]
    pub account: String,

    /// Airdrop id
    #[clap(long, env)]
    pub airdrop_id: String,
}

#[derive(Parser, Debug)]
pub struct ScheduleArgs {
    /// Path of a claim JSON, as returned by the claim API
    #[clap(long, env)]
    pub claim_info_path: PathBuf,

    /// Write the schedule to this CSV path
    #[clap(long, env)]
    pub csv_path: Option<PathBuf>,

    /// Evaluate at this unix timestamp instead of now
    #[clap(long)]
    pub at: Option<i64>,
}

#[derive(Parser, Debug)]
pub struct ClaimTxArgs {
    /// Recipient address
    #[clap(long, env)]
    pub account: String,

    /// Airdrop id
    #[clap(long, env)]
    pub airdrop_id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match &args.command {
        Commands::Status(status_args) => process_status(&args, status_args).await,
        Commands::Schedule(schedule_args) => process_schedule(&args, schedule_args),
        Commands::ClaimTx(claim_tx_args) => process_claim_tx(&args, claim_tx_args).await,
    }
}

async fn fetch_claim(args: &Args, account: &str, airdrop_id: &str) -> Result<UserClaimInfo> {
    let client = args.get_claim_client()?;
    match client.get_user_claim(account, airdrop_id).await {
        ClaimResponse::Success(claim) => Ok(*claim),
        ClaimResponse::Failure(failure) => bail!("claim failed: {failure}"),
    }
}

fn print_claim(info: &ClaimInfo, options: &RenderOptions, now: DateTime<Utc>) -> Result<()> {
    let amount = |amount| {
        let formatted = format_amount(amount, options.decimals, options.display);
        match &options.symbol {
            Some(symbol) => format!("{formatted} {symbol}"),
            None => formatted,
        }
    };

    println!("Jetton: {}", info.jetton);
    println!("Available: {}", amount(&info.available_jetton_amount));
    println!("Total: {}", amount(&info.total_jetton_amount));
    println!("Claimed: {}", amount(&info.claimed_jetton_amount));

    let schedule = info.schedule(now);
    if !schedule.is_empty() {
        println!();
        println!("{:<24} {:>8} {:>28}  Status", "Unlock", "Share", "Amount");
        for item in schedule.render_items(options) {
            let item = item?;
            println!(
                "{:<24} {:>8} {:>28}  {}",
                item.date, item.percentage, item.amount, item.status_text
            );
        }
    }

    if !info.has_available() {
        match schedule.next_claim_date()? {
            Some(date) => println!(
                "\nNothing to claim right now. Next unlock: {}",
                format_date(&date, options.locale)
            ),
            None if info.fully_claimed() => println!("\nAll tokens have been claimed."),
            None => println!("\nYou have no tokens available for claim."),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "cli",
            "--network",
            "testnet",
            "--rounded",
            "status",
            "--account",
            "0:da6b1b6663a0e4d18cc8574ccd9db5296e367dd9324706f3bbd9eb1cd2caf0bf",
            "--airdrop-id",
            "03cfc582-b1c3-410a-a9a7-1f3afe326b3b",
        ])
        .unwrap();

        assert_eq!(args.network, Network::Testnet);
        assert_eq!(args.decimals, 9);
        assert_eq!(args.render_options().unwrap().display, AmountDisplay::Rounded);
        assert!(matches!(args.command, Commands::Status(_)));
    }

    #[test]
    fn test_parse_args_rejects_wide_decimals() {
        let parsed = |decimals: &str| {
            Args::try_parse_from([
                "cli",
                "--decimals",
                decimals,
                "schedule",
                "--claim-info-path",
                "claim.json",
            ])
        };

        assert_eq!(parsed("255").unwrap().decimals, 255);
        assert!(parsed("256").is_err());
        assert!(parsed("70000").is_err());
    }
}
