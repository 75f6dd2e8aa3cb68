use crate::*;

pub async fn process_claim_tx(args: &Args, claim_tx_args: &ClaimTxArgs) -> Result<()> {
    let claim = fetch_claim(args, &claim_tx_args.account, &claim_tx_args.airdrop_id).await?;
    if !claim.info.has_available() {
        bail!("no tokens available for claim");
    }

    let tx = claim.transaction_request(Utc::now());
    println!("{}", serde_json::to_string_pretty(&tx)?);

    Ok(())
}
