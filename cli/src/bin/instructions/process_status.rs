use crate::*;

pub async fn process_status(args: &Args, status_args: &StatusArgs) -> Result<()> {
    let claim = fetch_claim(args, &status_args.account, &status_args.airdrop_id).await?;
    let options = args.render_options_for(&claim.info.jetton).await?;

    print_claim(&claim.info, &options, Utc::now())?;
    println!(
        "To be paid: ~{} TON",
        format_amount(&claim.claim_message.amount, TON_DECIMALS, AmountDisplay::Exact)
    );

    Ok(())
}
