use crate::*;

pub fn process_schedule(args: &Args, schedule_args: &ScheduleArgs) -> Result<()> {
    let json = fs::read_to_string(&schedule_args.claim_info_path).with_context(|| {
        format!(
            "failed to read claim from {}",
            schedule_args.claim_info_path.display()
        )
    })?;
    let info: ClaimInfo = serde_json::from_str(&json)?;
    let options = args.render_options()?;
    let now = match schedule_args.at {
        Some(ts) => DateTime::from_timestamp(ts, 0).context("timestamp out of range")?,
        None => Utc::now(),
    };

    print_claim(&info, &options, now)?;

    if let Some(csv_path) = &schedule_args.csv_path {
        let items = info
            .schedule(now)
            .render_items(&options)
            .collect::<ton_airdrop_vesting::Result<Vec<_>>>()?;
        write_schedule_csv(&items, csv_path)?;
        println!("wrote {} unlocks to {}", items.len(), csv_path.display());
    }

    Ok(())
}

pub fn write_schedule_csv(items: &[VestingLineItem], path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.flush()?;

    Ok(())
}
