use chrono::{DateTime, Locale, Utc};
use serde::Serialize;

use crate::{
    amount::{calculate_previous_unlocks_amount, Amount},
    claim_info::{ClaimInfo, Unlock},
    decimals::{format_amount, AmountDisplay},
    error::VestingError,
    status::{determine_vesting_status, VestingStatus},
    Result,
};

/// Decimals of TON and of most jettons.
pub const DEFAULT_DECIMALS: u32 = 9;

const DATE_FORMAT: &str = "%b %-d, %Y, %H:%M";

/// Evaluated state of one tranche.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VestingItem {
    pub index: usize,
    pub unlock_date: DateTime<Utc>,
    pub is_past: bool,
    pub fraction: u32,
    pub unlock_amount: Amount,
    pub status: VestingStatus,
}

/// Render-ready view of one tranche.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VestingLineItem {
    pub key: usize,
    pub unlock_time: i64,
    pub date: String,
    pub status: VestingStatus,
    pub status_text: String,
    pub percentage: String,
    pub amount: String,
    pub unlock_amount: Amount,
    pub is_past: bool,
    pub is_last_item: bool,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub decimals: u32,
    /// Jetton symbol appended to amounts
    pub symbol: Option<String>,
    pub locale: Locale,
    pub display: AmountDisplay,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            symbol: None,
            locale: Locale::en_US,
            display: AmountDisplay::Exact,
        }
    }
}

/// Parses a locale name such as `en-US` or `fr_FR`.
pub fn parse_locale(name: &str) -> Result<Locale> {
    Locale::try_from(name.replace('-', "_").as_str())
        .map_err(|_| VestingError::UnknownLocale(name.to_string()))
}

pub fn format_date(date: &DateTime<Utc>, locale: Locale) -> String {
    date.format_localized(DATE_FORMAT, locale).to_string()
}

/// Fraction as a percentage with two decimals, e.g. 2515 -> "25.15%".
pub fn format_percentage(fraction: u32) -> String {
    format!("{}.{:02}%", fraction / 100, fraction % 100)
}

fn unlock_date(unlock: &Unlock) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(unlock.unlock_time, 0)
        .ok_or(VestingError::InvalidUnlockTime(unlock.unlock_time))
}

/// Vesting schedule of a [`ClaimInfo`] snapshot evaluated at `now`.
///
/// Every tranche is evaluated independently from the snapshot, so the
/// sequences returned here can be restarted and never share state.
#[derive(Debug, Clone, Copy)]
pub struct VestingSchedule<'a> {
    claim_info: &'a ClaimInfo,
    now: DateTime<Utc>,
}

impl<'a> VestingSchedule<'a> {
    pub fn new(claim_info: &'a ClaimInfo, now: DateTime<Utc>) -> Self {
        Self { claim_info, now }
    }

    pub fn len(&self) -> usize {
        self.claim_info.unlocks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazily evaluates each tranche in schedule order.
    pub fn items(&self) -> impl Iterator<Item = Result<VestingItem>> + 'a {
        let schedule = *self;
        self.claim_info
            .unlocks()
            .iter()
            .enumerate()
            .map(move |(index, unlock)| schedule.evaluate(index, unlock))
    }

    fn evaluate(&self, index: usize, unlock: &Unlock) -> Result<VestingItem> {
        let total = &self.claim_info.total_jetton_amount;
        let unlock_date = unlock_date(unlock)?;
        let is_past = unlock.unlock_time <= self.now.timestamp();

        let unlock_amount = total.unlock_share(unlock.fraction)?;
        let previous_unlocks_amount =
            calculate_previous_unlocks_amount(self.claim_info.unlocks(), total, index)?;

        let status = determine_vesting_status(
            is_past,
            &previous_unlocks_amount,
            &unlock_amount,
            &self.claim_info.claimed_jetton_amount,
        );

        Ok(VestingItem {
            index,
            unlock_date,
            is_past,
            fraction: unlock.fraction,
            unlock_amount,
            status,
        })
    }

    /// Lazily projects each tranche into a [`VestingLineItem`].
    pub fn render_items(
        &self,
        options: &RenderOptions,
    ) -> impl Iterator<Item = Result<VestingLineItem>> + 'a {
        let options = options.clone();
        let last_index = self.len().saturating_sub(1);
        self.items()
            .map(move |item| item.map(|item| item.render(&options, last_index)))
    }

    /// Date of the first tranche that unlocks strictly after `now`.
    pub fn next_claim_date(&self) -> Result<Option<DateTime<Utc>>> {
        let now = self.now.timestamp();
        self.claim_info
            .unlocks()
            .iter()
            .find(|unlock| unlock.unlock_time > now)
            .map(unlock_date)
            .transpose()
    }
}

impl VestingItem {
    fn render(&self, options: &RenderOptions, last_index: usize) -> VestingLineItem {
        let amount = format_amount(&self.unlock_amount, options.decimals, options.display);
        let amount = match &options.symbol {
            Some(symbol) => format!("{amount} {symbol}"),
            None => amount,
        };

        VestingLineItem {
            key: self.index,
            unlock_time: self.unlock_date.timestamp(),
            date: format_date(&self.unlock_date, options.locale),
            status: self.status,
            status_text: self.status.status_text().to_string(),
            percentage: format_percentage(self.fraction),
            amount,
            unlock_amount: self.unlock_amount.clone(),
            is_past: self.is_past,
            is_last_item: self.index == last_index,
        }
    }
}
