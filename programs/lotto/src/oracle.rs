use anchor_lang::prelude::*;
use switchboard_on_demand::PullFeedAccountData;

use crate::constants::FEED_DECIMALS;
use crate::error::LottoError;

/// Read side of the randomness source a lottery is bound to.
pub trait OracleFeed {
    /// Latest integer value published by the feed.
    fn latest_value(&self) -> Result<u64>;
}

/// Switchboard on-demand pull feed (e.g. BTC block height in decimal).
pub struct SwitchboardFeed<'a, 'info> {
    account: &'a AccountInfo<'info>,
}

impl<'a, 'info> SwitchboardFeed<'a, 'info> {
    pub fn new(account: &'a AccountInfo<'info>) -> Self {
        Self { account }
    }
}

impl OracleFeed for SwitchboardFeed<'_, '_> {
    fn latest_value(&self) -> Result<u64> {
        let data = self.account.try_borrow_data()?;
        let feed = PullFeedAccountData::parse(data).map_err(|_| LottoError::FeedParseError)?;

        // Never updated
        require!(feed.last_update_timestamp != 0, LottoError::FeedNoValue);

        feed_integer(feed.result.value)
    }
}

/// Integer part of a fixed-point feed result.
pub fn feed_integer(raw: i128) -> Result<u64> {
    let int_value = raw / 10i128.pow(FEED_DECIMALS);
    u64::try_from(int_value).map_err(|_| error!(LottoError::FeedValueOutOfRange))
}
