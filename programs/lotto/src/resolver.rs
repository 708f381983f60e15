//! Maps an oracle value onto a lottery's code range.
//!
//! The mapping is `start + (value mod (end - start + 1))` over the integer
//! part of the feed value. Anyone holding the same feed value and range can
//! reproduce the winning code, and check the paid bundle against the
//! `BundleRegistered` events.

use anchor_lang::prelude::*;

use crate::code::code_from_bytes;
use crate::error::LottoError;
use crate::oracle::OracleFeed;
use crate::state::{Lottery, LotteryStatus, TicketBundle};

/// Outcome of reading the oracle for a closed lottery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Draw {
    pub oracle_value: u64,
    pub winning_code: u64,
}

pub fn derive_winning_code(oracle_value: u64, range_start: u64, range_end: u64) -> Result<u64> {
    require_gte!(range_end, range_start, LottoError::InvalidRange);

    // u128 so the full u64 range (width 2^64) does not overflow
    let width = (range_end as u128 - range_start as u128) + 1;
    let code = range_start as u128 + (oracle_value as u128 % width);

    u64::try_from(code).map_err(|_| error!(LottoError::ArithmeticOverflow))
}

/// Reads the oracle and checks the caller's claimed winning code against it.
pub fn resolve_draw<F: OracleFeed>(
    lottery: &Lottery,
    feed: &F,
    claimed_code: [u8; 8],
) -> Result<Draw> {
    match lottery.status {
        LotteryStatus::Closed => {}
        LotteryStatus::Open | LotteryStatus::Resolved | LotteryStatus::Refunded => {
            return err!(LottoError::InvalidState);
        }
    }

    let oracle_value = feed.latest_value()?;
    let winning_code =
        derive_winning_code(oracle_value, lottery.code_range_start, lottery.code_range_end)?;

    require_eq!(
        code_from_bytes(claimed_code),
        winning_code,
        LottoError::OracleMismatch
    );

    Ok(Draw {
        oracle_value,
        winning_code,
    })
}

/// Picks the bundle a client submits for the draw: the earliest registration
/// holding the code, whatever order `bundles` is in.
pub fn winning_position(bundles: &[TicketBundle], winning_code: u64) -> Option<usize> {
    bundles
        .iter()
        .enumerate()
        .filter(|(_, bundle)| bundle.holds(winning_code))
        .min_by_key(|(_, bundle)| bundle.index)
        .map(|(position, _)| position)
}
