use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::error::LottoError;
use crate::events::{BundleRefunded, LotteryRefunded};
use crate::state::{Lottery, LotteryStatus};
use crate::utils::{bundle_records, load_bundle_accounts, persist_bundles, transfer_lamports};

/// Accounts required to refund bundles of a closed lottery.
///
/// The bundles to refund follow in `remaining_accounts` as `[bundle, owner]`
/// pairs: exactly one for a partial refund, otherwise any batch of unsettled
/// bundles. Large lotteries are refunded over several calls.
#[derive(Accounts)]
pub struct RefundBundle<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.seed.as_bytes()],
        bump = lottery.bump,
        has_one = admin @ LottoError::Unauthorized
    )]
    pub lottery: Account<'info, Lottery>,
}

pub fn process_refund_bundle<'info>(
    ctx: Context<'_, '_, 'info, 'info, RefundBundle<'info>>,
    partial: bool,
) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();

    let mut accounts = load_bundle_accounts(ctx.remaining_accounts)?;
    let mut records = bundle_records(&accounts);

    let lottery = &mut ctx.accounts.lottery;
    let total = lottery.refund(lottery_key, &mut records, partial)?;

    let lottery_info = lottery.to_account_info();
    for (entry, record) in accounts.iter().zip(records.iter()) {
        transfer_lamports(&lottery_info, entry.owner, record.amount_paid)?;

        emit!(BundleRefunded {
            lottery: lottery_key,
            bundle: entry.bundle.key(),
            owner: record.owner,
            amount: record.amount_paid,
        });
    }

    persist_bundles(&mut accounts, records)?;

    msg!("REFUNDED: {} lamports to {} bundle(s)", total, accounts.len());

    match lottery.status {
        LotteryStatus::Refunded => {
            msg!("LOTTERY_REFUNDED: {}", lottery_key);
            emit!(LotteryRefunded {
                lottery: lottery_key,
                bundle_count: lottery.bundle_count,
            });
        }
        LotteryStatus::Closed => {
            msg!("Bundles left to refund: {}", lottery.unsettled_bundles);
        }
        LotteryStatus::Open | LotteryStatus::Resolved => {}
    }

    Ok(())
}
