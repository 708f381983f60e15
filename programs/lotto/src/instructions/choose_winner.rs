use anchor_lang::prelude::*;

use crate::code::format_hex_code;
use crate::constants::{BUNDLE_SEED, LOTTERY_SEED};
use crate::error::LottoError;
use crate::events::WinnerResolved;
use crate::oracle::SwitchboardFeed;
use crate::resolver::resolve_draw;
use crate::state::{Lottery, TicketBundle};
use crate::utils::{lamports_above_rent, transfer_lamports};

/// Accounts required to resolve the draw and pay the winner.
///
/// Only the winning bundle and its owner are passed. Clients pick the
/// earliest registered bundle holding the code; losing bundles are closed
/// afterwards with `close_bundle`.
#[derive(Accounts)]
pub struct RewardBundle<'info> {
    /// Receives the platform fee.
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.seed.as_bytes()],
        bump = lottery.bump,
        has_one = admin @ LottoError::Unauthorized
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [BUNDLE_SEED, lottery.seed.as_bytes(), bundle.funding_tx_hash.as_ref()],
        bump = bundle.bump
    )]
    pub bundle: Account<'info, TicketBundle>,

    /// CHECK: Must be the owner recorded on the bundle; only receives lamports.
    #[account(mut, address = bundle.owner @ LottoError::OwnerMismatch)]
    pub owner: UncheckedAccount<'info>,

    /// The feed the lottery was created with.
    /// CHECK: The address is pinned to `lottery.oracle`; the data is parsed as a pull feed.
    #[account(address = lottery.oracle @ LottoError::FeedMismatch)]
    pub oracle_feed: UncheckedAccount<'info>,
}

/// Resolves the draw from the oracle and pays out the pot.
///
/// Steps performed:
/// 1. Read the oracle and check the claimed winning code against it.
/// 2. Check the passed bundle belongs to the lottery, is unsettled and holds the code.
/// 3. Send the fee to the admin and the rest of the pot to the bundle owner.
///
/// Fails with `NoWinner` if the bundle does not hold the code; when nobody
/// does, the admin refunds instead.
pub fn process_reward_bundle(ctx: Context<RewardBundle>, winning_code: [u8; 8]) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();
    let draw = resolve_draw(
        &ctx.accounts.lottery,
        &SwitchboardFeed::new(&ctx.accounts.oracle_feed),
        winning_code,
    )?;

    msg!("Oracle value: {}", draw.oracle_value);
    msg!("Winning code: {}", format_hex_code(draw.winning_code));

    let lottery_info = ctx.accounts.lottery.to_account_info();
    let rent = Rent::get()?;
    require_gte!(
        lamports_above_rent(&lottery_info, &rent),
        ctx.accounts.lottery.pot,
        LottoError::InsufficientLamports
    );

    let award = ctx.accounts.lottery.reward(
        lottery_key,
        &mut ctx.accounts.bundle,
        draw.winning_code,
    )?;

    transfer_lamports(
        &lottery_info,
        &ctx.accounts.admin.to_account_info(),
        award.split.fee,
    )?;
    transfer_lamports(
        &lottery_info,
        &ctx.accounts.owner.to_account_info(),
        award.split.payout,
    )?;

    msg!("WINNER: {}", award.winner);
    msg!("Fee: {}, payout: {}", award.split.fee, award.split.payout);

    emit!(WinnerResolved {
        lottery: lottery_key,
        oracle_value: draw.oracle_value,
        winning_code: draw.winning_code,
        bundle: ctx.accounts.bundle.key(),
        winner: award.winner,
        fee: award.split.fee,
        payout: award.split.payout,
    });

    Ok(())
}
