use anchor_lang::prelude::*;

use crate::constants::{BUNDLE_SEED, CONFIGURATION_SEED, LOTTERY_SEED};
use crate::error::LottoError;
use crate::state::{Configuration, Lottery, TicketBundle};

/// Accounts required to reclaim a bundle's rent.
///
/// Settled bundles close at any time; losing bundles close once their
/// lottery is resolved. The lottery itself is reclaimed after its last bundle.
#[derive(Accounts)]
pub struct CloseBundle<'info> {
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
        bump = bundle.bump,
        constraint = bundle.lottery == lottery.key() @ LottoError::KeyMismatch,
        close = admin
    )]
    pub bundle: Account<'info, TicketBundle>,
}

/// Accounts required to reclaim a finished lottery.
#[derive(Accounts)]
pub struct CloseLotteryInstance<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIGURATION_SEED],
        bump = configuration.bump,
        has_one = admin @ LottoError::Unauthorized
    )]
    pub configuration: Account<'info, Configuration>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.seed.as_bytes()],
        bump = lottery.bump,
        has_one = admin @ LottoError::Unauthorized,
        close = admin
    )]
    pub lottery: Account<'info, Lottery>,
}

pub fn process_close_bundle(ctx: Context<CloseBundle>) -> Result<()> {
    ctx.accounts.lottery.close_bundle(&ctx.accounts.bundle)?;

    msg!("BUNDLE_CLOSED: {}", ctx.accounts.bundle.key());
    msg!("Bundles left open: {}", ctx.accounts.lottery.live_bundles);
    Ok(())
}

pub fn process_close_lottery_instance(ctx: Context<CloseLotteryInstance>) -> Result<()> {
    ctx.accounts.lottery.ensure_reclaimable()?;
    ctx.accounts.configuration.track_lottery_reclaimed()?;

    msg!("LOTTERY_INSTANCE_CLOSED: {}", ctx.accounts.lottery.key());
    Ok(())
}
