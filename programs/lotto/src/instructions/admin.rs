use anchor_lang::prelude::*;

use crate::constants::{CONFIGURATION_SEED, LOTTERY_SEED};
use crate::error::LottoError;
use crate::events::{LotteryCreated, SalesClosed};
use crate::state::{Configuration, Lottery, LotteryTerms};

/// Accounts required to create the program-wide configuration.
#[derive(Accounts)]
pub struct CreateConfiguration<'info> {
    /// Becomes the global admin and pays for the account.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Created on first use; a second call fails with `AlreadyInitialized`.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + Configuration::INIT_SPACE,
        seeds = [CONFIGURATION_SEED],
        bump
    )]
    pub configuration: Account<'info, Configuration>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to close the configuration and reclaim its rent.
#[derive(Accounts)]
pub struct CloseConfiguration<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIGURATION_SEED],
        bump = configuration.bump,
        has_one = admin @ LottoError::Unauthorized,
        close = admin
    )]
    pub configuration: Account<'info, Configuration>,
}

/// Accounts required to open a new lottery under `seed`.
#[derive(Accounts)]
#[instruction(seed: String)]
pub struct CreateLottery<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIGURATION_SEED],
        bump = configuration.bump,
        has_one = admin @ LottoError::Unauthorized
    )]
    pub configuration: Account<'info, Configuration>,

    /// Doubles as the escrow: ticket funding is sent straight to this address.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED, seed.as_bytes()],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// Randomness feed the draw will read from.
    /// CHECK: Only its address is stored here; the feed is parsed when the draw is resolved.
    pub oracle_feed: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to stop ticket sales.
#[derive(Accounts)]
pub struct CloseLottery<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.seed.as_bytes()],
        bump = lottery.bump,
        has_one = admin @ LottoError::Unauthorized
    )]
    pub lottery: Account<'info, Lottery>,
}

pub fn process_create_configuration(ctx: Context<CreateConfiguration>) -> Result<()> {
    let configuration = &mut ctx.accounts.configuration;
    configuration.initialize(ctx.accounts.admin.key(), ctx.bumps.configuration)?;

    msg!("CONFIGURATION_CREATED: {}", configuration.key());
    Ok(())
}

pub fn process_close_configuration(ctx: Context<CloseConfiguration>) -> Result<()> {
    ctx.accounts.configuration.ensure_closable()?;

    msg!("CONFIGURATION_CLOSED: {}", ctx.accounts.configuration.key());
    Ok(())
}

/// Opens a lottery bound to `oracle_feed`, with the given price, code range and fee.
///
/// # Arguments
/// * `ctx` - Context holding the CreateLottery accounts
/// * `seed` - Lottery seed, 1 to 32 bytes
/// * `terms` - Ticket price, inclusive code range and fee percent
pub fn process_create_lottery(
    ctx: Context<CreateLottery>,
    seed: String,
    terms: LotteryTerms,
) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();
    let oracle = ctx.accounts.oracle_feed.key();

    let lottery = &mut ctx.accounts.lottery;
    lottery.initialize(
        seed,
        ctx.accounts.admin.key(),
        oracle,
        terms,
        ctx.bumps.lottery,
    )?;
    ctx.accounts.configuration.track_lottery_created()?;

    msg!("LOTTERY_CREATED: {}", lottery_key);
    msg!(
        "Code range: [{}, {}], price: {}, fee: {}%",
        terms.code_range_start,
        terms.code_range_end,
        terms.ticket_price,
        terms.fee_percent
    );

    emit!(LotteryCreated {
        lottery: lottery_key,
        seed: lottery.seed.clone(),
        oracle,
        ticket_price: terms.ticket_price,
        code_range_start: terms.code_range_start,
        code_range_end: terms.code_range_end,
        fee_percent: terms.fee_percent,
    });

    Ok(())
}

pub fn process_close_lottery(ctx: Context<CloseLottery>) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();
    let lottery = &mut ctx.accounts.lottery;
    lottery.close_sales()?;

    msg!("LOTTERY_CLOSED: {}", lottery_key);
    emit!(SalesClosed {
        lottery: lottery_key,
        pot: lottery.pot,
        bundle_count: lottery.bundle_count,
    });

    Ok(())
}
