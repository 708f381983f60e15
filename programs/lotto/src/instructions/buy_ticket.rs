use anchor_lang::prelude::*;

use crate::constants::{BUNDLE_SEED, LOTTERY_SEED};
use crate::error::LottoError;
use crate::events::BundleRegistered;
use crate::state::{BundleRegistration, Lottery, TicketBundle};
use crate::utils::lamports_above_rent;

/// Accounts required to register a bundle of tickets.
///
/// The owner has already transferred `ticket_price * codes.len()` lamports to
/// the lottery address; the admin registers the purchase keyed by the hash of
/// that transfer, so each transfer buys at most one bundle.
#[derive(Accounts)]
#[instruction(lottery_seed: String, funding_tx_hash: [u8; 32])]
pub struct RegisterBundle<'info> {
    /// Pays for the bundle account.
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery_seed.as_bytes()],
        bump = lottery.bump,
        has_one = admin @ LottoError::Unauthorized
    )]
    pub lottery: Account<'info, Lottery>,

    /// Initialized here; an already registered funding hash fails with `DuplicateBundle`.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + TicketBundle::INIT_SPACE,
        seeds = [BUNDLE_SEED, lottery_seed.as_bytes(), funding_tx_hash.as_ref()],
        bump
    )]
    pub bundle: Account<'info, TicketBundle>,

    pub system_program: Program<'info, System>,
}

/// Registers `codes` for `owner`.
///
/// Steps performed:
/// 1. Check the lottery is open and every code is in range.
/// 2. Check the escrow holds unclaimed funding for the whole bundle.
/// 3. Record the bundle and grow the pot.
pub fn process_register_bundle(
    ctx: Context<RegisterBundle>,
    funding_tx_hash: [u8; 32],
    owner: Pubkey,
    codes: Vec<u64>,
) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();
    let bundle_key = ctx.accounts.bundle.key();

    let rent = Rent::get()?;
    let escrowed = lamports_above_rent(&ctx.accounts.lottery.to_account_info(), &rent);
    let escrow_available = escrowed.saturating_sub(ctx.accounts.lottery.pot);

    let lottery = &mut ctx.accounts.lottery;
    let bundle: &mut TicketBundle = &mut ctx.accounts.bundle;
    lottery.register_bundle(
        lottery_key,
        bundle,
        BundleRegistration {
            funding_tx_hash,
            owner,
            codes,
            bump: ctx.bumps.bundle,
        },
        escrow_available,
    )?;

    msg!("BUNDLE_REGISTERED: {}", bundle_key);
    msg!(
        "Owner: {}, codes: {}, paid: {}, pot: {}",
        owner,
        bundle.codes.len(),
        bundle.amount_paid,
        lottery.pot
    );

    emit!(BundleRegistered {
        lottery: lottery_key,
        bundle: bundle_key,
        owner,
        index: bundle.index,
        codes: bundle.codes.clone(),
        amount_paid: bundle.amount_paid,
        pot: lottery.pot,
    });

    Ok(())
}
