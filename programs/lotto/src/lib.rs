use anchor_lang::prelude::*;
use instructions::*;
#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;
use state::LotteryTerms;

/// PDA seeds and protocol limits.
pub mod constants;

/// Custom error types returned by every instruction.
pub mod error;

/// Events emitted for off-chain auditing of sales, draws and refunds.
pub mod events;

/// Instruction handlers: configuration, lottery lifecycle, bundle sales,
/// draw, refunds and reclaiming accounts.
pub mod instructions;

/// On-chain accounts: `Configuration`, `Lottery` and `TicketBundle`.
pub mod state;

/// Program-derived addresses, shared with clients.
pub mod address;

/// Hex ticket codes and their 8-byte wire form.
pub mod code;

/// Randomness feed abstraction and the Switchboard implementation.
pub mod oracle;

/// Oracle value to winning code, and winner lookup.
pub mod resolver;

/// Fee split, reward and refund bookkeeping.
pub mod payout;

/// Lamport transfers and remaining-accounts loading.
pub mod utils;

#[cfg(test)]
mod tests;

declare_id!("5axSMdMUTNkXdXbYFVnUH3kPruTGszP132kiWM2iB69c");

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: env!("CARGO_PKG_NAME"),
    project_url: env!("CARGO_PKG_HOMEPAGE"),
    contacts: env!("CARGO_PKG_AUTHORS"),
    policy: env!("CARGO_PKG_REPOSITORY"),
    preferred_languages: "en",
    source_code: env!("CARGO_PKG_REPOSITORY")
}

#[program]
pub mod lotto {
    use super::*;

    pub fn create_configuration(ctx: Context<CreateConfiguration>) -> Result<()> {
        process_create_configuration(ctx)
    }

    pub fn close_configuration(ctx: Context<CloseConfiguration>) -> Result<()> {
        process_close_configuration(ctx)
    }

    pub fn create_lottery(
        ctx: Context<CreateLottery>,
        seed: String,
        ticket_price: u64,
        code_range_start: u64,
        code_range_end: u64,
        fee_percent: u8,
    ) -> Result<()> {
        process_create_lottery(
            ctx,
            seed,
            LotteryTerms {
                ticket_price,
                code_range_start,
                code_range_end,
                fee_percent,
            },
        )
    }

    pub fn close_lottery(ctx: Context<CloseLottery>) -> Result<()> {
        process_close_lottery(ctx)
    }

    pub fn register_bundle(
        ctx: Context<RegisterBundle>,
        _lottery_seed: String,
        funding_tx_hash: [u8; 32],
        owner: Pubkey,
        codes: Vec<u64>,
    ) -> Result<()> {
        process_register_bundle(ctx, funding_tx_hash, owner, codes)
    }

    pub fn reward_bundle(ctx: Context<RewardBundle>, winning_code: [u8; 8]) -> Result<()> {
        process_reward_bundle(ctx, winning_code)
    }

    pub fn refund_bundle<'info>(
        ctx: Context<'_, '_, 'info, 'info, RefundBundle<'info>>,
        partial: bool,
    ) -> Result<()> {
        process_refund_bundle(ctx, partial)
    }

    pub fn close_bundle(ctx: Context<CloseBundle>) -> Result<()> {
        process_close_bundle(ctx)
    }

    pub fn close_lottery_instance(ctx: Context<CloseLotteryInstance>) -> Result<()> {
        process_close_lottery_instance(ctx)
    }
}
