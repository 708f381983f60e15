use anchor_lang::prelude::*;

#[event]
pub struct LotteryCreated {
    pub lottery: Pubkey,
    pub seed: String,
    pub oracle: Pubkey,
    pub ticket_price: u64,
    pub code_range_start: u64,
    pub code_range_end: u64,
    pub fee_percent: u8,
}

#[event]
pub struct BundleRegistered {
    pub lottery: Pubkey,
    pub bundle: Pubkey,
    pub owner: Pubkey,
    pub index: u32,
    pub codes: Vec<u64>,
    pub amount_paid: u64,
    pub pot: u64,
}

#[event]
pub struct SalesClosed {
    pub lottery: Pubkey,
    pub pot: u64,
    pub bundle_count: u32,
}

/// Everything needed to re-derive and audit a draw.
#[event]
pub struct WinnerResolved {
    pub lottery: Pubkey,
    pub oracle_value: u64,
    pub winning_code: u64,
    pub bundle: Pubkey,
    pub winner: Pubkey,
    pub fee: u64,
    pub payout: u64,
}

#[event]
pub struct BundleRefunded {
    pub lottery: Pubkey,
    pub bundle: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct LotteryRefunded {
    pub lottery: Pubkey,
    pub bundle_count: u32,
}
