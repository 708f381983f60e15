use anchor_lang::prelude::*;

#[constant]
pub const CONFIGURATION_SEED: &[u8] = b"configuration";

#[constant]
pub const LOTTERY_SEED: &[u8] = b"lottery";

#[constant]
pub const BUNDLE_SEED: &[u8] = b"bundle";

/// Longest lottery seed accepted; a single PDA seed cannot exceed 32 bytes.
pub const MAX_LOTTERY_SEED_LEN: usize = 32;

/// Codes a single bundle may hold.
pub const MAX_CODES_PER_BUNDLE: usize = 100;

pub const MAX_FEE_PERCENT: u8 = 100;

/// Hex digits in a u64 ticket code.
pub const MAX_HEX_CODE_DIGITS: usize = 16;

/// Switchboard on-demand results are fixed point with 18 decimals.
pub const FEED_DECIMALS: u32 = 18;
