//! Deterministic addresses for every record the program owns.
//!
//! ```text
//! configuration = PDA("configuration")
//! lottery       = PDA("lottery", seed)
//! bundle        = PDA("bundle", seed, funding_tx_hash)
//! ```
//!
//! Clients derive the same addresses off-chain, so these helpers are what a
//! driver uses to build instruction account lists.

use anchor_lang::prelude::*;
use solana_program::hash::hash;

use crate::constants::{BUNDLE_SEED, CONFIGURATION_SEED, LOTTERY_SEED, MAX_LOTTERY_SEED_LEN};
use crate::error::LottoError;

pub fn validate_lottery_seed(seed: &str) -> Result<()> {
    require!(!seed.is_empty(), LottoError::EmptySeed);
    require_gte!(MAX_LOTTERY_SEED_LEN, seed.len(), LottoError::SeedTooLong);
    Ok(())
}

pub fn configuration_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIGURATION_SEED], program_id)
}

pub fn lottery_address(program_id: &Pubkey, seed: &str) -> Result<(Pubkey, u8)> {
    validate_lottery_seed(seed)?;
    Ok(Pubkey::find_program_address(
        &[LOTTERY_SEED, seed.as_bytes()],
        program_id,
    ))
}

pub fn bundle_address(
    program_id: &Pubkey,
    seed: &str,
    funding_tx_hash: &[u8; 32],
) -> Result<(Pubkey, u8)> {
    validate_lottery_seed(seed)?;
    Ok(Pubkey::find_program_address(
        &[BUNDLE_SEED, seed.as_bytes(), funding_tx_hash.as_ref()],
        program_id,
    ))
}

/// Bundle key for a funding transfer: SHA-256 of its base58 signature string.
pub fn funding_tx_hash(signature: &str) -> [u8; 32] {
    hash(signature.as_bytes()).to_bytes()
}
