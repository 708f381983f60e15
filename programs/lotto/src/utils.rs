use anchor_lang::prelude::*;

use crate::error::LottoError;
use crate::state::TicketBundle;

pub fn has_duplicate_keys(keys: &[Pubkey]) -> bool {
    for i in 0..keys.len() {
        for j in (i + 1)..keys.len() {
            if keys[i] == keys[j] {
                return true;
            }
        }
    }
    false
}

/// Move lamports out of a program-owned account.
/// Requires sufficient lamports in `from`.
pub fn transfer_lamports<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    lamports: u64,
) -> Result<()> {
    if lamports == 0 {
        return Ok(());
    }

    let from_balance = from
        .lamports()
        .checked_sub(lamports)
        .ok_or(LottoError::InsufficientLamports)?;
    let to_balance = to
        .lamports()
        .checked_add(lamports)
        .ok_or(LottoError::ArithmeticOverflow)?;

    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;

    Ok(())
}

/// Lamports an account holds beyond its rent-exempt minimum.
pub fn lamports_above_rent(account: &AccountInfo, rent: &Rent) -> u64 {
    account
        .lamports()
        .saturating_sub(rent.minimum_balance(account.data_len()))
}

/// A ticket bundle passed through `remaining_accounts`, followed by the
/// account of its owner.
pub struct BundleAccounts<'info> {
    pub bundle: Account<'info, TicketBundle>,
    pub owner: &'info AccountInfo<'info>,
}

/// Reads `[bundle, owner, bundle, owner, ...]` from the remaining accounts.
pub fn load_bundle_accounts<'info>(
    remaining_accounts: &'info [AccountInfo<'info>],
) -> Result<Vec<BundleAccounts<'info>>> {
    require!(
        remaining_accounts.len() % 2 == 0,
        LottoError::BundleCountMismatch
    );

    let bundle_keys: Vec<Pubkey> = remaining_accounts
        .iter()
        .step_by(2)
        .map(|info| info.key())
        .collect();
    require!(
        !has_duplicate_keys(&bundle_keys),
        LottoError::DuplicateAccount
    );

    remaining_accounts
        .chunks_exact(2)
        .map(|pair| {
            require!(pair[0].is_writable, LottoError::AccountNotWritable);
            let bundle = Account::<TicketBundle>::try_from(&pair[0])?;
            let owner = &pair[1];
            require_keys_eq!(owner.key(), bundle.owner, LottoError::OwnerMismatch);
            require!(owner.is_writable, LottoError::AccountNotWritable);
            Ok(BundleAccounts { bundle, owner })
        })
        .collect()
}

/// Snapshot of the bundle records, in remaining-accounts order.
pub fn bundle_records(accounts: &[BundleAccounts]) -> Vec<TicketBundle> {
    accounts
        .iter()
        .map(|entry| (*entry.bundle).clone())
        .collect()
}

/// Writes updated records back. Remaining accounts are not serialized by
/// Anchor on exit, so each one is flushed here.
pub fn persist_bundles(accounts: &mut [BundleAccounts], records: Vec<TicketBundle>) -> Result<()> {
    require_eq!(
        accounts.len(),
        records.len(),
        LottoError::BundleCountMismatch
    );

    for (entry, record) in accounts.iter_mut().zip(records) {
        let bundle: &mut TicketBundle = &mut entry.bundle;
        *bundle = record;
        entry.bundle.exit(&crate::ID)?;
    }

    Ok(())
}
