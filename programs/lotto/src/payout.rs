use anchor_lang::prelude::*;

use crate::constants::MAX_FEE_PERCENT;
use crate::error::LottoError;
use crate::state::{Lottery, LotteryStatus, TicketBundle};

/// How a pot is divided on a winning draw. `fee + payout` always equals the pot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PotSplit {
    pub fee: u64,
    pub payout: u64,
}

/// Floors the fee, so any rounding remainder stays with the winner.
pub fn split_pot(pot: u64, fee_percent: u8) -> Result<PotSplit> {
    require_gte!(MAX_FEE_PERCENT, fee_percent, LottoError::InvalidFee);

    let fee = (pot as u128)
        .checked_mul(fee_percent as u128)
        .ok_or(LottoError::ArithmeticOverflow)?
        .checked_div(MAX_FEE_PERCENT as u128)
        .ok_or(LottoError::ArithmeticOverflow)?;
    let fee = u64::try_from(fee).map_err(|_| error!(LottoError::ArithmeticOverflow))?;

    let payout = pot.checked_sub(fee).ok_or(LottoError::ArithmeticOverflow)?;

    Ok(PotSplit { fee, payout })
}

/// A resolved draw: who is paid and what moves where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Award {
    pub winner: Pubkey,
    pub split: PotSplit,
}

impl Lottery {
    fn ensure_closed(&self) -> Result<()> {
        match self.status {
            LotteryStatus::Closed => Ok(()),
            LotteryStatus::Open | LotteryStatus::Resolved | LotteryStatus::Refunded => {
                err!(LottoError::InvalidState)
            }
        }
    }

    fn check_unsettled_bundles(&self, lottery_key: Pubkey, bundles: &[TicketBundle]) -> Result<()> {
        for (position, bundle) in bundles.iter().enumerate() {
            require_keys_eq!(bundle.lottery, lottery_key, LottoError::KeyMismatch);
            require!(!bundle.settled, LottoError::InvalidState);
            require!(
                bundles[..position].iter().all(|other| other.index != bundle.index),
                LottoError::DuplicateAccount
            );
        }
        Ok(())
    }

    /// Pays the pot to `bundle`, which must hold `winning_code`.
    ///
    /// Fails with `NoWinner` and changes nothing when it does not. On success
    /// the bundle is settled, the pot is emptied and the lottery is
    /// `Resolved`; the remaining bundles lost and need no settlement.
    pub fn reward(
        &mut self,
        lottery_key: Pubkey,
        bundle: &mut TicketBundle,
        winning_code: u64,
    ) -> Result<Award> {
        self.ensure_closed()?;
        self.check_unsettled_bundles(lottery_key, std::slice::from_ref(bundle))?;
        require!(bundle.holds(winning_code), LottoError::NoWinner);

        let split = split_pot(self.pot, self.fee_percent)?;

        bundle.settled = true;

        self.status = LotteryStatus::Resolved;
        self.winning_code = Some(winning_code);
        self.pot = 0;
        self.unsettled_bundles = 0;

        Ok(Award {
            winner: bundle.owner,
            split,
        })
    }

    /// Returns each bundle's `amount_paid` in full, no fee withheld.
    ///
    /// `partial` refunds exactly one bundle; otherwise any batch of unsettled
    /// bundles, so large lotteries refund over several calls. The lottery
    /// stays `Closed` until the last unsettled bundle is refunded, then
    /// becomes `Refunded`. Returns the total refunded.
    pub fn refund(
        &mut self,
        lottery_key: Pubkey,
        bundles: &mut [TicketBundle],
        partial: bool,
    ) -> Result<u64> {
        self.ensure_closed()?;
        self.check_unsettled_bundles(lottery_key, bundles)?;

        if partial {
            require_eq!(bundles.len(), 1, LottoError::BundleCountMismatch);
        } else {
            // An empty batch only closes out a lottery with nothing to refund
            require!(
                !bundles.is_empty() || self.unsettled_bundles == 0,
                LottoError::BundleCountMismatch
            );
        }
        require_gte!(
            self.unsettled_bundles as usize,
            bundles.len(),
            LottoError::BundleCountMismatch
        );

        let total = bundles
            .iter()
            .try_fold(0u64, |total, bundle| total.checked_add(bundle.amount_paid))
            .ok_or(LottoError::ArithmeticOverflow)?;
        let pot = self
            .pot
            .checked_sub(total)
            .ok_or(LottoError::ArithmeticOverflow)?;
        let unsettled_bundles = self
            .unsettled_bundles
            .checked_sub(bundles.len() as u32)
            .ok_or(LottoError::ArithmeticOverflow)?;

        for bundle in bundles.iter_mut() {
            bundle.settled = true;
        }

        self.pot = pot;
        self.unsettled_bundles = unsettled_bundles;
        if unsettled_bundles == 0 {
            self.status = LotteryStatus::Refunded;
        }

        Ok(total)
    }
}
