use anchor_lang::prelude::*;

use crate::address::validate_lottery_seed;
use crate::constants::{MAX_CODES_PER_BUNDLE, MAX_FEE_PERCENT};
use crate::error::LottoError;

#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Global admin of the lottery program.
    /// Every lottery and bundle operation is signed by this key.
    pub admin: Pubkey,

    /// Number of lottery instances created and not yet reclaimed.
    /// The configuration can only be closed once this drops to zero.
    pub lottery_count: u32,
}

impl Configuration {
    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    pub fn initialize(&mut self, admin: Pubkey, bump: u8) -> Result<()> {
        require!(!self.is_initialized(), LottoError::AlreadyInitialized);

        self.bump = bump;
        self.admin = admin;
        self.lottery_count = 0;

        Ok(())
    }

    pub fn track_lottery_created(&mut self) -> Result<()> {
        self.lottery_count = self
            .lottery_count
            .checked_add(1)
            .ok_or(LottoError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn track_lottery_reclaimed(&mut self) -> Result<()> {
        self.lottery_count = self
            .lottery_count
            .checked_sub(1)
            .ok_or(LottoError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn ensure_closable(&self) -> Result<()> {
        require_eq!(self.lottery_count, 0, LottoError::LotteriesOutstanding);
        Ok(())
    }
}

/// Lifecycle of a lottery. Transitions only move forward:
/// `Open -> Closed -> Resolved | Refunded`.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LotteryStatus {
    /// Accepting ticket bundles.
    #[default]
    Open,
    /// Sales stopped, waiting for the draw or a refund.
    Closed,
    /// Winner paid out.
    Resolved,
    /// Every bundle refunded.
    Refunded,
}

/// Price and code range a lottery is created with.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LotteryTerms {
    pub ticket_price: u64,
    pub code_range_start: u64,
    pub code_range_end: u64,
    pub fee_percent: u8,
}

impl LotteryTerms {
    pub fn validate(&self) -> Result<()> {
        require_gte!(
            self.code_range_end,
            self.code_range_start,
            LottoError::InvalidRange
        );
        require_gte!(MAX_FEE_PERCENT, self.fee_percent, LottoError::InvalidFee);
        require_gt!(self.ticket_price, 0, LottoError::InvalidPrice);
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Seed the lottery address is derived from.
    #[max_len(32)]
    pub seed: String,

    /// Admin that created the lottery, copied from the configuration.
    pub admin: Pubkey,

    /// Switchboard feed whose value decides the winning code.
    pub oracle: Pubkey,

    /// Lamports charged per ticket code.
    pub ticket_price: u64,

    /// First valid ticket code (inclusive).
    pub code_range_start: u64,

    /// Last valid ticket code (inclusive).
    pub code_range_end: u64,

    /// Share of the pot kept by the admin on a winning payout, 0 to 100.
    pub fee_percent: u8,

    /// Current lifecycle state.
    pub status: LotteryStatus,

    /// Lamports escrowed for registered, unsettled bundles.
    /// The lamports themselves sit on this account above its rent-exempt minimum.
    pub pot: u64,

    /// Code derived from the oracle once the lottery is resolved.
    pub winning_code: Option<u64>,

    /// Bundles registered so far; the next bundle's registration index.
    pub bundle_count: u32,

    /// Bundles not yet paid out or refunded. Zero once the lottery is resolved.
    pub unsettled_bundles: u32,

    /// Bundle accounts not yet closed. The lottery is reclaimed last.
    pub live_bundles: u32,
}

/// A bundle purchase submitted by the admin on behalf of `owner`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleRegistration {
    pub funding_tx_hash: [u8; 32],
    pub owner: Pubkey,
    pub codes: Vec<u64>,
    pub bump: u8,
}

impl Lottery {
    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    pub fn initialize(
        &mut self,
        seed: String,
        admin: Pubkey,
        oracle: Pubkey,
        terms: LotteryTerms,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_initialized(), LottoError::AlreadyInitialized);
        validate_lottery_seed(&seed)?;
        terms.validate()?;

        *self = Lottery {
            bump,
            seed,
            admin,
            oracle,
            ticket_price: terms.ticket_price,
            code_range_start: terms.code_range_start,
            code_range_end: terms.code_range_end,
            fee_percent: terms.fee_percent,
            status: LotteryStatus::Open,
            pot: 0,
            winning_code: None,
            bundle_count: 0,
            unsettled_bundles: 0,
            live_bundles: 0,
        };

        Ok(())
    }

    pub fn code_in_range(&self, code: u64) -> bool {
        (self.code_range_start..=self.code_range_end).contains(&code)
    }

    /// Stops ticket sales.
    pub fn close_sales(&mut self) -> Result<()> {
        match self.status {
            LotteryStatus::Open => {
                self.status = LotteryStatus::Closed;
                Ok(())
            }
            LotteryStatus::Closed | LotteryStatus::Resolved | LotteryStatus::Refunded => {
                err!(LottoError::InvalidState)
            }
        }
    }

    /// Validates a bundle purchase against this lottery and writes it into
    /// `bundle`, growing the pot by `ticket_price * codes.len()`.
    ///
    /// `escrow_available` is what the escrow holds beyond its rent-exempt
    /// minimum and the current pot, i.e. funding not yet claimed by a bundle.
    pub fn register_bundle(
        &mut self,
        lottery_key: Pubkey,
        bundle: &mut TicketBundle,
        registration: BundleRegistration,
        escrow_available: u64,
    ) -> Result<()> {
        match self.status {
            LotteryStatus::Open => {}
            LotteryStatus::Closed | LotteryStatus::Resolved | LotteryStatus::Refunded => {
                return err!(LottoError::LotterySalesClosed);
            }
        }

        let BundleRegistration {
            funding_tx_hash,
            owner,
            codes,
            bump,
        } = registration;

        require!(!codes.is_empty(), LottoError::EmptyBundle);
        require_gte!(MAX_CODES_PER_BUNDLE, codes.len(), LottoError::BundleFull);
        require!(
            codes.iter().all(|code| self.code_in_range(*code)),
            LottoError::CodeOutOfRange
        );
        require!(!bundle.is_initialized(), LottoError::DuplicateBundle);

        let amount_paid = self
            .ticket_price
            .checked_mul(codes.len() as u64)
            .ok_or(LottoError::ArithmeticOverflow)?;
        require_gte!(escrow_available, amount_paid, LottoError::Underfunded);

        let pot = self
            .pot
            .checked_add(amount_paid)
            .ok_or(LottoError::ArithmeticOverflow)?;
        let bundle_count = self
            .bundle_count
            .checked_add(1)
            .ok_or(LottoError::ArithmeticOverflow)?;
        let unsettled_bundles = self
            .unsettled_bundles
            .checked_add(1)
            .ok_or(LottoError::ArithmeticOverflow)?;
        let live_bundles = self
            .live_bundles
            .checked_add(1)
            .ok_or(LottoError::ArithmeticOverflow)?;

        *bundle = TicketBundle {
            bump,
            lottery: lottery_key,
            lottery_seed: self.seed.clone(),
            funding_tx_hash,
            owner,
            index: self.bundle_count,
            codes,
            amount_paid,
            settled: false,
        };

        self.pot = pot;
        self.bundle_count = bundle_count;
        self.unsettled_bundles = unsettled_bundles;
        self.live_bundles = live_bundles;

        Ok(())
    }

    /// Releases a bundle account of this lottery.
    pub fn close_bundle(&mut self, bundle: &TicketBundle) -> Result<()> {
        bundle.ensure_closable(self.status)?;
        self.live_bundles = self
            .live_bundles
            .checked_sub(1)
            .ok_or(LottoError::ArithmeticOverflow)?;
        Ok(())
    }

    /// The record may be reclaimed once the draw or refund has emptied the pot
    /// and every bundle account is closed.
    pub fn ensure_reclaimable(&self) -> Result<()> {
        require_eq!(self.pot, 0, LottoError::NonZeroPot);
        match self.status {
            LotteryStatus::Resolved | LotteryStatus::Refunded => {}
            LotteryStatus::Open | LotteryStatus::Closed => return err!(LottoError::InvalidState),
        }
        require_eq!(self.live_bundles, 0, LottoError::BundlesOutstanding);
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct TicketBundle {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Lottery this bundle belongs to.
    pub lottery: Pubkey,

    /// Seed of that lottery, kept so the bundle address can be re-derived.
    #[max_len(32)]
    pub lottery_seed: String,

    /// SHA-256 of the funding transaction signature; the bundle's address seed.
    pub funding_tx_hash: [u8; 32],

    /// The owner of all the tickets in this bundle.
    pub owner: Pubkey,

    /// Registration order within the lottery, starting at zero.
    pub index: u32,

    /// Purchased ticket codes.
    #[max_len(100)]
    pub codes: Vec<u64>,

    /// Lamports paid for the codes, `ticket_price * codes.len()`.
    pub amount_paid: u64,

    /// Set once the bundle has been paid out or refunded.
    pub settled: bool,
}

impl TicketBundle {
    pub fn is_initialized(&self) -> bool {
        self.lottery != Pubkey::default()
    }

    pub fn holds(&self, code: u64) -> bool {
        self.codes.contains(&code)
    }

    /// Losing bundles of a resolved lottery close without being settled.
    pub fn ensure_closable(&self, lottery_status: LotteryStatus) -> Result<()> {
        match lottery_status {
            LotteryStatus::Resolved => Ok(()),
            LotteryStatus::Open | LotteryStatus::Closed | LotteryStatus::Refunded => {
                require!(self.settled, LottoError::BundleNotSettled);
                Ok(())
            }
        }
    }
}
