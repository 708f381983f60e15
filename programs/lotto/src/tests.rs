//! Full lottery lifecycles run against the account structs, with the escrow
//! balance tracked alongside so lamport movements can be checked.

use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::address::{bundle_address, funding_tx_hash, lottery_address};
use crate::code::{code_to_bytes, parse_hex_code};
use crate::error::LottoError;
use crate::payout::{Award, PotSplit};
use crate::resolver::tests::FixedFeed;
use crate::resolver::{resolve_draw, winning_position};
use crate::state::{
    BundleRegistration, Configuration, Lottery, LotteryStatus, LotteryTerms, TicketBundle,
};

const SEED: &str = "ab3f9";
const TICKET_PRICE: u64 = 1_000_000;

struct Market {
    admin: Pubkey,
    configuration: Configuration,
    lottery_key: Pubkey,
    lottery: Lottery,
    /// Lamports on the lottery account above its rent-exempt minimum.
    escrow: u64,
    bundles: Vec<TicketBundle>,
    balances: HashMap<Pubkey, u64>,
}

impl Market {
    fn open(fee_percent: u8) -> Self {
        let admin = Pubkey::new_unique();
        let mut configuration = Configuration::default();
        configuration.initialize(admin, 255).unwrap();

        let (lottery_key, bump) = lottery_address(&crate::ID, SEED).unwrap();
        let mut lottery = Lottery::default();
        lottery
            .initialize(
                SEED.to_string(),
                admin,
                Pubkey::new_unique(),
                LotteryTerms {
                    ticket_price: TICKET_PRICE,
                    code_range_start: 0,
                    code_range_end: 15,
                    fee_percent,
                },
                bump,
            )
            .unwrap();
        configuration.track_lottery_created().unwrap();

        Market {
            admin,
            configuration,
            lottery_key,
            lottery,
            escrow: 0,
            bundles: Vec::new(),
            balances: HashMap::new(),
        }
    }

    /// Owner funds the escrow, then the admin registers the bundle.
    fn buy(&mut self, signature: &str, hex_codes: &[&str]) -> Result<Pubkey> {
        let owner = Pubkey::new_unique();
        let codes: Vec<u64> = hex_codes
            .iter()
            .map(|hex| parse_hex_code(hex))
            .collect::<Result<_>>()?;
        self.escrow += TICKET_PRICE * codes.len() as u64;
        self.register(signature, owner, codes)?;
        Ok(owner)
    }

    fn register(&mut self, signature: &str, owner: Pubkey, codes: Vec<u64>) -> Result<()> {
        let funding_tx_hash = funding_tx_hash(signature);
        let (_, bump) = bundle_address(&crate::ID, SEED, &funding_tx_hash)?;

        // A replayed hash resolves to the bundle already stored at that address
        let position = self
            .bundles
            .iter()
            .position(|bundle| bundle.funding_tx_hash == funding_tx_hash);
        let mut bundle = position
            .map(|position| self.bundles[position].clone())
            .unwrap_or_default();

        let available = self.escrow - self.lottery.pot;
        self.lottery.register_bundle(
            self.lottery_key,
            &mut bundle,
            BundleRegistration {
                funding_tx_hash,
                owner,
                codes,
                bump,
            },
            available,
        )?;
        self.bundles.push(bundle);
        Ok(())
    }

    fn unsettled(&self) -> Vec<TicketBundle> {
        self.bundles
            .iter()
            .filter(|bundle| !bundle.settled)
            .cloned()
            .collect()
    }

    fn store(&mut self, records: Vec<TicketBundle>) {
        for record in records {
            let slot = self
                .bundles
                .iter_mut()
                .find(|bundle| bundle.index == record.index)
                .unwrap();
            *slot = record;
        }
    }

    fn pay(&mut self, to: Pubkey, lamports: u64) {
        self.escrow -= lamports;
        *self.balances.entry(to).or_default() += lamports;
    }

    fn reward(&mut self, oracle_value: u64) -> Result<Award> {
        let draw = resolve_draw(
            &self.lottery,
            &FixedFeed(oracle_value),
            code_to_bytes(crate::resolver::derive_winning_code(oracle_value, 0, 15)?),
        )?;
        // The earliest holder is passed, or the first bundle when nobody holds the code
        let position = winning_position(&self.bundles, draw.winning_code).unwrap_or(0);
        let mut bundle = self.bundles[position].clone();
        let award = self
            .lottery
            .reward(self.lottery_key, &mut bundle, draw.winning_code)?;
        self.store(vec![bundle]);
        self.pay(self.admin, award.split.fee);
        self.pay(award.winner, award.split.payout);
        Ok(award)
    }

    fn refund(&mut self, mut records: Vec<TicketBundle>, partial: bool) -> Result<u64> {
        let total = self
            .lottery
            .refund(self.lottery_key, &mut records, partial)?;
        for record in &records {
            self.pay(record.owner, record.amount_paid);
        }
        self.store(records);
        Ok(total)
    }

    fn close_bundles(&mut self) -> Result<()> {
        for bundle in &self.bundles {
            self.lottery.close_bundle(bundle)?;
        }
        Ok(())
    }

    fn assert_pot_matches_unsettled_bundles(&self) {
        let unsettled: u64 = self
            .bundles
            .iter()
            .filter(|bundle| !bundle.settled)
            .map(|bundle| bundle.amount_paid)
            .sum();
        assert_eq!(self.lottery.pot, unsettled);
        assert_eq!(
            self.lottery.unsettled_bundles as usize,
            self.bundles.iter().filter(|bundle| !bundle.settled).count()
        );
    }
}

fn four_bundle_market() -> (Market, Vec<Pubkey>) {
    let mut market = Market::open(2);
    let owners = ["sig-0", "sig-1", "sig-3", "sig-f"]
        .iter()
        .zip(["0", "1", "3", "F"])
        .map(|(signature, code)| market.buy(signature, &[code]).unwrap())
        .collect();
    market.lottery.close_sales().unwrap();
    (market, owners)
}

#[test]
fn test_winning_draw_pays_fee_and_winner() {
    let (mut market, owners) = four_bundle_market();
    assert_eq!(market.lottery.pot, 4_000_000);
    market.assert_pot_matches_unsettled_bundles();

    let award = market.reward(875_535).unwrap();

    assert_eq!(
        award.split,
        PotSplit {
            fee: 80_000,
            payout: 3_920_000
        }
    );
    assert_eq!(award.winner, owners[3]);
    assert_eq!(market.balances[&owners[3]], 3_920_000);
    assert_eq!(market.balances[&market.admin], 80_000);
    assert_eq!(market.escrow, 0);

    assert_eq!(market.lottery.status, LotteryStatus::Resolved);
    assert_eq!(market.lottery.winning_code, Some(15));
    assert_eq!(market.lottery.pot, 0);
    assert!(market.bundles[3].settled);
    assert!(market.bundles[..3].iter().all(|bundle| !bundle.settled));
    assert_eq!(market.lottery.unsettled_bundles, 0);

    assert_eq!(
        market.lottery.ensure_reclaimable().unwrap_err(),
        LottoError::BundlesOutstanding.into()
    );
    market.close_bundles().unwrap();
    assert!(market.lottery.ensure_reclaimable().is_ok());
    market.configuration.track_lottery_reclaimed().unwrap();
    assert!(market.configuration.ensure_closable().is_ok());
}

#[test]
fn test_draw_without_match_is_refunded() {
    let (mut market, owners) = four_bundle_market();

    // 875_534 maps to code 14, which nobody bought
    let err = market.reward(875_534).unwrap_err();
    assert_eq!(err, LottoError::NoWinner.into());
    assert_eq!(market.lottery.status, LotteryStatus::Closed);
    assert_eq!(market.lottery.pot, 4_000_000);
    assert!(market.bundles.iter().all(|bundle| !bundle.settled));

    let total = market.refund(market.unsettled(), false).unwrap();

    assert_eq!(total, 4_000_000);
    for owner in &owners {
        assert_eq!(market.balances[owner], TICKET_PRICE);
    }
    assert!(!market.balances.contains_key(&market.admin));
    assert_eq!(market.escrow, 0);
    assert_eq!(market.lottery.status, LotteryStatus::Refunded);
    assert_eq!(market.lottery.winning_code, None);
    market.close_bundles().unwrap();
    assert!(market.lottery.ensure_reclaimable().is_ok());

    let err = market.reward(875_535).unwrap_err();
    assert_eq!(err, LottoError::InvalidState.into());
}

#[test]
fn test_partial_refunds_drain_pot_last() {
    let (mut market, _) = four_bundle_market();

    for step in 0..4 {
        let target = vec![market.unsettled()[0].clone()];
        assert_eq!(market.refund(target, true).unwrap(), TICKET_PRICE);
        market.assert_pot_matches_unsettled_bundles();

        if step < 3 {
            assert_eq!(market.lottery.status, LotteryStatus::Closed);
            assert_ne!(market.lottery.pot, 0);
            assert_eq!(
                market.lottery.ensure_reclaimable().unwrap_err(),
                LottoError::NonZeroPot.into()
            );
        }
    }

    assert_eq!(market.lottery.status, LotteryStatus::Refunded);
    assert_eq!(market.lottery.pot, 0);
    assert_eq!(market.escrow, 0);
}

#[test]
fn test_each_funding_transfer_registers_once() {
    let mut market = Market::open(2);

    for code in 0..=15u64 {
        let signature = format!("funding-{}", code);
        let owner = Pubkey::new_unique();
        market.escrow += TICKET_PRICE;
        market.register(&signature, owner, vec![code]).unwrap();

        market.escrow += TICKET_PRICE;
        let err = market
            .register(&signature, owner, vec![code])
            .unwrap_err();
        assert_eq!(err, LottoError::DuplicateBundle.into());
        market.escrow -= TICKET_PRICE;
    }

    assert_eq!(market.lottery.bundle_count, 16);
    assert_eq!(market.lottery.pot, 16 * TICKET_PRICE);
    market.assert_pot_matches_unsettled_bundles();
}

#[test]
fn test_registration_needs_funding_and_open_sales() {
    let mut market = Market::open(2);

    let err = market
        .register("unfunded", Pubkey::new_unique(), vec![1])
        .unwrap_err();
    assert_eq!(err, LottoError::Underfunded.into());

    let err = market.buy("too-high", &["10"]).unwrap_err();
    assert_eq!(err, LottoError::CodeOutOfRange.into());

    market.lottery.close_sales().unwrap();
    let err = market.buy("late", &["1"]).unwrap_err();
    assert_eq!(err, LottoError::LotterySalesClosed.into());

    assert_eq!(market.lottery.pot, 0);
    assert!(market.bundles.is_empty());
}

#[test]
fn test_earliest_bundle_wins_shared_code() {
    let mut market = Market::open(10);
    let first = market.buy("first", &["F", "2"]).unwrap();
    let second = market.buy("second", &["F"]).unwrap();
    market.lottery.close_sales().unwrap();

    let mut records = market.unsettled();
    records.reverse();
    let position = winning_position(&records, 15).unwrap();
    assert_eq!(records[position].owner, first);

    let award = market
        .lottery
        .reward(market.lottery_key, &mut records[position], 15)
        .unwrap();

    assert_eq!(award.winner, first);
    assert_ne!(award.winner, second);
    assert_eq!(
        award.split,
        PotSplit {
            fee: 300_000,
            payout: 2_700_000
        }
    );
}

#[test]
fn test_configuration_outlives_its_lotteries() {
    let (mut market, _) = four_bundle_market();

    assert_eq!(
        market.configuration.ensure_closable().unwrap_err(),
        LottoError::LotteriesOutstanding.into()
    );

    market.reward(875_535).unwrap();
    market.close_bundles().unwrap();
    market.lottery.ensure_reclaimable().unwrap();
    market.configuration.track_lottery_reclaimed().unwrap();

    assert!(market.configuration.ensure_closable().is_ok());
}

fn crowded_market(bundle_count: u64) -> Market {
    let mut market = Market::open(2);
    for position in 0..bundle_count {
        let code = format!("{:X}", position % 16);
        market
            .buy(&format!("crowd-{}", position), &[code.as_str()])
            .unwrap();
    }
    market.lottery.close_sales().unwrap();
    market
}

#[test]
fn test_crowded_lottery_pays_a_single_bundle() {
    let mut market = crowded_market(64);
    assert_eq!(market.lottery.pot, 64 * TICKET_PRICE);

    let award = market.reward(875_535).unwrap();

    // Bundles 15, 31, 47 and 63 all hold code F; the first registered wins
    assert_eq!(award.winner, market.bundles[15].owner);
    assert_eq!(award.split.fee, 1_280_000);
    assert_eq!(award.split.payout, 62_720_000);
    assert_eq!(market.escrow, 0);
    assert_eq!(market.bundles.iter().filter(|bundle| bundle.settled).count(), 1);

    market.close_bundles().unwrap();
    assert_eq!(market.lottery.live_bundles, 0);
    assert!(market.lottery.ensure_reclaimable().is_ok());
}

#[test]
fn test_crowded_lottery_refunds_in_batches() {
    let mut market = crowded_market(64);

    let err = market.close_bundles().unwrap_err();
    assert_eq!(err, LottoError::BundleNotSettled.into());

    let mut batches = 0;
    while market.lottery.status == LotteryStatus::Closed {
        let batch: Vec<TicketBundle> = market.unsettled().into_iter().take(10).collect();
        let total = market.refund(batch.clone(), false).unwrap();
        assert_eq!(total, batch.len() as u64 * TICKET_PRICE);
        market.assert_pot_matches_unsettled_bundles();
        batches += 1;
    }

    assert_eq!(batches, 7);
    assert_eq!(market.lottery.status, LotteryStatus::Refunded);
    assert_eq!(market.escrow, 0);
    assert!(market.bundles.iter().all(|bundle| market.balances[&bundle.owner] == TICKET_PRICE));

    market.close_bundles().unwrap();
    assert!(market.lottery.ensure_reclaimable().is_ok());
}

#[cfg(not(feature = "no-entrypoint"))]
#[test]
fn test_security_txt_names_the_program() {
    use solana_security_txt::{SECURITY_TXT_BEGIN, SECURITY_TXT_END};

    assert!(crate::SECURITY_TXT.starts_with(SECURITY_TXT_BEGIN));
    assert!(crate::SECURITY_TXT.contains("name\0lotto\0"));
    assert!(crate::SECURITY_TXT.ends_with(SECURITY_TXT_END));
}
