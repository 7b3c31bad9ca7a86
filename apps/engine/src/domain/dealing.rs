//! Deterministic deck construction, shuffling and dealing.

use tracing::debug;

use crate::domain::rules::Rules;
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{next_seat, GameState, Phase};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// One card per (suit, configured rank), suits outer, ranks in configured order.
pub fn build_deck(rules: &Rules) -> Vec<Card> {
    let mut deck = Vec::with_capacity(rules.deck_len());
    for suit in Suit::ALL {
        for &rank in &rules.deck_ranks {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Simple deterministic RNG for shuffling.
///
/// Uses a SplitMix64-style generator for good statistical properties while
/// remaining fast and deterministic given a seed.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Rejection sampling keeps the draw unbiased.
        let limit = u64::MAX - (u64::MAX % m);
        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Seeded Fisher-Yates permutation; bit-for-bit reproducible per (seed, length).
pub fn shuffle(deck: &[Card], seed: u64) -> Vec<Card> {
    let mut out = deck.to_vec();
    let mut rng = SplitMix64::new(seed);
    for i in (1..out.len()).rev() {
        let j = rng.next_range(i + 1);
        out.swap(i, j);
    }
    out
}

/// Deal a fresh round: one hand per seat in seat order, remainder to the kitty.
///
/// Resets bidding bookkeeping, enters `Bidding` with the seat after the
/// dealer to act, and bumps the deal counter. A rules set whose hand and
/// kitty sizes do not exhaust the deck is a configuration fault.
pub fn deal_round(state: &mut GameState) -> Result<(), DomainError> {
    if state.round.phase != Phase::Deal {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("cannot deal during {:?}", state.round.phase),
        ));
    }
    state.rules.check_deck_exhausted()?;

    let seed = derive_dealing_seed(state.seed, state.deals);
    let deck = shuffle(&build_deck(&state.rules), seed);
    let hand_size = usize::from(state.rules.deal_hand_size);
    let players = state.rules.players;

    let mut chunks = deck.chunks(hand_size);
    for player in state.players.iter_mut() {
        let mut hand = chunks.next().map(<[Card]>::to_vec).unwrap_or_default();
        hand.sort();
        player.hand = hand;
        player.tricks.clear();
        player.round_points = 0;
        player.marriage_points = 0;
    }
    state.round.kitty = deck[hand_size * usize::from(players)..].to_vec();

    let n = usize::from(players);
    state.round.hands_dealt = true;
    state.round.bids = vec![None; n];
    state.round.passed = vec![false; n];
    state.round.bid_winner = None;
    state.round.bid_value = 0;
    state.round.bid_turn = next_seat(state.round.dealer, players);
    state.round.trump = None;
    state.round.trick_cards.clear();
    state.round.trick_order.clear();
    state.round.declared_marriages = vec![[false; 4]; n];
    state.round.declared_aces = vec![false; n];
    state.round.leader = state.round.bid_turn;
    state.round.phase = Phase::Bidding;
    state.deals = state.deals.wrapping_add(1);

    debug!(
        deal = state.deals,
        dealer = state.round.dealer,
        first_bidder = state.round.bid_turn,
        "round dealt"
    );
    Ok(())
}
