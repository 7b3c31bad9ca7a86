//! Heuristic: a deterministic baseline that plays noticeably better than
//! random.
//!
//! Bidding:
//! - Estimate round points from card points, held marriages and long suits.
//! - Bid that estimate rounded down to the ladder, or pass if it does not
//!   beat the standing bid.
//!
//! Play:
//! - Declare the most valuable marriage on offer.
//! - On lead, cash the heaviest card.
//! - Otherwise win as cheaply as possible, or throw the lightest card.
//!
//! No randomness is used; `seed` is accepted so every bot shares one
//! constructor shape.

use super::hand_eval::{affordable_bid, card_weight, hand_estimate, plays, snos_discards};
use super::trait_def::{AiError, AiPlayer};
use crate::domain::legality::{best_card, legal_actions};
use crate::domain::state::{GameState, PlayerId, PlayerState};
use crate::domain::{Action, Card};

#[derive(Debug, Clone, Default)]
pub struct HeuristicPlayer {
    /// Points shaved off the hand estimate before bidding.
    bid_margin: i32,
}

impl HeuristicPlayer {
    pub const NAME: &'static str = "normal";

    pub fn new(bid_margin: i32) -> Self {
        Self { bid_margin }
    }

    fn seat<'a>(state: &'a GameState, me: PlayerId) -> Result<&'a PlayerState, AiError> {
        state
            .players
            .get(me as usize)
            .ok_or_else(|| AiError::Internal(format!("no seat {me}")))
    }

    fn lightest(cards: impl Iterator<Item = Card>) -> Option<Card> {
        cards.min_by_key(|&c| card_weight(c))
    }
}

impl AiPlayer for HeuristicPlayer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_bid(&self, state: &GameState, me: PlayerId) -> Result<Action, AiError> {
        let legal = legal_actions(state, me);
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal bids available".into()));
        }
        let hand = &Self::seat(state, me)?.hand;
        let estimate = hand_estimate(hand) - self.bid_margin;
        let choice = match affordable_bid(&state.rules, estimate) {
            Some(value) if value > state.round.bid_value => Action::Bid(value),
            _ => Action::Pass,
        };
        if legal.contains(&choice) {
            Ok(choice)
        } else {
            Ok(Action::Pass)
        }
    }

    fn choose_snos(&self, state: &GameState, me: PlayerId) -> Result<Vec<Card>, AiError> {
        let hand = &Self::seat(state, me)?.hand;
        Ok(snos_discards(hand, state.rules.snos_cards as usize))
    }

    fn choose_play(&self, state: &GameState, me: PlayerId) -> Result<Action, AiError> {
        let legal = legal_actions(state, me);
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }

        if let Some((card, suit)) = plays(&legal)
            .filter_map(|(card, m)| m.map(|suit| (card, suit)))
            .max_by_key(|(_, suit)| suit.marriage_value())
        {
            return Ok(Action::play_with_marriage(card, suit));
        }

        let candidates: Vec<Card> = plays(&legal)
            .filter(|(_, m)| m.is_none())
            .map(|(card, _)| card)
            .collect();
        let trick = &state.round.trick_cards;

        let choice = if trick.is_empty() {
            candidates.iter().copied().max_by_key(|&c| card_weight(c))
        } else {
            let winners = candidates.iter().copied().filter(|&c| {
                let mut after = trick.clone();
                after.push(c);
                best_card(&after, state.round.trump) == Some(c)
            });
            winners
                .min_by_key(|&c| (c.rank.strength(), card_weight(c)))
                .or_else(|| Self::lightest(candidates.iter().copied()))
        };

        choice
            .map(Action::play)
            .ok_or_else(|| AiError::InvalidMove("No playable card".into()))
    }
}
