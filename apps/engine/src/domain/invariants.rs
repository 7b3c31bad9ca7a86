//! Structural checks over a `GameState`, used by the self-play driver and tests.

use std::collections::HashSet;

use crate::domain::state::{GameState, Phase};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

fn violated(detail: String) -> DomainError {
    DomainError::validation(ValidationKind::InvariantViolated, detail)
}

/// Every card that is currently somewhere on the table.
pub fn cards_in_play(state: &GameState) -> Vec<Card> {
    let mut all: Vec<Card> = Vec::with_capacity(state.rules.deck_len());
    for p in &state.players {
        all.extend(p.hand.iter().copied());
        for t in &p.tricks {
            all.extend(t.iter().copied());
        }
    }
    all.extend(state.round.kitty.iter().copied());
    all.extend(state.round.trick_cards.iter().copied());
    all
}

/// Conservation, uniqueness, trick size and per-phase hand sizes.
///
/// Before the deal (`Deal`) every location is empty.
pub fn check_invariants(state: &GameState) -> Result<(), DomainError> {
    let rules = &state.rules;
    let players = usize::from(rules.players);
    let all = cards_in_play(state);

    if state.round.phase == Phase::Deal {
        if !all.is_empty() {
            return Err(violated(format!(
                "{} cards on the table before the deal",
                all.len()
            )));
        }
        return Ok(());
    }

    if all.len() != rules.deck_len() {
        return Err(violated(format!(
            "card count {} != deck size {}",
            all.len(),
            rules.deck_len()
        )));
    }
    let mut seen = HashSet::with_capacity(all.len());
    for c in &all {
        if !seen.insert(*c) {
            return Err(violated(format!("duplicate card {c}")));
        }
    }
    if state.round.trick_cards.len() >= players {
        return Err(violated(format!(
            "trick holds {} cards with {players} players",
            state.round.trick_cards.len()
        )));
    }
    for p in &state.players {
        if let Some(t) = p.tricks.iter().find(|t| t.len() != players) {
            return Err(violated(format!(
                "player {} won a trick of {} cards",
                p.id,
                t.len()
            )));
        }
    }

    let deal = usize::from(rules.deal_hand_size);
    let bidder = state.round.bid_winner.map(usize::from);
    match state.round.phase {
        Phase::Bidding | Phase::KittyTake => {
            for p in &state.players {
                expect_hand(p.id, p.hand.len(), deal)?;
            }
        }
        Phase::Snos => {
            for p in &state.players {
                let want = if Some(usize::from(p.id)) == bidder {
                    deal + usize::from(rules.kitty_size)
                } else {
                    deal
                };
                expect_hand(p.id, p.hand.len(), want)?;
            }
        }
        Phase::PlayTricks => {
            // Each player holds the play size minus their plays so far.
            let tricks_done: usize = state.players.iter().map(|p| p.tricks.len()).sum();
            let order = state.trick_order();
            for p in &state.players {
                let played_now = order
                    .iter()
                    .take(state.round.trick_cards.len())
                    .any(|&s| s == p.id);
                let want = usize::from(rules.play_hand_size)
                    .saturating_sub(tricks_done + usize::from(played_now));
                expect_hand(p.id, p.hand.len(), want)?;
            }
        }
        Phase::Deal | Phase::ScoreRound | Phase::GameOver => {}
    }

    let r = &state.round;
    if r.bids.len() != players
        || r.passed.len() != players
        || r.declared_marriages.len() != players
        || r.declared_aces.len() != players
    {
        return Err(violated("per-seat bookkeeping not sized to the table".into()));
    }
    if let Some(b) = r.bids.iter().flatten().find(|&&b| b > r.bid_value) {
        return Err(violated(format!("bid {b} above the high bid {}", r.bid_value)));
    }
    Ok(())
}

fn expect_hand(player: u8, got: usize, want: usize) -> Result<(), DomainError> {
    if got != want {
        return Err(violated(format!(
            "player {player} holds {got} cards, expected {want}"
        )));
    }
    Ok(())
}
