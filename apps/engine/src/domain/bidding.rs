use tracing::debug;

use crate::domain::state::{GameState, Phase, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

/// What a bidding action did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiddingOutcome {
    /// Bidding continues with this seat to act.
    Continue(PlayerId),
    /// A single bidder remains; the round moves to `KittyTake`.
    Won { winner: PlayerId, value: u16 },
    /// Everybody passed; dealer advanced and the round reset to `Deal`.
    PassedOut,
}

fn require_bidding_turn(state: &GameState, who: PlayerId) -> Result<(), DomainError> {
    if state.round.phase != Phase::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    if who != state.round.bid_turn {
        return Err(DomainError::validation(
            ValidationKind::WrongTurn,
            format!("not your turn to bid (expected {})", state.round.bid_turn),
        ));
    }
    if state.round.passed.get(who as usize).copied().unwrap_or(false) {
        return Err(DomainError::validation(
            ValidationKind::AlreadyPassed,
            "player already passed",
        ));
    }
    Ok(())
}

/// Check a bid value against the ladder and the current high bid.
pub fn validate_bid_value(state: &GameState, value: u16) -> Result<(), DomainError> {
    let rules = &state.rules;
    if value < rules.bid_min {
        return Err(DomainError::validation(
            ValidationKind::BidTooLow,
            format!("bid {value} below minimum {}", rules.bid_min),
        ));
    }
    if value > rules.max_bid {
        return Err(DomainError::validation(
            ValidationKind::BidTooHigh,
            format!("bid {value} above maximum {}", rules.max_bid),
        ));
    }
    if (value - rules.bid_min) % rules.bid_step != 0 {
        return Err(DomainError::validation(
            ValidationKind::BidWrongStep,
            format!("bid {value} not on a {} step from {}", rules.bid_step, rules.bid_min),
        ));
    }
    if value <= state.round.bid_value {
        return Err(DomainError::validation(
            ValidationKind::BidNotHigher,
            format!("bid {value} does not beat {}", state.round.bid_value),
        ));
    }
    Ok(())
}

/// Place a bid for `who`. Fully validated before any mutation.
pub fn place_bid(
    state: &mut GameState,
    who: PlayerId,
    value: u16,
) -> Result<BiddingOutcome, DomainError> {
    require_bidding_turn(state, who)?;
    validate_bid_value(state, value)?;

    state.round.bid_value = value;
    state.round.bid_winner = Some(who);
    state.round.bids[who as usize] = Some(value);
    debug!(player = who, value, "bid placed");
    Ok(advance_bidding(state))
}

/// Pass for the rest of this bidding round.
pub fn pass_bid(state: &mut GameState, who: PlayerId) -> Result<BiddingOutcome, DomainError> {
    require_bidding_turn(state, who)?;
    state.round.passed[who as usize] = true;
    debug!(player = who, "bid passed");
    Ok(advance_bidding(state))
}

fn advance_bidding(state: &mut GameState) -> BiddingOutcome {
    let players = state.rules.players;
    let active: Vec<PlayerId> = (0..players)
        .filter(|&p| !state.round.passed[p as usize])
        .collect();

    if let (1, Some(winner)) = (active.len(), state.round.bid_winner) {
        state.round.phase = Phase::KittyTake;
        debug!(winner, value = state.round.bid_value, "bidding won");
        return BiddingOutcome::Won {
            winner,
            value: state.round.bid_value,
        };
    }

    if active.is_empty() {
        state.advance_dealer();
        state.reset_round();
        debug!(dealer = state.round.dealer, "all players passed; redeal");
        return BiddingOutcome::PassedOut;
    }

    let next = (1..=players)
        .map(|i| (state.round.bid_turn + i) % players)
        .find(|&p| !state.round.passed[p as usize])
        .unwrap_or(state.round.bid_turn);
    state.round.bid_turn = next;
    BiddingOutcome::Continue(next)
}
