use tracing::{debug, info};

use crate::domain::cards_logic::holds_all_aces;
use crate::domain::legality::{best_card, can_declare_marriage, legal_cards, rospis_allowed};
use crate::domain::rules::ACE_MARRIAGE_VALUE;
use crate::domain::scoring::score_round;
use crate::domain::state::{opponents_of, GameState, Phase, PlayerId, RoundEffects};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Marriage declared with this card, if any.
    pub marriage: Option<Suit>,
    /// Whether this card completed the four-aces bonus.
    pub aces_declared: bool,
    /// Winner of the trick this card completed, if it completed one.
    pub trick_winner: Option<PlayerId>,
    /// Whether the round ran out of cards and was scored.
    pub round_scored: bool,
}

/// Winner of a trick given the seat order and the cards in that order.
///
/// The lead suit is the first card's suit. Returns `None` for an empty or
/// mismatched trick.
pub fn trick_winner(order: &[PlayerId], cards: &[Card], trump: Option<Suit>) -> Option<PlayerId> {
    if cards.is_empty() || order.len() < cards.len() {
        return None;
    }
    let best = best_card(cards, trump)?;
    let idx = cards.iter().position(|&c| c == best)?;
    order.get(idx).copied()
}

/// Play a card into the current trick, enforcing turn, legality and
/// marriage preconditions before touching state.
pub fn play_card(
    state: &mut GameState,
    who: PlayerId,
    card: Card,
    marriage: Option<Suit>,
) -> Result<PlayCardResult, DomainError> {
    if state.round.phase != Phase::PlayTricks {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }

    let order = state.trick_order();
    let expected = order.get(state.round.trick_cards.len()).copied();
    if expected != Some(who) {
        return Err(DomainError::validation(
            ValidationKind::WrongTurn,
            format!("not your turn to play (expected {expected:?})"),
        ));
    }

    let idx = who as usize;
    let Some(pos) = state.players[idx].hand.iter().position(|&c| c == card) else {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("{card} not in hand"),
        ));
    };
    if !legal_cards(state, who).contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::IllegalCardPlay,
            format!("{card} may not be played now"),
        ));
    }
    if let Some(suit) = marriage {
        validate_marriage(state, who, card, suit)?;
    }

    let mut result = PlayCardResult {
        marriage,
        aces_declared: false,
        trick_winner: None,
        round_scored: false,
    };

    if let Some(suit) = marriage {
        let value = suit.marriage_value();
        let ps = &mut state.players[idx];
        ps.marriage_points += value;
        ps.round_points += value;
        state.round.declared_marriages[idx][suit.index()] = true;
        state.round.trump = Some(suit);
        debug!(player = who, ?suit, value, "marriage declared; trump set");
    }

    if state.rules.ace_marriage_enabled
        && card.rank == Rank::Ace
        && !state.round.declared_aces[idx]
        && holds_all_aces(&state.players[idx].hand)
    {
        let ps = &mut state.players[idx];
        ps.marriage_points += ACE_MARRIAGE_VALUE;
        ps.round_points += ACE_MARRIAGE_VALUE;
        state.round.declared_aces[idx] = true;
        result.aces_declared = true;
        debug!(player = who, "four aces declared");
    }

    state.players[idx].hand.remove(pos);
    if state.round.trick_cards.is_empty() {
        state.round.trick_order = order;
    }
    state.round.trick_cards.push(card);

    if state.round.trick_cards.len() < usize::from(state.rules.players) {
        return Ok(result);
    }

    let winner = trick_winner(
        &state.round.trick_order,
        &state.round.trick_cards,
        state.round.trump,
    )
    .ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvariantViolated,
            "completed trick has no winner",
        )
    })?;
    let trick = std::mem::take(&mut state.round.trick_cards);
    state.round.trick_order.clear();
    debug!(winner, ?trick, "trick won");
    state.players[winner as usize].tricks.push(trick);
    state.round.leader = winner;
    result.trick_winner = Some(winner);

    if state.players[winner as usize].hand.is_empty() {
        state.round.phase = Phase::ScoreRound;
        score_round(state);
        result.round_scored = true;
    }
    Ok(result)
}

fn validate_marriage(
    state: &GameState,
    who: PlayerId,
    card: Card,
    suit: Suit,
) -> Result<(), DomainError> {
    if card.suit != suit || !matches!(card.rank, Rank::Queen | Rank::King) {
        return Err(DomainError::validation(
            ValidationKind::IllegalCardPlay,
            format!("{card} cannot carry a {suit:?} marriage"),
        ));
    }
    if state.round.declared_marriages[who as usize][suit.index()] {
        return Err(DomainError::validation(
            ValidationKind::MarriageAlreadyDeclared,
            format!("{suit:?} marriage already declared"),
        ));
    }
    if !can_declare_marriage(state, who, card) {
        return Err(DomainError::validation(
            ValidationKind::MarriagePreconditionUnmet,
            format!("{suit:?} marriage needs the pair in hand and a won trick"),
        ));
    }
    Ok(())
}

/// Contract holder renounces before the first card: pays the bid, each
/// opponent gains half of it (integer division), and the round is redealt.
pub fn declare_rospis(state: &mut GameState, who: PlayerId) -> Result<u16, DomainError> {
    if state.round.phase != Phase::PlayTricks {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }
    if state.round.bid_winner != Some(who) {
        return Err(DomainError::validation(
            ValidationKind::NotContractHolder,
            format!("player {who} does not hold the contract"),
        ));
    }
    if !rospis_allowed(state, who) {
        return Err(DomainError::validation(
            ValidationKind::RospisAfterPlayStarted,
            "rospis is only possible before the first card",
        ));
    }

    let bid = state.round.bid_value;
    let half = i32::from(bid) / 2;
    state.players[who as usize].game_score -= i32::from(bid);
    for opp in opponents_of(who, state.rules.players) {
        state.players[opp as usize].game_score += half;
    }
    state.last_round_points = vec![0; usize::from(state.rules.players)];
    state.last_round_effects = RoundEffects {
        renounced: Some(who),
        ..Default::default()
    };
    info!(player = who, bid, "rospis declared");

    state.advance_dealer();
    state.reset_round();
    Ok(bid)
}
