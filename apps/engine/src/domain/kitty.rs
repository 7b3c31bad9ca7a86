//! Kitty pickup and snos (discard-and-redistribute) for the contract holder.

use tracing::debug;

use crate::domain::state::{opponents_of, GameState, Phase, PlayerId};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

fn require_contract_holder(
    state: &GameState,
    who: PlayerId,
    phase: Phase,
) -> Result<(), DomainError> {
    if state.round.phase != phase {
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
    Ok(())
}

/// Move the kitty into the contract holder's hand and enter `Snos`.
pub fn take_kitty(state: &mut GameState, who: PlayerId) -> Result<(), DomainError> {
    require_contract_holder(state, who, Phase::KittyTake)?;

    let kitty = std::mem::take(&mut state.round.kitty);
    let hand = &mut state.players[who as usize].hand;
    hand.extend(kitty);
    hand.sort();
    state.round.phase = Phase::Snos;
    debug!(player = who, hand = hand.len(), "kitty taken");
    Ok(())
}

/// Cards handed to each opponent by a snos, in seat order after the bidder.
pub type SnosTransfers = Vec<(PlayerId, Card)>;

/// Remove `cards` from the bidder and deal them one each to the opponents
/// in seat order after the bidder. Opponents beyond the discard count get
/// nothing. Resulting hand sizes must all equal the play hand size.
pub fn make_snos(
    state: &mut GameState,
    who: PlayerId,
    cards: &[Card],
) -> Result<SnosTransfers, DomainError> {
    require_contract_holder(state, who, Phase::Snos)?;

    let rules = &state.rules;
    if cards.len() != usize::from(rules.snos_cards) {
        return Err(DomainError::validation(
            ValidationKind::DiscardCountMismatch,
            format!(
                "snos requires exactly {} cards, got {}",
                rules.snos_cards,
                cards.len()
            ),
        ));
    }

    let opponents = usize::from(rules.players.saturating_sub(1));
    if cards.len() > opponents {
        return Err(DomainError::validation(
            ValidationKind::DiscardCountMismatch,
            format!(
                "snos of {} cards exceeds the {opponents} opponents",
                cards.len()
            ),
        ));
    }

    // Work on a copy so a rejected snos leaves the hand untouched.
    let mut bidder_hand = state.players[who as usize].hand.clone();
    for card in cards {
        let Some(pos) = bidder_hand.iter().position(|c| c == card) else {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("snos card {card} not in hand"),
            ));
        };
        bidder_hand.remove(pos);
    }

    let transfers: SnosTransfers = opponents_of(who, rules.players)
        .zip(cards.iter().copied())
        .collect();

    let play_size = usize::from(rules.play_hand_size);
    if bidder_hand.len() != play_size {
        return Err(DomainError::validation(
            ValidationKind::HandSizeMismatch,
            format!(
                "bidder would hold {} cards, expected {play_size}",
                bidder_hand.len()
            ),
        ));
    }
    for opp in opponents_of(who, rules.players) {
        let gained = transfers.iter().filter(|(p, _)| *p == opp).count();
        let size = state.players[opp as usize].hand.len() + gained;
        if size != play_size {
            return Err(DomainError::validation(
                ValidationKind::HandSizeMismatch,
                format!("player {opp} would hold {size} cards, expected {play_size}"),
            ));
        }
    }

    state.players[who as usize].hand = bidder_hand;
    for &(opp, card) in &transfers {
        let hand = &mut state.players[opp as usize].hand;
        hand.push(card);
        hand.sort();
    }
    state.round.phase = Phase::PlayTricks;
    state.round.leader = who;
    state.round.trick_cards.clear();
    state.round.trick_order.clear();
    debug!(player = who, ?transfers, "snos made");
    Ok(transfers)
}
