//! Pure legality queries: whose turn it is and what they may do.

use crate::domain::actions::Action;
use crate::domain::cards_logic::{card_beats, hand_has_suit, holds_marriage};
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::domain::{Card, Rank, Suit};

/// The seat expected to act, or `None` when nobody is (Deal, ScoreRound,
/// GameOver, or a trick order that is already exhausted).
pub fn current_player(state: &GameState) -> Option<PlayerId> {
    match state.round.phase {
        Phase::Bidding => Some(state.round.bid_turn),
        Phase::KittyTake | Phase::Snos => state.round.bid_winner,
        Phase::PlayTricks => state
            .trick_order()
            .get(state.round.trick_cards.len())
            .copied(),
        Phase::Deal | Phase::ScoreRound | Phase::GameOver => None,
    }
}

/// Every action `player` may take right now. Empty when it is not their turn.
///
/// During `Snos` a single `Snos(vec![])` placeholder is returned; the
/// concrete discard set is chosen by the caller.
pub fn legal_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    match state.round.phase {
        Phase::Bidding => legal_bids(state, player),
        Phase::KittyTake if state.round.bid_winner == Some(player) => vec![Action::TakeKitty],
        Phase::Snos if state.round.bid_winner == Some(player) => vec![Action::Snos(Vec::new())],
        Phase::PlayTricks => legal_plays(state, player),
        _ => Vec::new(),
    }
}

fn legal_bids(state: &GameState, player: PlayerId) -> Vec<Action> {
    let r = &state.round;
    if player != r.bid_turn || r.passed.get(player as usize).copied().unwrap_or(true) {
        return Vec::new();
    }
    let mut out = vec![Action::Pass];
    out.extend(
        state
            .rules
            .bid_ladder()
            .filter(|&b| b > r.bid_value)
            .map(Action::Bid),
    );
    out
}

fn legal_plays(state: &GameState, player: PlayerId) -> Vec<Action> {
    if current_player(state) != Some(player) {
        return Vec::new();
    }
    let mut out = Vec::new();
    for card in legal_cards(state, player) {
        out.push(Action::play(card));
        if can_declare_marriage(state, player, card) {
            out.push(Action::play_with_marriage(card, card.suit));
        }
    }
    if rospis_allowed(state, player) {
        out.push(Action::Rospis);
    }
    out
}

/// Cards `player` may play into the current trick, independent of turn.
///
/// Suit following comes first; a player void in the led suit may be forced
/// to trump (and to beat a trump already in the trick) when the rules say so.
pub fn legal_cards(state: &GameState, player: PlayerId) -> Vec<Card> {
    if state.round.phase != Phase::PlayTricks {
        return Vec::new();
    }
    let Some(ps) = state.players.get(player as usize) else {
        return Vec::new();
    };
    let hand = &ps.hand;
    let Some(lead_card) = state.round.trick_cards.first().copied() else {
        return hand.clone();
    };
    let lead = lead_card.suit;
    let rules = &state.rules;

    if rules.must_follow_suit && hand_has_suit(hand, lead) {
        return hand.iter().copied().filter(|c| c.suit == lead).collect();
    }

    if let Some(trump) = state.round.trump {
        if rules.must_trump_if_void && !hand_has_suit(hand, lead) && hand_has_suit(hand, trump) {
            let trumps: Vec<Card> = hand.iter().copied().filter(|c| c.suit == trump).collect();
            if rules.must_over_trump {
                if let Some(best) = best_card(&state.round.trick_cards, state.round.trump) {
                    if best.suit == trump {
                        let over: Vec<Card> = trumps
                            .iter()
                            .copied()
                            .filter(|&c| card_beats(c, best, lead, Some(trump)))
                            .collect();
                        if !over.is_empty() {
                            return over;
                        }
                    }
                }
            }
            return trumps;
        }
    }

    hand.clone()
}

/// Whether playing `card` may carry a marriage declaration for its suit.
pub fn can_declare_marriage(state: &GameState, player: PlayerId, card: Card) -> bool {
    if !matches!(card.rank, Rank::Queen | Rank::King) {
        return false;
    }
    let idx = player as usize;
    let Some(ps) = state.players.get(idx) else {
        return false;
    };
    let declared = state
        .round
        .declared_marriages
        .get(idx)
        .is_some_and(|d| d[card.suit.index()]);
    holds_marriage(&ps.hand, card.suit)
        && !declared
        && (!state.rules.marriage_requires_trick || !ps.tricks.is_empty())
}

/// Rospis is open to the contract holder until the first card of the round.
pub fn rospis_allowed(state: &GameState, player: PlayerId) -> bool {
    state.round.phase == Phase::PlayTricks
        && state.round.bid_winner == Some(player)
        && !state.play_started()
}

/// Best card of a partial or complete trick under the given trump.
pub fn best_card(cards: &[Card], trump: Option<Suit>) -> Option<Card> {
    let (&first, rest) = cards.split_first()?;
    let lead = first.suit;
    Some(rest.iter().fold(first, |best, &c| {
        if card_beats(c, best, lead, trump) {
            c
        } else {
            best
        }
    }))
}
