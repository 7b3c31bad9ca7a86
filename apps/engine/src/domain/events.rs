//! Discrete, client-facing events derived from a before/after pair of states.

use serde::Serialize;

use crate::domain::actions::Action;
use crate::domain::cards_logic::{cards_points, holds_all_aces};
use crate::domain::legality::current_player;
use crate::domain::state::{opponents_of, GameState, Phase, PlayerId};
use crate::domain::tricks::trick_winner;
use crate::domain::{Card, Rank, Suit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    BidMade { player: PlayerId, value: u16 },
    BidPassed { player: PlayerId },
    /// Everyone passed; the round will be redealt.
    PassedOut { next_dealer: PlayerId },
    KittyTaken { player: PlayerId },
    SnosMade { player: PlayerId, transfers: Vec<(PlayerId, Card)> },
    CardPlayed { player: PlayerId, card: Card },
    MarriageDeclared { player: PlayerId, suit: Suit, points: i32 },
    AcesDeclared { player: PlayerId },
    TrickWon { player: PlayerId, cards: Vec<Card>, points: i32 },
    RospisDeclared { player: PlayerId, bid: u16 },
    RoundScored { round_points: Vec<i32>, scores: Vec<i32> },
    BoltAwarded { player: PlayerId },
    BoltPenalty { player: PlayerId },
    BarrelEntered { player: PlayerId },
    BarrelExited { player: PlayerId },
    BarrelPenalty { player: PlayerId },
    ScoreDumped { player: PlayerId },
    GameEnded { winner: PlayerId },
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player: PlayerId },
}

/// Events for an action `player` successfully applied to `before`,
/// producing `after`. Pure; never touches either state.
///
/// Trick outcomes are computed from `before` plus the played card, so they
/// are correct even when the round was scored and reset by the same action.
pub fn derive_events(
    before: &GameState,
    after: &GameState,
    player: PlayerId,
    action: &Action,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match action {
        Action::Bid(value) => events.push(GameEvent::BidMade {
            player,
            value: *value,
        }),
        Action::Pass => {
            events.push(GameEvent::BidPassed { player });
            if before.round.phase == Phase::Bidding && after.round.phase == Phase::Deal {
                events.push(GameEvent::PassedOut {
                    next_dealer: after.round.dealer,
                });
            }
        }
        Action::TakeKitty => events.push(GameEvent::KittyTaken { player }),
        Action::Snos(cards) => events.push(GameEvent::SnosMade {
            player,
            transfers: opponents_of(player, before.rules.players)
                .zip(cards.iter().copied())
                .collect(),
        }),
        Action::Rospis => events.push(GameEvent::RospisDeclared {
            player,
            bid: before.round.bid_value,
        }),
        Action::PlayCard { card, marriage } => {
            push_play_events(&mut events, before, player, *card, *marriage)
        }
    }

    if scored_this_action(before, after, action) {
        let fx = &after.last_round_effects;
        events.push(GameEvent::RoundScored {
            round_points: after.last_round_points.clone(),
            scores: after.players.iter().map(|p| p.game_score).collect(),
        });
        events.extend(fx.bolts.iter().map(|&p| GameEvent::BoltAwarded { player: p }));
        events.extend(
            fx.bolt_penalties
                .iter()
                .map(|&p| GameEvent::BoltPenalty { player: p }),
        );
        events.extend(
            fx.barrel_enter
                .iter()
                .map(|&p| GameEvent::BarrelEntered { player: p }),
        );
        events.extend(
            fx.barrel_exit
                .iter()
                .map(|&p| GameEvent::BarrelExited { player: p }),
        );
        events.extend(
            fx.barrel_penalty
                .iter()
                .map(|&p| GameEvent::BarrelPenalty { player: p }),
        );
        events.extend(fx.dumped.iter().map(|&p| GameEvent::ScoreDumped { player: p }));
    }

    if before.round.phase != Phase::GameOver && after.round.phase == Phase::GameOver {
        if let Some(winner) = after.last_round_effects.winner {
            events.push(GameEvent::GameEnded { winner });
        }
    }

    let (was, now) = (current_player(before), current_player(after));
    if let Some(p) = now {
        if was != now {
            events.push(GameEvent::TurnBecame { player: p });
        }
    }

    events
}

fn push_play_events(
    events: &mut Vec<GameEvent>,
    before: &GameState,
    player: PlayerId,
    card: Card,
    marriage: Option<Suit>,
) {
    events.push(GameEvent::CardPlayed { player, card });
    if let Some(suit) = marriage {
        events.push(GameEvent::MarriageDeclared {
            player,
            suit,
            points: suit.marriage_value(),
        });
    }
    let idx = player as usize;
    if before.rules.ace_marriage_enabled
        && card.rank == Rank::Ace
        && !before.round.declared_aces.get(idx).copied().unwrap_or(true)
        && before
            .players
            .get(idx)
            .is_some_and(|p| holds_all_aces(&p.hand))
    {
        events.push(GameEvent::AcesDeclared { player });
    }

    if before.round.trick_cards.len() + 1 != usize::from(before.rules.players) {
        return;
    }
    let mut cards = before.round.trick_cards.clone();
    cards.push(card);
    let trump = marriage.or(before.round.trump);
    if let Some(winner) = trick_winner(&before.trick_order(), &cards, trump) {
        events.push(GameEvent::TrickWon {
            player: winner,
            points: cards_points(&cards),
            cards,
        });
    }
}

/// A round is scored by the play that completes the final trick, or by a
/// re-entrant action in `ScoreRound`.
fn scored_this_action(before: &GameState, after: &GameState, action: &Action) -> bool {
    if before.round.phase == Phase::ScoreRound {
        return after.round.phase != Phase::ScoreRound;
    }
    let Action::PlayCard { .. } = action else {
        return false;
    };
    matches!(after.round.phase, Phase::Deal | Phase::GameOver)
        && before.round.phase == Phase::PlayTricks
}
