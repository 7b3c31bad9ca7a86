//! The state-transition entry point.

use tracing::debug;

use crate::domain::actions::Action;
use crate::domain::bidding::{pass_bid, place_bid};
use crate::domain::kitty::{make_snos, take_kitty};
use crate::domain::scoring::score_round;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::domain::tricks::{declare_rospis, play_card};
use crate::errors::domain::{DomainError, ValidationKind};

/// Apply one action for `player`.
///
/// Every rejection leaves `state` untouched; callers may retry with a
/// corrected action. Round boundaries leave the state in `Deal` (the caller
/// re-deals) or `GameOver`.
pub fn apply_action(
    state: &mut GameState,
    player: PlayerId,
    action: &Action,
) -> Result<(), DomainError> {
    if usize::from(player) >= state.players.len() {
        return Err(DomainError::validation(
            ValidationKind::WrongTurn,
            format!("no player in seat {player}"),
        ));
    }
    let phase = state.round.phase;
    let res = dispatch(state, player, action);
    match &res {
        Ok(()) => debug!(
            player,
            action = %action,
            ?phase,
            next = ?state.round.phase,
            "action applied"
        ),
        Err(e) => debug!(player, action = %action, ?phase, error = %e, "action rejected"),
    }
    res
}

fn dispatch(state: &mut GameState, player: PlayerId, action: &Action) -> Result<(), DomainError> {
    match (state.round.phase, action) {
        (Phase::Bidding, Action::Bid(value)) => place_bid(state, player, *value).map(drop),
        (Phase::Bidding, Action::Pass) => pass_bid(state, player).map(drop),
        (Phase::KittyTake, Action::TakeKitty) => take_kitty(state, player),
        (Phase::Snos, Action::Snos(cards)) => make_snos(state, player, cards).map(drop),
        (Phase::PlayTricks, Action::PlayCard { card, marriage }) => {
            play_card(state, player, *card, *marriage).map(drop)
        }
        (Phase::PlayTricks, Action::Rospis) => declare_rospis(state, player).map(drop),
        (Phase::ScoreRound, _) => {
            score_round(state);
            Ok(())
        }
        (Phase::Deal | Phase::GameOver, _) => Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("no actions accepted during {:?}", state.round.phase),
        )),
        (phase, other) => Err(DomainError::validation(
            ValidationKind::WrongActionForPhase,
            format!("{} is not valid during {phase:?}", other.kind()),
        )),
    }
}
