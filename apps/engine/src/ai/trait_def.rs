//! AI player trait definition.

use thiserror::Error;

use crate::domain::legality::current_player;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::domain::{Action, Card};

/// Errors that can occur during AI decision-making.
#[derive(Debug, Error)]
pub enum AiError {
    /// AI encountered an internal error
    #[error("AI internal error: {0}")]
    Internal(String),
    /// AI was asked to act with nothing legal to do
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
}

/// Trait for AI players.
///
/// Implementations read the game state and must choose a legal action for
/// the seat they were asked about. They never mutate the state; the driver
/// applies whatever they return.
pub trait AiPlayer: Send + Sync {
    /// Short registry name, e.g. `"easy"`.
    fn name(&self) -> &'static str;

    /// Choose `Bid(value)` or `Pass` during bidding.
    fn choose_bid(&self, state: &GameState, me: PlayerId) -> Result<Action, AiError>;

    /// Choose exactly `rules.snos_cards` cards from the hand to pass on.
    fn choose_snos(&self, state: &GameState, me: PlayerId) -> Result<Vec<Card>, AiError>;

    /// Choose a card (optionally with a marriage) during trick play.
    fn choose_play(&self, state: &GameState, me: PlayerId) -> Result<Action, AiError>;

    /// Dispatch on phase. Kitty pickup has only one option.
    fn choose_action(&self, state: &GameState, me: PlayerId) -> Result<Action, AiError> {
        if current_player(state) != Some(me) {
            return Err(AiError::InvalidMove(format!(
                "seat {me} is not to act in {:?}",
                state.round.phase
            )));
        }
        match state.round.phase {
            Phase::Bidding => self.choose_bid(state, me),
            Phase::KittyTake => Ok(Action::TakeKitty),
            Phase::Snos => self.choose_snos(state, me).map(Action::Snos),
            Phase::PlayTricks => self.choose_play(state, me),
            phase => Err(AiError::InvalidMove(format!("no decision during {phase:?}"))),
        }
    }
}
