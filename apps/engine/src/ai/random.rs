//! Random AI player: uniform over legal moves.
//!
//! [`RandomPlayer`] is the baseline bot ("easy"). Bids and plays are drawn
//! uniformly from the engine's legal actions; the kitty discard is the one
//! place it thinks, passing on its cheapest cards so it never gives away a
//! marriage half for free.

use std::sync::Mutex;

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::hand_eval::snos_discards;
use super::trait_def::{AiError, AiPlayer};
use crate::domain::legality::legal_actions;
use crate::domain::state::{GameState, PlayerId};
use crate::domain::{Action, Card};

/// AI that makes random legal moves.
///
/// The RNG sits behind a `Mutex` because [`AiPlayer`] methods take `&self`.
/// A fixed seed gives a reproducible sequence of choices.
pub struct RandomPlayer {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "easy";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn pick(&self, options: &[Action], what: &str) -> Result<Action, AiError> {
        if options.is_empty() {
            return Err(AiError::InvalidMove(format!("No legal {what} available")));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        options
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| AiError::Internal(format!("Failed to choose random {what}")))
    }
}

impl AiPlayer for RandomPlayer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_bid(&self, state: &GameState, me: PlayerId) -> Result<Action, AiError> {
        let legal = legal_actions(state, me);
        self.pick(&legal, "bids")
    }

    fn choose_snos(&self, state: &GameState, me: PlayerId) -> Result<Vec<Card>, AiError> {
        let hand = &state
            .players
            .get(me as usize)
            .ok_or_else(|| AiError::Internal(format!("no seat {me}")))?
            .hand;
        Ok(snos_discards(hand, state.rules.snos_cards as usize))
    }

    fn choose_play(&self, state: &GameState, me: PlayerId) -> Result<Action, AiError> {
        let legal: Vec<Action> = legal_actions(state, me)
            .into_iter()
            .filter(|a| !matches!(a, Action::Rospis))
            .collect();
        self.pick(&legal, "plays")
    }
}
