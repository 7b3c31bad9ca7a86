//! AI player module - automated seat decisions.
//!
//! This module provides:
//! - [`AiPlayer`], the trait every bot implements
//! - [`RandomPlayer`] ("easy"): uniform over legal moves, seedable for tests
//! - [`HeuristicPlayer`] ("normal"): deterministic hand-estimate bidding and
//!   greedy trick play
//! - [`create_ai`], the name-based factory used by tables and the simulator

mod config;
mod hand_eval;
mod heuristic;
mod random;
mod trait_def;

pub use config::AiConfig;
pub use hand_eval::snos_discards;
pub use heuristic::HeuristicPlayer;
pub use random::RandomPlayer;
pub use trait_def::{AiError, AiPlayer};

/// Names accepted by [`create_ai`].
pub const AI_NAMES: [&str; 4] = ["easy", "random", "normal", "heuristic"];

/// Create an AI player by name.
///
/// - `"easy"` / `"random"`: [`RandomPlayer`] seeded from `config.seed`
/// - `"normal"` / `"heuristic"`: [`HeuristicPlayer`], honouring an integer
///   `bid_margin` custom field
///
/// Returns `None` if the name is unrecognized.
pub fn create_ai(name: &str, config: &AiConfig) -> Option<Box<dyn AiPlayer>> {
    match name {
        "easy" | "random" => Some(Box::new(RandomPlayer::new(config.seed()))),
        "normal" | "heuristic" => {
            let margin = config
                .get_custom("bid_margin")
                .and_then(|v| v.as_i64())
                .and_then(|v| i32::try_from(v).ok())
                .unwrap_or(0);
            Some(Box::new(HeuristicPlayer::new(margin)))
        }
        _ => None,
    }
}
