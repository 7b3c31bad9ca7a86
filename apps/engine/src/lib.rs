#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod domain;
pub mod errors;
pub mod services;


// Re-exports for public API
pub use ai::{create_ai, AiConfig, AiError, AiPlayer, HeuristicPlayer, RandomPlayer};
pub use domain::{
    apply_action, check_invariants, current_player, deal_round, derive_events, legal_actions,
    new_game, Action, Card, GameEvent, GameState, Phase, PlayerId, RoundEffects, Rules,
};
pub use errors::{ConfigKind, DomainError, ValidationKind};
pub use services::self_play::{
    run_self_play, AbortCause, RoundRecord, SelfPlayError, SelfPlayLimits, SelfPlayReport,
};
pub use services::table::{Seat, Table, TableError};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
