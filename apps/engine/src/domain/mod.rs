//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod apply;
pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod events;
pub mod invariants;
pub mod kitty;
pub mod legality;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_invariants;
#[cfg(test)]
mod tests_legality;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use actions::Action;
pub use apply::apply_action;
pub use cards_logic::{card_beats, hand_has_suit};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{build_deck, deal_round, shuffle};
pub use events::{derive_events, GameEvent};
pub use invariants::check_invariants;
pub use legality::{current_player, legal_actions, legal_cards};
pub use rules::{DumpMode, Rules};
pub use seed_derivation::{derive_dealing_seed, derive_player_seed};
pub use state::{new_game, GameState, Phase, PlayerId, PlayerState, RoundEffects, RoundState};
pub use tricks::trick_winner;
