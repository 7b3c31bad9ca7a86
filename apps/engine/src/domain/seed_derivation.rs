//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Provides functions to derive unique-but-deterministic seeds for different
//! game contexts (re-deals, automated players) from a base game seed.

/// Derive the shuffle seed for the `deal_no`-th deal of a game (0-based).
///
/// The first deal uses the game seed unchanged, so a fresh game shuffles with
/// exactly the seed it was created with. Later deals (after a pass-out, a
/// rospis or a completed round) get distinct but reproducible seeds.
pub fn derive_dealing_seed(game_seed: u64, deal_no: u32) -> u64 {
    if deal_no == 0 {
        return game_seed;
    }
    // Different multiplier from the player seeds to keep contexts apart
    game_seed
        .wrapping_add(u64::from(deal_no).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Derive a per-seat seed for an automated player in a seeded game.
///
/// Same game + seat = same bot decisions across replays.
pub fn derive_player_seed(game_seed: u64, seat: u8) -> u64 {
    game_seed
        .wrapping_add(u64::from(seat).wrapping_mul(100))
        .wrapping_add(1) // Offset to distinguish from dealing seeds
}
