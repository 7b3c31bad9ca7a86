//! End-of-round settlement: contract payout, bolts, barrel, dump, win check.

use tracing::info;

use crate::domain::cards_logic::cards_points;
use crate::domain::rules::DumpMode;
use crate::domain::state::{GameState, Phase, PlayerId, RoundEffects};

/// Settle the round that just ran out of cards.
///
/// Records the per-player round points and the effect summary, then either
/// ends the game or advances the dealer and resets to `Deal`. Does nothing
/// outside `ScoreRound`.
pub fn score_round(state: &mut GameState) {
    if state.round.phase != Phase::ScoreRound {
        return;
    }
    let mut effects = RoundEffects::default();

    for p in &mut state.players {
        let trick_points: i32 = p.tricks.iter().map(|t| cards_points(t)).sum();
        p.round_points = trick_points + p.marriage_points;
    }
    state.last_round_points = state.players.iter().map(|p| p.round_points).collect();

    settle_contract(state);
    apply_bolts(state, &mut effects);
    apply_barrel(state, &mut effects);
    apply_dump(state, &mut effects);

    let scores: Vec<i32> = state.players.iter().map(|p| p.game_score).collect();
    if let Some(winner) = state
        .players
        .iter()
        .find(|p| p.game_score >= state.rules.win_score && !p.on_barrel)
        .map(|p| p.id)
    {
        effects.winner = Some(winner);
        state.round.phase = Phase::GameOver;
        info!(winner, ?scores, "game over");
        state.last_round_effects = effects;
        return;
    }

    info!(
        round_points = ?state.last_round_points,
        ?scores,
        "round scored"
    );
    state.last_round_effects = effects;
    state.advance_dealer();
    state.reset_round();
}

fn settle_contract(state: &mut GameState) {
    let rules = &state.rules;
    let contract = state.round.bid_winner;
    let bid = i32::from(state.round.bid_value);

    for p in &mut state.players {
        if Some(p.id) != contract {
            p.game_score += p.round_points;
            continue;
        }
        if p.round_points >= bid {
            p.game_score += if rules.contract_scores_as_bid {
                bid
            } else {
                p.round_points
            };
        } else {
            p.game_score -= if rules.contract_fail_penalty_bid {
                bid
            } else {
                p.round_points
            };
        }
    }
}

fn apply_bolts(state: &mut GameState, effects: &mut RoundEffects) {
    let every = state.rules.bolt_every;
    let penalty = state.rules.bolt_penalty;
    for p in state.players.iter_mut().filter(|p| p.tricks.is_empty()) {
        p.bolts = p.bolts.saturating_add(1);
        effects.bolts.push(p.id);
        if p.bolts >= every {
            p.game_score -= penalty;
            p.bolts = 0;
            effects.bolt_penalties.push(p.id);
        }
    }
}

/// At most one barrel holder. A new player crossing the threshold displaces
/// the incumbent before the holder's outcome for this round is evaluated.
fn apply_barrel(state: &mut GameState, effects: &mut RoundEffects) {
    let rules = &state.rules;
    let before: Vec<bool> = state.players.iter().map(|p| p.on_barrel).collect();
    let mut owner: Option<PlayerId> = state.players.iter().find(|p| p.on_barrel).map(|p| p.id);

    for i in 0..state.players.len() {
        let id = state.players[i].id;
        if state.players[i].game_score >= rules.barrel_threshold && Some(id) != owner {
            if let Some(prev) = owner {
                let prev = &mut state.players[prev as usize];
                prev.on_barrel = false;
                prev.barrel_attempts = 0;
            }
            state.players[i].on_barrel = true;
            state.players[i].barrel_attempts = 0;
            owner = Some(id);
        }
    }

    if let Some(owner) = owner {
        let holder = &mut state.players[owner as usize];
        if holder.round_points >= rules.barrel_target {
            holder.on_barrel = false;
            holder.barrel_attempts = 0;
        } else {
            holder.barrel_attempts = holder.barrel_attempts.saturating_add(1);
            if holder.barrel_attempts >= rules.barrel_attempts {
                holder.game_score -= rules.bolt_penalty;
                holder.on_barrel = false;
                holder.barrel_attempts = 0;
                effects.barrel_penalty.push(owner);
            }
        }
    }

    for (p, was) in state.players.iter().zip(before) {
        if !was && p.on_barrel {
            effects.barrel_enter.push(p.id);
        }
        if was && !p.on_barrel {
            effects.barrel_exit.push(p.id);
        }
    }
}

fn apply_dump(state: &mut GameState, effects: &mut RoundEffects) {
    let rules = &state.rules;
    for p in &mut state.players {
        let high = match rules.dump_mode {
            DumpMode::Exact => p.game_score == rules.dump_threshold,
            DumpMode::AtOrAbove => p.game_score >= rules.dump_threshold,
        };
        if high || p.game_score <= rules.dump_negative_threshold {
            p.game_score = 0;
            effects.dumped.push(p.id);
        }
    }
}
