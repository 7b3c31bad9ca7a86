//! Self-play driver: bots play a whole game against the engine, with the
//! invariant checker run after every step.

use std::collections::VecDeque;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ai::{AiError, AiPlayer};
use crate::domain::{
    apply_action, check_invariants, current_player, deal_round, new_game, GameState, Phase,
    PlayerId, RoundEffects, Rules,
};
use crate::errors::DomainError;

/// How many applied actions a failure report carries.
const RECENT_ACTIONS: usize = 20;

/// Stop conditions for a game that does not reach `GameOver` on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayLimits {
    pub max_steps: usize,
    pub max_rounds: u32,
}

impl Default for SelfPlayLimits {
    fn default() -> Self {
        Self {
            max_steps: 20_000,
            max_rounds: 500,
        }
    }
}

/// One finished round (scored, renounced or passed out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    /// 1-based deal number.
    pub round: u32,
    pub dealer: PlayerId,
    /// Contract holder and bid; `None` when everybody passed.
    pub contract: Option<(PlayerId, u16)>,
    pub round_points: Vec<i32>,
    pub scores: Vec<i32>,
    pub effects: RoundEffects,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfPlayReport {
    pub seed: u64,
    pub rounds: Vec<RoundRecord>,
    pub final_scores: Vec<i32>,
    pub winner: Option<PlayerId>,
    /// `false` when a limit stopped the game before `GameOver`.
    pub completed: bool,
    pub steps: usize,
}

/// What went wrong at the failing step.
#[derive(Debug, Error)]
pub enum AbortCause {
    #[error("bot failed: {0}")]
    Ai(#[from] AiError),
    #[error("engine rejected action: {0}")]
    Rejected(DomainError),
    #[error("invariant violated: {0}")]
    Invariant(DomainError),
    #[error("nobody is to act")]
    Stalled,
}

#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("game setup failed: {0}")]
    Setup(#[from] DomainError),
    #[error("{seats} bots supplied for {players} seats")]
    SeatCount { seats: usize, players: u8 },
    #[error(
        "self-play aborted (seed {seed}, round {round}, step {step}, phase {phase:?}): {cause}; recent: [{}]",
        .recent.join(", ")
    )]
    Aborted {
        seed: u64,
        round: u32,
        step: usize,
        phase: Phase,
        cause: AbortCause,
        recent: Vec<String>,
    },
}

struct Driver {
    seed: u64,
    steps: usize,
    recent: VecDeque<String>,
}

impl Driver {
    fn note(&mut self, player: PlayerId, text: String) {
        if self.recent.len() == RECENT_ACTIONS {
            self.recent.pop_front();
        }
        self.recent.push_back(format!("p{player} {text}"));
    }

    fn abort(&self, state: &GameState, cause: AbortCause) -> SelfPlayError {
        warn!(
            seed = self.seed,
            round = state.deals,
            step = self.steps,
            phase = ?state.phase(),
            %cause,
            "self-play aborted"
        );
        SelfPlayError::Aborted {
            seed: self.seed,
            round: state.deals,
            step: self.steps,
            phase: state.phase(),
            cause,
            recent: self.recent.iter().cloned().collect(),
        }
    }
}

/// Play one game with `players[seat]` deciding for each seat.
pub fn run_self_play(
    rules: Rules,
    seed: u64,
    players: &[Box<dyn AiPlayer>],
    limits: SelfPlayLimits,
) -> Result<SelfPlayReport, SelfPlayError> {
    let mut state = new_game(rules, seed)?;
    if players.len() != usize::from(state.player_count()) {
        return Err(SelfPlayError::SeatCount {
            seats: players.len(),
            players: state.player_count(),
        });
    }

    let mut driver = Driver {
        seed,
        steps: 0,
        recent: VecDeque::with_capacity(RECENT_ACTIONS),
    };
    let mut rounds = Vec::new();

    loop {
        match state.phase() {
            Phase::GameOver => break,
            Phase::Deal => {
                if rounds.len() >= limits.max_rounds as usize {
                    break;
                }
                deal_round(&mut state).map_err(|e| driver.abort(&state, AbortCause::Rejected(e)))?;
                check_invariants(&state)
                    .map_err(|e| driver.abort(&state, AbortCause::Invariant(e)))?;
                continue;
            }
            _ => {}
        }
        if driver.steps >= limits.max_steps {
            break;
        }

        let Some(me) = current_player(&state) else {
            return Err(driver.abort(&state, AbortCause::Stalled));
        };
        let bot = players
            .get(me as usize)
            .ok_or_else(|| driver.abort(&state, AbortCause::Stalled))?;
        let action = bot
            .choose_action(&state, me)
            .map_err(|e| driver.abort(&state, AbortCause::Ai(e)))?;

        let dealer = state.round.dealer;
        let contract = state.contract();
        driver.note(me, action.to_string());
        apply_action(&mut state, me, &action)
            .map_err(|e| driver.abort(&state, AbortCause::Rejected(e)))?;
        driver.steps += 1;
        check_invariants(&state).map_err(|e| driver.abort(&state, AbortCause::Invariant(e)))?;

        if matches!(state.phase(), Phase::Deal | Phase::GameOver) {
            let round_points = match contract {
                Some(_) => state.last_round_points.clone(),
                None => vec![0; usize::from(state.player_count())],
            };
            let effects = match contract {
                Some(_) => state.last_round_effects.clone(),
                None => RoundEffects::default(),
            };
            debug!(round = state.deals, ?contract, ?round_points, "round finished");
            rounds.push(RoundRecord {
                round: state.deals,
                dealer,
                contract,
                round_points,
                scores: state.players.iter().map(|p| p.game_score).collect(),
                effects,
            });
        }
    }

    let completed = state.phase() == Phase::GameOver;
    let winner = if completed {
        state.last_round_effects.winner
    } else {
        None
    };
    info!(
        seed,
        rounds = rounds.len(),
        steps = driver.steps,
        completed,
        ?winner,
        "self-play finished"
    );
    Ok(SelfPlayReport {
        seed,
        rounds,
        final_scores: state.players.iter().map(|p| p.game_score).collect(),
        winner,
        completed,
        steps: driver.steps,
    })
}
