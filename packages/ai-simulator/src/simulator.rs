//! One simulated game: fresh bots per game, seeded from the game seed, so
//! any game in a batch can be replayed on its own.

use std::time::Instant;

use engine::domain::derive_player_seed;
use engine::{
    create_ai, run_self_play, AiConfig, AiPlayer, Rules, SelfPlayError, SelfPlayLimits,
    SelfPlayReport,
};

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub seed: u64,
    pub report: SelfPlayReport,
    pub duration_ms: f64,
}

#[derive(Debug)]
pub enum SimulationError {
    UnknownAi(String),
    Game(SelfPlayError),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::UnknownAi(name) => write!(f, "unknown AI type: {name}"),
            SimulationError::Game(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Runs games with a fixed table configuration.
pub struct Simulator {
    rules: Rules,
    ai_types: Vec<String>,
    limits: SelfPlayLimits,
}

impl Simulator {
    pub fn new(rules: Rules, ai_types: Vec<String>, limits: SelfPlayLimits) -> Self {
        Self {
            rules,
            ai_types,
            limits,
        }
    }

    pub fn ai_types(&self) -> &[String] {
        &self.ai_types
    }

    fn seat_players(&self, game_seed: u64) -> Result<Vec<Box<dyn AiPlayer>>, SimulationError> {
        self.ai_types
            .iter()
            .enumerate()
            .map(|(seat, name)| {
                let config = AiConfig::with_seed(derive_player_seed(game_seed, seat as u8));
                create_ai(name, &config).ok_or_else(|| SimulationError::UnknownAi(name.clone()))
            })
            .collect()
    }

    pub fn simulate_game(&self, game_seed: u64) -> Result<GameResult, SimulationError> {
        let players = self.seat_players(game_seed)?;
        let start = Instant::now();
        let report = run_self_play(self.rules.clone(), game_seed, &players, self.limits)
            .map_err(SimulationError::Game)?;
        Ok(GameResult {
            seed: game_seed,
            report,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
