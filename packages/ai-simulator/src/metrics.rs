//! Metrics collection and output for simulation results.

use engine::RoundRecord;
use serde::Serialize;

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    pub rounds: Vec<RoundMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub ai_types: Vec<String>,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_scores: Vec<i32>,
    /// `None` when a step or round limit stopped the game.
    pub winner: Option<u8>,
    pub completed: bool,
    pub rounds_played: usize,
    pub steps: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u32,
    pub dealer: u8,
    pub bidder: Option<u8>,
    pub bid: Option<u16>,
    /// Whether the bidder reached the bid; `None` if passed out or renounced.
    pub made: Option<bool>,
    pub renounced: bool,
    pub round_points: Vec<i32>,
    pub scores: Vec<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bolts: Vec<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub penalties: Vec<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dumped: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: u8,
    pub ai_type: String,
    pub final_score: i32,
    pub contracts_taken: u32,
    pub contracts_made: u32,
    pub contract_success_pct: f64,
    pub rospis: u32,
    pub avg_round_points: f64,
    pub bolts: u32,
    pub dumps: u32,
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    ai_types: &[String],
    total_games: u32,
    result: &GameResult,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let report = &result.report;
    let rounds: Vec<RoundMetrics> = report.rounds.iter().map(build_round_metrics).collect();
    let player_metrics = ai_types
        .iter()
        .enumerate()
        .map(|(seat, ai)| build_player_metrics(seat as u8, ai, &report.final_scores, &rounds))
        .collect();

    GameMetrics {
        game_id,
        seed: result.seed,
        timestamp,
        config: GameConfig {
            ai_types: ai_types.to_vec(),
            total_games,
        },
        result: GameResultMetrics {
            final_scores: report.final_scores.clone(),
            winner: report.winner,
            completed: report.completed,
            rounds_played: report.rounds.len(),
            steps: report.steps,
            duration_ms: result.duration_ms,
        },
        rounds,
        player_metrics,
    }
}

fn build_round_metrics(record: &RoundRecord) -> RoundMetrics {
    let effects = &record.effects;
    let renounced = effects.renounced.is_some();
    let made = match record.contract {
        Some((bidder, bid)) if !renounced => record
            .round_points
            .get(bidder as usize)
            .map(|&pts| pts >= i32::from(bid)),
        _ => None,
    };
    let mut penalties = effects.bolt_penalties.clone();
    penalties.extend(&effects.barrel_penalty);

    RoundMetrics {
        round_no: record.round,
        dealer: record.dealer,
        bidder: record.contract.map(|(p, _)| p),
        bid: record.contract.map(|(_, b)| b),
        made,
        renounced,
        round_points: record.round_points.clone(),
        scores: record.scores.clone(),
        bolts: effects.bolts.clone(),
        penalties,
        dumped: effects.dumped.clone(),
    }
}

fn build_player_metrics(
    seat: u8,
    ai_type: &str,
    final_scores: &[i32],
    rounds: &[RoundMetrics],
) -> PlayerMetrics {
    let idx = seat as usize;
    let mine = rounds.iter().filter(|r| r.bidder == Some(seat));
    let contracts_taken = mine.clone().count() as u32;
    let contracts_made = mine.clone().filter(|r| r.made == Some(true)).count() as u32;
    let rospis = mine.filter(|r| r.renounced).count() as u32;
    let contract_success_pct = if contracts_taken > 0 {
        (contracts_made as f64 / contracts_taken as f64) * 100.0
    } else {
        0.0
    };

    let played: Vec<i32> = rounds
        .iter()
        .filter(|r| r.bidder.is_some() && !r.renounced)
        .filter_map(|r| r.round_points.get(idx).copied())
        .collect();
    let avg_round_points = if played.is_empty() {
        0.0
    } else {
        played.iter().map(|&p| f64::from(p)).sum::<f64>() / played.len() as f64
    };

    PlayerMetrics {
        seat,
        ai_type: ai_type.to_string(),
        final_score: final_scores.get(idx).copied().unwrap_or(0),
        contracts_taken,
        contracts_made,
        contract_success_pct,
        rospis,
        avg_round_points,
        bolts: rounds.iter().filter(|r| r.bolts.contains(&seat)).count() as u32,
        dumps: rounds.iter().filter(|r| r.dumped.contains(&seat)).count() as u32,
    }
}

/// CSV summary row for quick analysis. Seat columns depend on the player
/// count, so rows are written as plain records.
#[derive(Debug)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winner: Option<u8>,
    pub completed: bool,
    pub rounds: usize,
    pub scores: Vec<i32>,
    pub ai_types: Vec<String>,
}

impl CsvSummaryRow {
    pub fn header(players: usize) -> Vec<String> {
        let mut cols: Vec<String> = ["game_id", "seed", "winner", "completed", "rounds"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        cols.extend((0..players).map(|s| format!("seat{s}_score")));
        cols.extend((0..players).map(|s| format!("seat{s}_ai")));
        cols
    }

    pub fn to_record(&self) -> Vec<String> {
        let mut rec = vec![
            self.game_id.to_string(),
            self.seed.to_string(),
            self.winner.map(|w| w.to_string()).unwrap_or_default(),
            self.completed.to_string(),
            self.rounds.to_string(),
        ];
        rec.extend(self.scores.iter().map(|s| s.to_string()));
        rec.extend(self.ai_types.iter().cloned());
        rec
    }
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            winner: metrics.result.winner,
            completed: metrics.result.completed,
            rounds: metrics.result.rounds_played,
            scores: metrics.result.final_scores.clone(),
            ai_types: metrics.config.ai_types.clone(),
        }
    }
}
