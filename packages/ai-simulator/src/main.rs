//! AI Simulator CLI - batch self-play for bot evaluation.
//!
//! Each game runs through the engine's self-play driver with the invariant
//! checker on, so a batch doubles as a soak test of the rules engine.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use engine::ai::AI_NAMES;
use engine::{Rules, SelfPlayLimits};
use metrics::build_game_metrics;
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Batch self-play simulator for Thousand bots")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game N uses seed + N - 1. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated bot per seat (easy, normal)
    #[arg(long, value_delimiter = ',', default_value = "easy,normal,normal")]
    seats: Vec<String>,

    /// JSON rules file; defaults to the standard preset
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Abort a game after this many actions
    #[arg(long, default_value = "20000")]
    max_steps: usize,

    /// Abort a game after this many rounds
    #[arg(long, default_value = "500")]
    max_rounds: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

fn load_rules(path: Option<&PathBuf>) -> Result<Rules, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)?;
            Ok(Rules::from_json_str(&text)?)
        }
        None => Ok(Rules::tisyacha()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rules = load_rules(args.rules.as_ref())?;
    if args.seats.len() != usize::from(rules.players) {
        return Err(format!(
            "{} seats given for {} players",
            args.seats.len(),
            rules.players
        )
        .into());
    }
    if let Some(bad) = args.seats.iter().find(|s| !AI_NAMES.contains(&s.as_str())) {
        return Err(format!("Unknown AI type: {bad}").into());
    }

    if args.show_output {
        info!("Starting AI simulator");
        info!("Configuration: {} games, seats {:?}", args.games, args.seats);
    }

    let limits = SelfPlayLimits {
        max_steps: args.max_steps,
        max_rounds: args.max_rounds,
    };
    let players = usize::from(rules.players);
    let simulator = Simulator::new(rules, args.seats.clone(), limits);
    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress, players)?;

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0u32;

    for game_num in 1..=args.games {
        let game_seed = base_seed.wrapping_add(u64::from(game_num - 1));
        match simulator.simulate_game(game_seed) {
            Ok(result) => {
                let metrics =
                    build_game_metrics(game_num, simulator.ai_types(), args.games, &result);
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(
                        "Game {} finished: scores={:?} winner={:?}",
                        game_num, result.report.final_scores, result.report.winner
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} (seed {}) failed: {}", game_num, game_seed, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (detail_path, csv_path) = output_writer.output_paths();
    let (detail_path, csv_path) = (detail_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", detail_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, players, errors, elapsed, args.games);
    }

    if errors > 0 {
        return Err(format!("{errors} of {} games failed", args.games).into());
    }
    Ok(())
}

fn print_summary(
    results: &[GameResult],
    players: usize,
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games simulated: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    let unfinished = results.iter().filter(|r| !r.report.completed).count();
    if unfinished > 0 {
        println!("Stopped by limits: {}", unfinished);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );
    let avg_rounds = results
        .iter()
        .map(|r| r.report.rounds.len() as f64)
        .sum::<f64>()
        / results.len() as f64;
    println!("Average rounds per game: {:.1}", avg_rounds);

    let mut wins = vec![0u32; players];
    let mut total_scores = vec![0i64; players];
    let mut max_scores = vec![i32::MIN; players];
    let mut min_scores = vec![i32::MAX; players];

    for result in results {
        if let Some(w) = result.report.winner {
            wins[w as usize] += 1;
        }
        for (seat, &score) in result.report.final_scores.iter().enumerate().take(players) {
            total_scores[seat] += i64::from(score);
            max_scores[seat] = max_scores[seat].max(score);
            min_scores[seat] = min_scores[seat].min(score);
        }
    }

    println!("\n=== Results by Seat ===");
    for seat in 0..players {
        let avg_score = total_scores[seat] as f64 / results.len() as f64;
        let win_rate = (wins[seat] as f64 / results.len() as f64) * 100.0;
        println!(
            "Seat {}: avg={:.1}, min={}, max={}, wins={} ({:.1}%)",
            seat, avg_score, min_scores[seat], max_scores[seat], wins[seat], win_rate
        );
    }
}
