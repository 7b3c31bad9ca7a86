//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per game, one per line
    Jsonl,
    /// A single JSON array written when the run finishes
    Json,
}
