//! Orchestration on top of the pure domain: bot-driven self-play and an
//! owned table session.

pub mod self_play;
pub mod table;
