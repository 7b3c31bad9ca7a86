#![allow(dead_code)]

// tests/common/mod.rs
use engine::{create_ai, AiConfig, AiPlayer};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

/// One bot per name, each seeded from `seed` and its seat.
pub fn bots(names: &[&str], seed: u64) -> Vec<Box<dyn AiPlayer>> {
    names
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            create_ai(name, &AiConfig::with_seed(seed.wrapping_add(seat as u64)))
                .unwrap_or_else(|| panic!("unknown bot {name}"))
        })
        .collect()
}
