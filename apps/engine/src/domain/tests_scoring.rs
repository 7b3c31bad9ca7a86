use crate::domain::apply::apply_action;
use crate::domain::rules::DumpMode;
use crate::domain::scoring::score_round;
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::scoring_state;
use crate::domain::Action;

// Card-point shorthands: each full "A 10 K" trick is worth 25.
const HEARTS_25: &[&str] = &["AH", "10H", "KH"];
const SPADES_25: &[&str] = &["AS", "10S", "KS"];
const DIAMONDS_25: &[&str] = &["AD", "10D", "KD"];
const CLUBS_25: &[&str] = &["AC", "10C", "KC"];
const LOW_5: &[&str] = &["QH", "JH", "9H"];

fn scores(g: &GameState) -> Vec<i32> {
    g.players.iter().map(|p| p.game_score).collect()
}

#[test]
fn made_contract_scores_points_earned() {
    let mut g = scoring_state(
        [&[HEARTS_25, SPADES_25, DIAMONDS_25, CLUBS_25], &[LOW_5], &[]],
        0,
        100,
        [0, 0, 0],
    );
    score_round(&mut g);

    assert_eq!(g.last_round_points, vec![100, 5, 0]);
    assert_eq!(scores(&g), vec![100, 5, 0]);
    assert_eq!(g.round.phase, Phase::Deal);
    assert_eq!(g.round.dealer, 1);
    assert_eq!(g.last_round_effects.bolts, vec![2]);
    assert_eq!(g.players[2].bolts, 1);
}

#[test]
fn contract_scoring_modes() {
    let tricks: [&[&[&str]]; 3] = [&[HEARTS_25, SPADES_25], &[LOW_5], &[DIAMONDS_25]];

    let mut made_as_bid = scoring_state(tricks, 0, 50, [0, 0, 0]);
    made_as_bid.rules.contract_scores_as_bid = true;
    score_round(&mut made_as_bid);
    assert_eq!(made_as_bid.players[0].game_score, 50);

    let mut failed_as_bid = scoring_state(tricks, 0, 120, [0, 0, 0]);
    score_round(&mut failed_as_bid);
    assert_eq!(failed_as_bid.players[0].game_score, -120);

    let mut failed_as_earned = scoring_state(tricks, 0, 120, [0, 0, 0]);
    failed_as_earned.rules.contract_fail_penalty_bid = false;
    score_round(&mut failed_as_earned);
    // Opponents always bank their own points.
    assert_eq!(scores(&failed_as_earned), vec![-50, 5, 25]);
}

#[test]
fn marriage_points_count_towards_contract() {
    let mut g = scoring_state([&[HEARTS_25], &[], &[]], 0, 120, [0, 0, 0]);
    g.players[0].marriage_points = 100;
    score_round(&mut g);
    assert_eq!(g.last_round_points[0], 125);
    assert_eq!(g.players[0].game_score, 125);
}

#[test]
fn third_bolt_costs_the_penalty_and_resets() {
    let mut g = scoring_state([&[HEARTS_25], &[LOW_5], &[]], 0, 80, [0, 0, 200]);
    g.players[2].bolts = 2;
    score_round(&mut g);

    assert_eq!(g.players[2].game_score, 80);
    assert_eq!(g.players[2].bolts, 0);
    assert_eq!(g.last_round_effects.bolts, vec![2]);
    assert_eq!(g.last_round_effects.bolt_penalties, vec![2]);
}

#[test]
fn crossing_threshold_enters_barrel() {
    // Seat 1 ends on 880 with 80 round points, short of the 120 target.
    let mut g = scoring_state(
        [&[CLUBS_25], &[HEARTS_25, SPADES_25, DIAMONDS_25, LOW_5], &[]],
        2,
        80,
        [0, 800, 0],
    );
    score_round(&mut g);

    assert_eq!(g.players[1].game_score, 880);
    assert!(g.players[1].on_barrel);
    assert_eq!(g.players[1].barrel_attempts, 1);
    assert_eq!(g.last_round_effects.barrel_enter, vec![1]);
}

#[test]
fn barrel_attempts_exhausted_costs_penalty() {
    let mut g = scoring_state([&[CLUBS_25], &[LOW_5], &[HEARTS_25]], 0, 80, [0, 900, 0]);
    g.players[1].on_barrel = true;
    g.players[1].barrel_attempts = 2;
    score_round(&mut g);

    assert_eq!(g.players[1].game_score, 905 - 120);
    assert!(!g.players[1].on_barrel);
    assert_eq!(g.players[1].barrel_attempts, 0);
    assert_eq!(g.last_round_effects.barrel_penalty, vec![1]);
    assert_eq!(g.last_round_effects.barrel_exit, vec![1]);
}

#[test]
fn newcomer_displaces_barrel_holder() {
    let mut g = scoring_state([&[CLUBS_25], &[HEARTS_25], &[LOW_5]], 2, 80, [890, 870, 0]);
    g.players[0].on_barrel = true;
    g.players[0].barrel_attempts = 1;
    score_round(&mut g);

    assert!(!g.players[0].on_barrel);
    assert_eq!(g.players[0].barrel_attempts, 0);
    assert!(g.players[1].on_barrel);
    assert_eq!(g.players[1].barrel_attempts, 1);
    assert_eq!(g.last_round_effects.barrel_enter, vec![1]);
    assert_eq!(g.last_round_effects.barrel_exit, vec![0]);
    assert_eq!(g.players.iter().filter(|p| p.on_barrel).count(), 1);
}

#[test]
fn dump_resets_exact_positive_and_negative_scores() {
    let mut g = scoring_state([&[HEARTS_25], &[SPADES_25], &[]], 0, 80, [-475, 530, 0]);
    score_round(&mut g);
    assert_eq!(scores(&g), vec![0, 0, 0]);
    assert_eq!(g.last_round_effects.dumped, vec![0, 1]);
}

#[test]
fn dump_mode_decides_positive_comparison() {
    let exact = {
        let mut g = scoring_state([&[HEARTS_25], &[SPADES_25], &[]], 0, 80, [0, 540, 0]);
        score_round(&mut g);
        g
    };
    assert_eq!(exact.players[1].game_score, 565);
    assert!(exact.last_round_effects.dumped.is_empty());

    let mut above = scoring_state([&[HEARTS_25], &[SPADES_25], &[]], 0, 80, [0, 540, 0]);
    above.rules.dump_mode = DumpMode::AtOrAbove;
    score_round(&mut above);
    assert_eq!(above.players[1].game_score, 0);
    assert_eq!(above.last_round_effects.dumped, vec![1]);
}

#[test]
fn win_threshold_on_barrel_does_not_end_game() {
    let mut g = scoring_state([&[CLUBS_25], &[HEARTS_25, SPADES_25], &[]], 0, 80, [0, 950, 0]);
    g.players[1].on_barrel = true;
    score_round(&mut g);

    assert_eq!(g.players[1].game_score, 1000);
    assert!(g.players[1].on_barrel);
    assert_eq!(g.round.phase, Phase::Deal);
    assert_eq!(g.last_round_effects.winner, None);
}

#[test]
fn win_threshold_off_barrel_ends_game() {
    let mut g = scoring_state([&[CLUBS_25], &[HEARTS_25], &[]], 0, 80, [0, 900, 0]);
    g.players[1].on_barrel = true;
    g.players[1].marriage_points = 100;
    score_round(&mut g);

    // 125 round points clear the barrel target, so the holder steps off and wins.
    assert_eq!(g.players[1].game_score, 1025);
    assert!(!g.players[1].on_barrel);
    assert_eq!(g.round.phase, Phase::GameOver);
    assert_eq!(g.last_round_effects.winner, Some(1));
    assert!(apply_action(&mut g, 1, &Action::Pass).is_err());
}

#[test]
fn score_round_phase_reruns_scoring_on_any_action() {
    let mut g = scoring_state([&[HEARTS_25], &[], &[]], 0, 80, [0, 0, 0]);
    apply_action(&mut g, 0, &Action::Pass).unwrap();
    assert_eq!(g.round.phase, Phase::Deal);
    assert_eq!(g.last_round_points, vec![25, 0, 0]);
}

#[test]
fn score_round_outside_scoring_phase_is_a_no_op() {
    let mut g = scoring_state([&[HEARTS_25], &[], &[]], 0, 80, [0, 0, 0]);
    g.round.phase = Phase::PlayTricks;
    let before = g.clone();
    score_round(&mut g);
    assert_eq!(g, before);
}
