use crate::domain::apply::apply_action;
use crate::domain::legality::{current_player, legal_actions, legal_cards};
use crate::domain::rules::Rules;
use crate::domain::state::{new_game, GameState, Phase};
use crate::domain::test_state_helpers::{c, cards, play_state};
use crate::domain::{Action, Suit};

fn trump_state() -> GameState {
    let mut g = play_state([&["9C"], &["10H", "AS"], &["JH", "AH", "KS"]], 0, 80);
    g.round.trump = Some(Suit::Hearts);
    g
}

#[test]
fn no_current_player_outside_live_phases() {
    let mut g = new_game(Rules::tisyacha(), 1).unwrap();
    assert_eq!(current_player(&g), None);
    assert!(legal_actions(&g, 0).is_empty());

    g.round.phase = Phase::GameOver;
    assert_eq!(current_player(&g), None);
    g.round.phase = Phase::ScoreRound;
    assert_eq!(current_player(&g), None);
}

#[test]
fn trick_order_starts_at_leader_and_wraps() {
    let mut g = play_state([&["9C", "JC"], &["9H", "JH"], &["9S", "JS"]], 2, 80);
    assert_eq!(current_player(&g), Some(2));
    apply_action(&mut g, 2, &Action::play(c("9S"))).unwrap();
    assert_eq!(g.round.trick_order, vec![2, 0, 1]);
    assert_eq!(current_player(&g), Some(0));
    assert!(legal_actions(&g, 2).is_empty());
}

#[test]
fn void_player_may_discard_anything_by_default() {
    let mut g = trump_state();
    apply_action(&mut g, 0, &Action::play(c("9C"))).unwrap();
    assert_eq!(legal_cards(&g, 1), cards(&["10H", "AS"]));
}

#[test]
fn void_player_must_trump_when_configured() {
    let mut g = trump_state();
    g.rules.must_trump_if_void = true;
    apply_action(&mut g, 0, &Action::play(c("9C"))).unwrap();
    assert_eq!(legal_cards(&g, 1), cards(&["10H"]));
    apply_action(&mut g, 1, &Action::play(c("10H"))).unwrap();
    // Without over-trumping, any trump will do.
    assert_eq!(legal_cards(&g, 2), cards(&["JH", "AH"]));
}

#[test]
fn over_trump_required_when_able() {
    let mut g = trump_state();
    g.rules.must_trump_if_void = true;
    g.rules.must_over_trump = true;
    apply_action(&mut g, 0, &Action::play(c("9C"))).unwrap();
    apply_action(&mut g, 1, &Action::play(c("10H"))).unwrap();
    assert_eq!(legal_cards(&g, 2), cards(&["AH"]));

    let before = g.clone();
    assert!(apply_action(&mut g, 2, &Action::play(c("JH"))).is_err());
    assert_eq!(g, before);
}

#[test]
fn no_trump_declared_means_no_forced_trumping() {
    let mut g = trump_state();
    g.round.trump = None;
    g.rules.must_trump_if_void = true;
    apply_action(&mut g, 0, &Action::play(c("9C"))).unwrap();
    assert_eq!(legal_cards(&g, 1), cards(&["10H", "AS"]));
}

#[test]
fn snos_is_offered_as_opaque_placeholder() {
    let mut g = play_state([&[], &[], &[]], 1, 80);
    g.round.phase = Phase::Snos;
    assert_eq!(current_player(&g), Some(1));
    assert_eq!(legal_actions(&g, 1), vec![Action::Snos(Vec::new())]);
    assert!(legal_actions(&g, 0).is_empty());
}
