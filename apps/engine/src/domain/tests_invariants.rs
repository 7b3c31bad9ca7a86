use crate::domain::apply::apply_action;
use crate::domain::invariants::{cards_in_play, check_invariants};
use crate::domain::rules::Rules;
use crate::domain::state::new_game;
use crate::domain::test_state_helpers::dealt;
use crate::domain::Action;
use crate::errors::domain::ValidationKind;

#[test]
fn fresh_and_dealt_games_hold_invariants() {
    let g = new_game(Rules::tisyacha(), 1).unwrap();
    check_invariants(&g).unwrap();

    let g = dealt(1);
    check_invariants(&g).unwrap();
    assert_eq!(cards_in_play(&g).len(), 24);
}

#[test]
fn duplicate_card_is_detected() {
    let mut g = dealt(2);
    let dup = g.players[0].hand[0];
    g.players[1].hand[0] = dup;
    let err = check_invariants(&g).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::InvariantViolated));
}

#[test]
fn missing_card_is_detected() {
    let mut g = dealt(2);
    g.round.kitty.pop();
    assert!(check_invariants(&g).is_err());
}

#[test]
fn wrong_hand_size_for_phase_is_detected() {
    let mut g = dealt(2);
    apply_action(&mut g, 1, &Action::Bid(80)).unwrap();
    apply_action(&mut g, 2, &Action::Pass).unwrap();
    apply_action(&mut g, 0, &Action::Pass).unwrap();
    // Shift a kitty card into an opponent's hand: count is intact, sizes are not.
    let card = g.round.kitty.pop().unwrap();
    g.players[0].hand.push(card);
    assert!(check_invariants(&g).is_err());
}
