use crate::domain::apply::apply_action;
use crate::domain::legality::{current_player, legal_actions, legal_cards};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{c, cards, play_state};
use crate::domain::tricks::trick_winner;
use crate::domain::{Action, Suit};
use crate::errors::domain::ValidationKind;

#[test]
fn lone_trump_wins_the_trick() {
    let trick = cards(&["AH", "9S", "10H"]);
    assert_eq!(trick_winner(&[0, 1, 2], &trick, Some(Suit::Spades)), Some(1));
}

#[test]
fn ace_beats_ten_in_lead_suit_without_trump() {
    let trick = cards(&["AH", "9S", "10H"]);
    assert_eq!(trick_winner(&[0, 1, 2], &trick, None), Some(0));
}

#[test]
fn off_suit_cards_never_win_without_trump() {
    let trick = cards(&["9D", "AS", "AC"]);
    assert_eq!(trick_winner(&[2, 0, 1], &trick, None), Some(2));
    assert_eq!(trick_winner(&[2, 0, 1], &trick, Some(Suit::Clubs)), Some(1));
    assert_eq!(trick_winner(&[], &[], None), None);
}

#[test]
fn must_follow_led_suit_when_held() {
    let mut g = play_state([&["AH", "9C"], &["9H", "AS", "KC"], &["JS", "QD"]], 0, 100);
    apply_action(&mut g, 0, &Action::play(c("AH"))).unwrap();

    assert_eq!(current_player(&g), Some(1));
    assert_eq!(legal_cards(&g, 1), cards(&["9H"]));
    assert_eq!(legal_actions(&g, 1), vec![Action::play(c("9H"))]);

    let before = g.clone();
    let err = apply_action(&mut g, 1, &Action::play(c("AS"))).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::IllegalCardPlay));
    assert_eq!(g, before);

    apply_action(&mut g, 1, &Action::play(c("9H"))).unwrap();
    // Void in hearts: any card goes.
    assert_eq!(legal_cards(&g, 2), cards(&["JS", "QD"]));
}

#[test]
fn completed_trick_goes_to_winner_who_leads_next() {
    let mut g = play_state([&["AH", "9C"], &["9H", "AS"], &["JS", "QD"]], 0, 100);
    apply_action(&mut g, 0, &Action::play(c("AH"))).unwrap();
    apply_action(&mut g, 1, &Action::play(c("9H"))).unwrap();
    apply_action(&mut g, 2, &Action::play(c("JS"))).unwrap();

    assert_eq!(g.players[0].tricks, vec![cards(&["AH", "9H", "JS"])]);
    assert_eq!(g.round.leader, 0);
    assert!(g.round.trick_cards.is_empty());
    assert!(g.round.trick_order.is_empty());
    assert_eq!(g.round.phase, Phase::PlayTricks);
    assert_eq!(current_player(&g), Some(0));
}

#[test]
fn play_out_of_turn_or_from_outside_hand_is_rejected() {
    let mut g = play_state([&["AH", "9C"], &["9H", "AS"], &["JS", "QD"]], 0, 100);
    let before = g.clone();
    assert_eq!(
        apply_action(&mut g, 2, &Action::play(c("JS")))
            .unwrap_err()
            .validation_kind(),
        Some(ValidationKind::WrongTurn)
    );
    assert_eq!(
        apply_action(&mut g, 0, &Action::play(c("KD")))
            .unwrap_err()
            .validation_kind(),
        Some(ValidationKind::CardNotInHand)
    );
    assert_eq!(
        apply_action(&mut g, 0, &Action::Bid(120))
            .unwrap_err()
            .validation_kind(),
        Some(ValidationKind::WrongActionForPhase)
    );
    assert_eq!(g, before);
}

fn marriage_ready() -> crate::domain::GameState {
    let mut g = play_state(
        [&["QH", "KH", "AS"], &["9H", "10C", "JC"], &["JS", "AC", "JD"]],
        0,
        100,
    );
    g.players[0].tricks = vec![cards(&["9C", "9D", "9S"])];
    g
}

#[test]
fn marriage_variant_offered_only_for_held_pair() {
    let g = marriage_ready();
    let legal = legal_actions(&g, 0);
    assert!(legal.contains(&Action::play_with_marriage(c("QH"), Suit::Hearts)));
    assert!(legal.contains(&Action::play_with_marriage(c("KH"), Suit::Hearts)));
    assert!(!legal
        .iter()
        .any(|a| matches!(a, Action::PlayCard { card, marriage: Some(_) } if *card == c("AS"))));
}

#[test]
fn marriage_scores_sets_trump_and_only_counts_once() {
    let mut g = marriage_ready();
    apply_action(
        &mut g,
        0,
        &Action::play_with_marriage(c("QH"), Suit::Hearts),
    )
    .unwrap();
    assert_eq!(g.players[0].marriage_points, 100);
    assert_eq!(g.players[0].round_points, 100);
    assert_eq!(g.round.trump, Some(Suit::Hearts));
    assert!(g.round.declared_marriages[0][Suit::Hearts.index()]);

    apply_action(&mut g, 1, &Action::play(c("9H"))).unwrap();
    apply_action(&mut g, 2, &Action::play(c("JS"))).unwrap();
    assert_eq!(g.round.leader, 0);

    let before = g.clone();
    let err = apply_action(
        &mut g,
        0,
        &Action::play_with_marriage(c("KH"), Suit::Hearts),
    )
    .unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(ValidationKind::MarriageAlreadyDeclared)
    );
    assert_eq!(g, before);
    assert_eq!(g.players[0].marriage_points, 100);

    apply_action(&mut g, 0, &Action::play(c("KH"))).unwrap();
    assert_eq!(g.players[0].marriage_points, 100);
}

#[test]
fn marriage_needs_a_won_trick_and_the_full_pair() {
    let mut g = play_state([&["QH", "KH", "AS"], &["9H"], &["JS"]], 0, 100);
    assert!(!legal_actions(&g, 0)
        .iter()
        .any(|a| matches!(a, Action::PlayCard { marriage: Some(_), .. })));
    let err = apply_action(
        &mut g,
        0,
        &Action::play_with_marriage(c("QH"), Suit::Hearts),
    )
    .unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(ValidationKind::MarriagePreconditionUnmet)
    );

    g.rules.marriage_requires_trick = false;
    assert!(legal_actions(&g, 0).contains(&Action::play_with_marriage(c("QH"), Suit::Hearts)));

    let mut lone = play_state([&["QH", "AS"], &["9H"], &["JS"]], 0, 100);
    lone.players[0].tricks = vec![cards(&["9C", "9D", "9S"])];
    let err = apply_action(
        &mut lone,
        0,
        &Action::play_with_marriage(c("QH"), Suit::Hearts),
    )
    .unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(ValidationKind::MarriagePreconditionUnmet)
    );
}

#[test]
fn marriage_on_wrong_card_is_an_illegal_play() {
    let mut g = marriage_ready();
    let err = apply_action(
        &mut g,
        0,
        &Action::play_with_marriage(c("AS"), Suit::Hearts),
    )
    .unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::IllegalCardPlay));
}

#[test]
fn four_aces_bonus_when_enabled() {
    let hands: [&[&str]; 3] = [&["AH", "AS", "AD", "AC"], &["9H", "9S"], &["JH", "JS"]];
    let mut off = play_state(hands, 0, 100);
    apply_action(&mut off, 0, &Action::play(c("AH"))).unwrap();
    assert_eq!(off.players[0].marriage_points, 0);

    let mut on = play_state(hands, 0, 100);
    on.rules.ace_marriage_enabled = true;
    apply_action(&mut on, 0, &Action::play(c("AH"))).unwrap();
    assert_eq!(on.players[0].marriage_points, 200);
    assert!(on.round.declared_aces[0]);
    assert_eq!(on.round.trump, None, "aces do not set trump");
}

#[test]
fn rospis_pays_bid_and_splits_half_to_opponents() {
    let mut g = play_state([&["AH", "9C"], &["9H", "AS"], &["JS", "QD"]], 0, 120);
    assert!(legal_actions(&g, 0).contains(&Action::Rospis));

    apply_action(&mut g, 0, &Action::Rospis).unwrap();
    let scores: Vec<i32> = g.players.iter().map(|p| p.game_score).collect();
    assert_eq!(scores, vec![-120, 60, 60]);
    assert_eq!(g.round.phase, Phase::Deal);
    assert_eq!(g.round.dealer, 1);
    assert_eq!(g.last_round_effects.renounced, Some(0));
    assert!(g.players.iter().all(|p| p.hand.is_empty()));
}

#[test]
fn rospis_closes_once_play_starts() {
    let mut g = play_state([&["AH", "9C"], &["9H", "AS"], &["JS", "QD"]], 0, 120);
    assert_eq!(
        apply_action(&mut g, 1, &Action::Rospis)
            .unwrap_err()
            .validation_kind(),
        Some(ValidationKind::NotContractHolder)
    );

    apply_action(&mut g, 0, &Action::play(c("AH"))).unwrap();
    let before = g.clone();
    assert_eq!(
        apply_action(&mut g, 0, &Action::Rospis)
            .unwrap_err()
            .validation_kind(),
        Some(ValidationKind::RospisAfterPlayStarted)
    );
    assert_eq!(g, before);
    assert!(!legal_actions(&g, 1).contains(&Action::Rospis));
}

#[test]
fn last_trick_scores_the_round_and_redeals() {
    let mut g = play_state([&["AH"], &["9H"], &["JH"]], 0, 80);
    apply_action(&mut g, 0, &Action::play(c("AH"))).unwrap();
    apply_action(&mut g, 1, &Action::play(c("9H"))).unwrap();
    apply_action(&mut g, 2, &Action::play(c("JH"))).unwrap();

    assert_eq!(g.round.phase, Phase::Deal);
    assert_eq!(g.last_round_points, vec![13, 0, 0]);
    assert_eq!(g.players[0].game_score, -80);
    assert_eq!(g.last_round_effects.bolts, vec![1, 2]);
    assert_eq!(g.round.dealer, 1);
    assert_eq!(current_player(&g), None);
}
