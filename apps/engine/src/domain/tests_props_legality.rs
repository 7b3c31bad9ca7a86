use proptest::prelude::*;

use crate::domain::apply::apply_action;
use crate::domain::cards_logic::hand_has_suit;
use crate::domain::invariants::check_invariants;
use crate::domain::legality::{current_player, legal_actions};
use crate::domain::state::Phase;
use crate::domain::{test_gens, test_prelude, Action};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: reachable mid-play states conserve the deck.
    #[test]
    fn prop_reachable_states_hold_invariants(g in test_gens::mid_play_game()) {
        prop_assert!(check_invariants(&g).is_ok(), "{:?}", check_invariants(&g));
    }

    /// Property: holding the led suit restricts plays to that suit;
    /// holding none leaves the whole hand playable.
    #[test]
    fn prop_suit_following(g in test_gens::mid_play_game()) {
        prop_assume!(g.round.phase == Phase::PlayTricks);
        let p = current_player(&g).unwrap();
        let hand = &g.players[p as usize].hand;
        let plays: Vec<_> = legal_actions(&g, p)
            .into_iter()
            .filter_map(|a| match a {
                Action::PlayCard { card, .. } => Some(card),
                _ => None,
            })
            .collect();
        match g.round.trick_cards.first() {
            Some(lead) if hand_has_suit(hand, lead.suit) => {
                prop_assert!(plays.iter().all(|c| c.suit == lead.suit));
            }
            _ => {
                for card in hand {
                    prop_assert!(plays.contains(card));
                }
            }
        }
    }

    /// Property: every offered action is accepted by `apply_action`.
    #[test]
    fn prop_every_legal_action_applies(g in test_gens::mid_play_game()) {
        let Some(p) = current_player(&g) else { return Ok(()); };
        for action in legal_actions(&g, p) {
            if matches!(action, Action::Snos(_)) {
                continue;
            }
            let mut next = g.clone();
            prop_assert!(
                apply_action(&mut next, p, &action).is_ok(),
                "{} rejected in {:?}", action, g.round.phase
            );
        }
    }

    /// Property: nobody but the current player has legal actions.
    #[test]
    fn prop_only_current_player_may_act(g in test_gens::mid_play_game()) {
        let current = current_player(&g);
        for p in 0..g.rules.players {
            if Some(p) != current {
                prop_assert!(legal_actions(&g, p).is_empty());
            }
        }
    }
}
