// Proptest generators for domain types.
// These generators ensure unique cards and reachable game states.

use proptest::prelude::*;

use crate::domain::apply::apply_action;
use crate::domain::dealing::deal_round;
use crate::domain::legality::{current_player, legal_actions};
use crate::domain::rules::Rules;
use crate::domain::state::{new_game, GameState, Phase, PlayerId};
use crate::domain::{Action, Card, Rank, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

/// Generate an optional trump suit
pub fn trump() -> impl Strategy<Value = Option<Suit>> {
    prop_oneof![Just(None), suit().prop_map(Some)]
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    prop_oneof![
        Just(Rank::Nine),
        Just(Rank::Jack),
        Just(Rank::Queen),
        Just(Rank::King),
        Just(Rank::Ten),
        Just(Rank::Ace),
    ]
}

/// Generate a vector of N unique cards from the 24-card deck
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut all_cards = Vec::with_capacity(24);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                all_cards.push(Card::new(suit, rank));
            }
        }
        for i in 0..count.min(all_cards.len()) {
            let j = rng.random_range(i..all_cards.len());
            all_cards.swap(i, j);
        }
        all_cards.truncate(count);
        all_cards
    })
}

/// Complete three-card trick: (leader, seat order, cards, trump)
pub fn complete_trick() -> impl Strategy<Value = (PlayerId, Vec<PlayerId>, Vec<Card>, Option<Suit>)>
{
    (0u8..3, unique_cards(3), trump()).prop_map(|(leader, cards, trump)| {
        let order = (0..3).map(|i| (leader + i) % 3).collect();
        (leader, order, cards, trump)
    })
}

/// A freshly dealt Tisyacha game in `Bidding`.
pub fn dealt_game() -> impl Strategy<Value = GameState> {
    any::<u64>().prop_map(|seed| {
        let mut g = new_game(Rules::tisyacha(), seed).unwrap();
        deal_round(&mut g).unwrap();
        g
    })
}

/// Drive a game with seeded picks among legal actions until `stop` holds
/// or `max_steps` actions were applied. Snos discards the first N cards.
pub fn drive(
    g: &mut GameState,
    picks: &[u16],
    max_steps: usize,
    mut stop: impl FnMut(&GameState) -> bool,
) {
    for step in 0..max_steps {
        if stop(g) {
            return;
        }
        if g.round.phase == Phase::Deal {
            deal_round(g).unwrap();
            continue;
        }
        let Some(p) = current_player(g) else {
            return;
        };
        let mut legal = legal_actions(g, p);
        legal.retain(|a| !matches!(a, Action::Rospis));
        let pick = usize::from(picks.get(step % picks.len().max(1)).copied().unwrap_or(0));
        let action = match legal.get(pick % legal.len().max(1)).cloned() {
            Some(Action::Snos(_)) => {
                let n = usize::from(g.rules.snos_cards);
                Action::Snos(g.players[p as usize].hand[..n].to_vec())
            }
            Some(a) => a,
            None => return,
        };
        apply_action(g, p, &action).unwrap();
    }
}

/// A reachable state part-way into trick play.
pub fn mid_play_game() -> impl Strategy<Value = GameState> {
    (dealt_game(), prop::collection::vec(any::<u16>(), 1..16), 0usize..12).prop_map(
        |(mut g, picks, extra)| {
            drive(&mut g, &picks, 400, |s| s.round.phase == Phase::PlayTricks);
            let target = g.deals;
            let mut n = 0;
            drive(&mut g, &picks, 400, |s| {
                n += 1;
                n > extra || s.round.phase != Phase::PlayTricks || s.deals != target
            });
            g
        },
    )
}
