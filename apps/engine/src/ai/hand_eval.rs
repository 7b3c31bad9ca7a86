//! Hand evaluation helpers shared by the built-in players.

use crate::domain::cards_logic::{cards_points, holds_marriage, marriage_suits};
use crate::domain::rules::Rules;
use crate::domain::{Action, Card, Rank, Suit};

/// Value of keeping `card`: its points, plus 20 for a Queen or King whose
/// marriage partner is also held.
pub fn keep_value(hand: &[Card], card: Card) -> i32 {
    let pair_bonus = if matches!(card.rank, Rank::Queen | Rank::King) && holds_marriage(hand, card.suit)
    {
        20
    } else {
        0
    };
    card.points() + pair_bonus
}

/// The `count` cards least worth keeping, cheapest first.
pub fn snos_discards(hand: &[Card], count: usize) -> Vec<Card> {
    let mut ranked = hand.to_vec();
    ranked.sort_by_key(|&c| (keep_value(hand, c), c.rank.strength()));
    ranked.truncate(count);
    ranked
}

/// Rough round-point estimate: card points, held marriages, and a bonus of
/// 4 per card beyond two in any suit of three or more.
pub fn hand_estimate(hand: &[Card]) -> i32 {
    let marriages: i32 = marriage_suits(hand).iter().map(|s| s.marriage_value()).sum();
    let long_suits: i32 = Suit::ALL
        .iter()
        .map(|&s| hand.iter().filter(|c| c.suit == s).count() as i32)
        .filter(|&n| n >= 3)
        .map(|n| (n - 2) * 4)
        .sum();
    cards_points(hand) + marriages + long_suits
}

/// Highest ladder rung not above `estimate`, or `None` below the minimum.
pub fn affordable_bid(rules: &Rules, estimate: i32) -> Option<u16> {
    rules
        .bid_ladder()
        .take_while(|&b| i32::from(b) <= estimate)
        .last()
}

/// Ordering key for "how much does this card cost to give away".
pub fn card_weight(card: Card) -> i32 {
    card.points() * 10 + i32::from(card.rank.strength())
}

/// The playable cards among `legal`, with their marriage option if any.
pub fn plays(legal: &[Action]) -> impl Iterator<Item = (Card, Option<Suit>)> + '_ {
    legal.iter().filter_map(|a| match a {
        Action::PlayCard { card, marriage } => Some((*card, *marriage)),
        _ => None,
    })
}
