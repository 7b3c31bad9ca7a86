//! Card game logic: suits in hands, card strength, marriage pairs

use super::cards_types::{Card, Rank, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Whether `a` beats the current best card `b` given the lead suit and trump.
///
/// Mirrors the scan used for trick resolution: trump beats non-trump, a
/// same-suit card wins on strength, and a lead-suit card beats an off-suit
/// best. Two off-suit cards are incomparable and neither beats the other.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Option<Suit>) -> bool {
    if let Some(trump) = trump {
        let a_trump = a.suit == trump;
        let b_trump = b.suit == trump;
        if a_trump && !b_trump {
            return true;
        }
        if b_trump && !a_trump {
            return false;
        }
    }
    if a.suit == b.suit {
        return a.rank.strength() > b.rank.strength();
    }
    b.suit != lead && a.suit == lead
}

/// Total card points of a set of cards.
pub fn cards_points(cards: &[Card]) -> i32 {
    cards.iter().map(|c| c.points()).sum()
}

/// Whether the hand holds both the Queen and King of `suit`.
pub fn holds_marriage(hand: &[Card], suit: Suit) -> bool {
    hand.contains(&Card::new(suit, Rank::Queen)) && hand.contains(&Card::new(suit, Rank::King))
}

/// Suits for which the hand holds a full Queen+King pair.
pub fn marriage_suits(hand: &[Card]) -> Vec<Suit> {
    Suit::ALL
        .into_iter()
        .filter(|&s| holds_marriage(hand, s))
        .collect()
}

pub fn holds_all_aces(hand: &[Card]) -> bool {
    Suit::ALL
        .iter()
        .all(|&s| hand.contains(&Card::new(s, Rank::Ace)))
}
