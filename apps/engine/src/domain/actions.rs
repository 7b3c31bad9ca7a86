//! Player actions accepted by the state machine.

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Suit};

/// One move by one player. `Snos` carries the concrete discard choice;
/// the legal-action generator offers it as an empty placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Bid(u16),
    Pass,
    TakeKitty,
    Snos(Vec<Card>),
    PlayCard {
        card: Card,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        marriage: Option<Suit>,
    },
    /// Contract holder forfeits the round before the first card.
    Rospis,
}

impl Action {
    pub fn play(card: Card) -> Self {
        Action::PlayCard {
            card,
            marriage: None,
        }
    }

    pub fn play_with_marriage(card: Card, suit: Suit) -> Self {
        Action::PlayCard {
            card,
            marriage: Some(suit),
        }
    }

    /// Short label used in logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Bid(_) => "bid",
            Action::Pass => "pass",
            Action::TakeKitty => "take_kitty",
            Action::Snos(_) => "snos",
            Action::PlayCard { .. } => "play_card",
            Action::Rospis => "rospis",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Bid(v) => write!(f, "bid {v}"),
            Action::Pass => write!(f, "pass"),
            Action::TakeKitty => write!(f, "take kitty"),
            Action::Snos(cards) => {
                write!(f, "snos")?;
                for c in cards {
                    write!(f, " {c}")?;
                }
                Ok(())
            }
            Action::PlayCard {
                card,
                marriage: None,
            } => write!(f, "play {card}"),
            Action::PlayCard {
                card,
                marriage: Some(suit),
            } => write!(f, "play {card} +marriage {suit:?}"),
            Action::Rospis => write!(f, "rospis"),
        }
    }
}
