//! Immutable per-game configuration and the named presets.

use serde::{Deserialize, Serialize};

use super::cards_types::Rank;
use crate::errors::domain::{ConfigKind, DomainError};

/// Upper bound on seats; per-seat bookkeeping is sized by `Rules::players`.
pub const MAX_PLAYERS: u8 = 4;

/// Bonus for holding and playing out all four aces.
pub const ACE_MARRIAGE_VALUE: i32 = 200;

/// How the positive score dump compares a score to its threshold.
///
/// The presets use `Exact`: their dump threshold sits below the barrel
/// threshold, so an `AtOrAbove` dump would reset every score before it
/// could reach the win score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DumpMode {
    /// Dump only when a score lands exactly on the threshold.
    Exact,
    /// Dump whenever a score is at or above the threshold.
    AtOrAbove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub players: u8,
    pub deck_ranks: Vec<Rank>,
    pub deal_hand_size: u8,
    pub play_hand_size: u8,
    pub kitty_size: u8,
    pub snos_cards: u8,

    pub bid_min: u16,
    pub bid_step: u16,
    pub max_bid: u16,
    pub win_score: i32,

    pub must_follow_suit: bool,
    pub must_trump_if_void: bool,
    pub must_over_trump: bool,

    /// On success, credit the bid instead of the points earned.
    pub contract_scores_as_bid: bool,
    /// On failure, debit the bid instead of the points earned.
    pub contract_fail_penalty_bid: bool,
    pub marriage_requires_trick: bool,
    pub ace_marriage_enabled: bool,

    pub barrel_threshold: i32,
    pub barrel_target: i32,
    pub barrel_attempts: u8,

    pub bolt_penalty: i32,
    pub bolt_every: u8,

    pub dump_threshold: i32,
    pub dump_negative_threshold: i32,
    pub dump_mode: DumpMode,
}

impl Default for Rules {
    fn default() -> Self {
        Self::tisyacha()
    }
}

impl Rules {
    /// Three-player Tisyacha: 24-card deck, 7 cards each plus a 3-card kitty.
    pub fn tisyacha() -> Self {
        Self {
            players: 3,
            deck_ranks: Rank::ALL.to_vec(),
            deal_hand_size: 7,
            play_hand_size: 8,
            kitty_size: 3,
            snos_cards: 2,
            bid_min: 80,
            bid_step: 10,
            max_bid: 300,
            win_score: 1000,
            must_follow_suit: true,
            must_trump_if_void: false,
            must_over_trump: false,
            contract_scores_as_bid: false,
            contract_fail_penalty_bid: true,
            marriage_requires_trick: true,
            ace_marriage_enabled: false,
            barrel_threshold: 880,
            barrel_target: 120,
            barrel_attempts: 3,
            bolt_penalty: 120,
            bolt_every: 3,
            dump_threshold: 555,
            dump_negative_threshold: -555,
            dump_mode: DumpMode::Exact,
        }
    }

    pub fn classic() -> Self {
        Self::tisyacha()
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "tisyacha" => Some(Self::tisyacha()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    /// Parse a JSON rules document; absent fields take the default preset's value.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let rules: Rules = serde_json::from_str(json)
            .map_err(|e| DomainError::config(ConfigKind::Parse, format!("rules: {e}")))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn deck_len(&self) -> usize {
        self.deck_ranks.len() * 4
    }

    /// Valid bid values in ascending order.
    pub fn bid_ladder(&self) -> impl Iterator<Item = u16> + '_ {
        (self.bid_min..=self.max_bid).step_by(usize::from(self.bid_step.max(1)))
    }

    /// Reject configurations that cannot produce a playable game.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(2..=MAX_PLAYERS).contains(&self.players) {
            return Err(DomainError::config(
                ConfigKind::InvalidPlayerCount,
                format!("player count must be 2..={MAX_PLAYERS}, got {}", self.players),
            ));
        }
        if self.deck_ranks.is_empty() {
            return Err(DomainError::config(
                ConfigKind::InvalidDeck,
                "deck must contain at least one rank",
            ));
        }
        let mut ranks = self.deck_ranks.clone();
        ranks.sort();
        ranks.dedup();
        if ranks.len() != self.deck_ranks.len() {
            return Err(DomainError::config(
                ConfigKind::InvalidDeck,
                "deck ranks must be distinct",
            ));
        }
        if self.bid_step == 0 || self.bid_min > self.max_bid {
            return Err(DomainError::config(
                ConfigKind::InvalidBidLadder,
                format!(
                    "bid ladder {}..={} step {} is empty",
                    self.bid_min, self.max_bid, self.bid_step
                ),
            ));
        }
        if self.bolt_every == 0 || self.barrel_attempts == 0 {
            return Err(DomainError::config(
                ConfigKind::InvalidPenalty,
                format!(
                    "bolt_every ({}) and barrel_attempts ({}) must be at least 1",
                    self.bolt_every, self.barrel_attempts
                ),
            ));
        }
        self.check_deck_exhausted()?;
        self.check_hand_sizes()
    }

    /// After the snos every hand must hold `play_hand_size` cards: the bidder
    /// keeps deal + kitty - snos, the first `snos_cards` opponents gain one
    /// card and the rest keep the deal.
    pub fn check_hand_sizes(&self) -> Result<(), DomainError> {
        let opponents = self.players.saturating_sub(1);
        if self.snos_cards > opponents {
            return Err(DomainError::config(
                ConfigKind::InvalidHandSizes,
                format!(
                    "snos of {} cards needs {} opponents, only {opponents} at the table",
                    self.snos_cards, self.snos_cards
                ),
            ));
        }
        let play = u16::from(self.play_hand_size);
        let deal = u16::from(self.deal_hand_size);
        let bidder = (deal + u16::from(self.kitty_size)).checked_sub(u16::from(self.snos_cards));
        if bidder != Some(play) {
            return Err(DomainError::config(
                ConfigKind::InvalidHandSizes,
                format!(
                    "bidder ends with {} + {} - {} cards, expected {play}",
                    self.deal_hand_size, self.kitty_size, self.snos_cards
                ),
            ));
        }
        for idx in 0..opponents {
            let gained = u16::from(idx < self.snos_cards);
            if deal + gained != play {
                return Err(DomainError::config(
                    ConfigKind::InvalidHandSizes,
                    format!(
                        "opponent {} after the bidder ends with {} cards, expected {play}",
                        idx + 1,
                        deal + gained
                    ),
                ));
            }
        }
        Ok(())
    }

    /// `deal_hand_size * players + kitty_size` must equal the deck length.
    pub fn check_deck_exhausted(&self) -> Result<(), DomainError> {
        let dealt = usize::from(self.deal_hand_size) * usize::from(self.players)
            + usize::from(self.kitty_size);
        if dealt != self.deck_len() {
            return Err(DomainError::config(
                ConfigKind::DeckNotExhausted,
                format!(
                    "invalid deal configuration: {} x {} + {} = {dealt} does not exhaust a {}-card deck",
                    self.deal_hand_size,
                    self.players,
                    self.kitty_size,
                    self.deck_len()
                ),
            ));
        }
        Ok(())
    }
}
