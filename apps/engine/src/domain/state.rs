use serde::{Deserialize, Serialize};

use crate::domain::rules::Rules;
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

pub type PlayerId = u8; // 0..players
pub type Seat = u8; // positional alias for PlayerId

/// Round progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for `deal_round`; hands are empty.
    Deal,
    /// Players bid or pass in seat order starting left of the dealer.
    Bidding,
    /// Contract holder picks up the kitty.
    KittyTake,
    /// Contract holder passes cards to opponents.
    Snos,
    /// Playing tricks; the contract holder leads the first.
    PlayTricks,
    /// Transient: settling the round that just finished.
    ScoreRound,
    /// A player has won.
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    /// Order is presentation-only.
    pub hand: Vec<Card>,
    /// Tricks won this round, one entry per trick in play order.
    pub tricks: Vec<Vec<Card>>,
    pub round_points: i32,
    pub game_score: i32,
    pub marriage_points: i32,
    /// Consecutive-ish count of trick-less rounds since the last bolt penalty.
    pub bolts: u8,
    pub on_barrel: bool,
    pub barrel_attempts: u8,
}

impl PlayerState {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Vec::new(),
            tricks: Vec::new(),
            round_points: 0,
            game_score: 0,
            marriage_points: 0,
            bolts: 0,
            on_barrel: false,
            barrel_attempts: 0,
        }
    }
}

/// Per-round state. Per-seat bookkeeping is indexed by seat number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: Phase,
    pub dealer: PlayerId,
    /// Leads the current (or next) trick.
    pub leader: PlayerId,
    /// Set only by a marriage declaration.
    pub trump: Option<Suit>,
    /// Hidden cards; empty once taken.
    pub kitty: Vec<Card>,
    pub hands_dealt: bool,
    pub bids: Vec<Option<u16>>,
    pub passed: Vec<bool>,
    pub bid_turn: PlayerId,
    pub bid_winner: Option<PlayerId>,
    /// Current high bid (0 until someone bids).
    pub bid_value: u16,
    /// Cards of the trick in progress, in play order.
    pub trick_cards: Vec<Card>,
    /// Seat order for the trick in progress; empty until its first card.
    pub trick_order: Vec<PlayerId>,
    pub declared_marriages: Vec<[bool; 4]>,
    pub declared_aces: Vec<bool>,
}

impl RoundState {
    pub fn empty(players: u8, dealer: PlayerId) -> Self {
        let n = usize::from(players);
        Self {
            phase: Phase::Deal,
            dealer,
            leader: dealer,
            trump: None,
            kitty: Vec::new(),
            hands_dealt: false,
            bids: vec![None; n],
            passed: vec![false; n],
            bid_turn: next_seat(dealer, players),
            bid_winner: None,
            bid_value: 0,
            trick_cards: Vec::new(),
            trick_order: Vec::new(),
            declared_marriages: vec![[false; 4]; n],
            declared_aces: vec![false; n],
        }
    }
}

/// What round settlement did to each seat; the view layer turns this into events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEffects {
    pub bolts: Vec<PlayerId>,
    pub bolt_penalties: Vec<PlayerId>,
    pub barrel_enter: Vec<PlayerId>,
    pub barrel_exit: Vec<PlayerId>,
    pub barrel_penalty: Vec<PlayerId>,
    pub dumped: Vec<PlayerId>,
    /// Contract holder who ended the round with a rospis.
    pub renounced: Option<PlayerId>,
    pub winner: Option<PlayerId>,
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub rules: Rules,
    /// Base shuffle seed for the game.
    pub seed: u64,
    /// Deals performed so far; selects the per-deal seed.
    pub deals: u32,
    pub round: RoundState,
    pub players: Vec<PlayerState>,
    pub last_round_points: Vec<i32>,
    pub last_round_effects: RoundEffects,
}

/// Create a game in the `Deal` phase with seat 0 dealing.
///
/// Fails if the rules cannot produce a playable deal, so a mis-sized
/// configuration never reaches the table.
pub fn new_game(rules: Rules, seed: u64) -> Result<GameState, DomainError> {
    rules.validate()?;
    let players = (0..rules.players).map(PlayerState::new).collect();
    Ok(GameState {
        round: RoundState::empty(rules.players, 0),
        last_round_points: vec![0; usize::from(rules.players)],
        rules,
        seed,
        deals: 0,
        players,
        last_round_effects: RoundEffects::default(),
    })
}

impl GameState {
    #[inline]
    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    #[inline]
    pub fn player_count(&self) -> u8 {
        self.rules.players
    }

    /// Contract holder and the contract value, once bidding is won.
    pub fn contract(&self) -> Option<(PlayerId, u16)> {
        self.round.bid_winner.map(|p| (p, self.round.bid_value))
    }

    /// Whether any card has been played this round.
    pub fn play_started(&self) -> bool {
        !self.round.trick_cards.is_empty() || self.players.iter().any(|p| !p.tricks.is_empty())
    }

    /// Seat order of the trick in progress, derived from the leader if the
    /// trick has not started yet.
    pub fn trick_order(&self) -> Vec<PlayerId> {
        if self.round.trick_order.is_empty() {
            seats_from(self.round.leader, self.rules.players).collect()
        } else {
            self.round.trick_order.clone()
        }
    }

    /// Clear all per-round state and return to `Deal`, keeping the dealer.
    pub fn reset_round(&mut self) {
        self.round = RoundState::empty(self.rules.players, self.round.dealer);
        for p in &mut self.players {
            p.hand.clear();
            p.tricks.clear();
            p.round_points = 0;
            p.marriage_points = 0;
        }
    }

    pub fn advance_dealer(&mut self) {
        self.round.dealer = next_seat(self.round.dealer, self.rules.players);
    }
}

/// Next seat clockwise, wrapping at `players`.
#[inline]
pub fn next_seat(seat: Seat, players: u8) -> Seat {
    (seat + 1) % players
}

/// All seats starting at `start` in seat order.
pub fn seats_from(start: Seat, players: u8) -> impl Iterator<Item = Seat> {
    (0..players).map(move |i| (start + i) % players)
}

/// Opponents of `seat` in seat order starting after it.
pub fn opponents_of(seat: Seat, players: u8) -> impl Iterator<Item = Seat> {
    seats_from(seat, players).skip(1)
}
