//! A table session: one game, its seats, and idempotent action submission.
//!
//! The table is an ordinary value owned by whoever hosts the game; there is
//! no process-wide registry. All mutation goes through one mutex so a
//! submission and the bot replies it triggers are applied atomically.

use std::collections::{HashSet, VecDeque};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::ai::{AiError, AiPlayer};
use crate::domain::{
    apply_action, current_player, deal_round, derive_events, new_game, Action, GameEvent,
    GameState, Phase, PlayerId, Rules,
};
use crate::errors::DomainError;

/// Remembered action ids per table.
const SEEN_CAPACITY: usize = 512;

/// Upper bound on bot moves triggered by one submission.
const MAX_BOT_STEPS: usize = 10_000;

pub enum Seat {
    Human,
    Bot(Box<dyn AiPlayer>),
}

impl Seat {
    fn bot(&self) -> Option<&dyn AiPlayer> {
        match self {
            Seat::Human => None,
            Seat::Bot(ai) => Some(ai.as_ref()),
        }
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Human => f.write_str("Human"),
            Seat::Bot(ai) => write!(f, "Bot({})", ai.name()),
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("action id must not be empty")]
    EmptyActionId,
    #[error("{seats} seats supplied for {players} players")]
    SeatCount { seats: usize, players: u8 },
    #[error("seat {0} is played by a bot")]
    BotSeat(PlayerId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Bounded FIFO set of action ids already applied.
#[derive(Debug, Default)]
struct SeenIds {
    order: VecDeque<String>,
    ids: HashSet<String>,
}

impl SeenIds {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn insert(&mut self, id: &str) {
        if !self.ids.insert(id.to_owned()) {
            return;
        }
        self.order.push_back(id.to_owned());
        if self.order.len() > SEEN_CAPACITY {
            if let Some(old) = self.order.pop_front() {
                self.ids.remove(&old);
            }
        }
    }
}

struct Inner {
    state: GameState,
    seen: SeenIds,
}

pub struct Table {
    seats: Vec<Seat>,
    inner: Mutex<Inner>,
}

impl Table {
    /// Create the game and deal the first round. Bots do not move until
    /// [`Table::run_bots`] or a submission.
    pub fn new(rules: Rules, seed: u64, seats: Vec<Seat>) -> Result<Self, TableError> {
        let mut state = new_game(rules, seed)?;
        if seats.len() != usize::from(state.player_count()) {
            return Err(TableError::SeatCount {
                seats: seats.len(),
                players: state.player_count(),
            });
        }
        deal_round(&mut state)?;
        Ok(Self {
            seats,
            inner: Mutex::new(Inner {
                state,
                seen: SeenIds::default(),
            }),
        })
    }

    pub fn snapshot(&self) -> GameState {
        self.inner.lock().state.clone()
    }

    /// Apply a human action, then let bots reply until a human is to move.
    ///
    /// A repeated `action_id` is accepted and ignored: no events, no change.
    /// Rejected actions do not consume their id.
    pub fn submit(
        &self,
        action_id: &str,
        player: PlayerId,
        action: Action,
    ) -> Result<Vec<GameEvent>, TableError> {
        if action_id.is_empty() {
            return Err(TableError::EmptyActionId);
        }
        if matches!(self.seats.get(player as usize), Some(Seat::Bot(_))) {
            return Err(TableError::BotSeat(player));
        }

        let mut inner = self.inner.lock();
        if inner.seen.contains(action_id) {
            debug!(action_id, player, "duplicate action id ignored");
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        Self::step(&mut inner.state, player, &action, &mut events)?;
        inner.seen.insert(action_id);
        self.drive_bots(&mut inner.state, &mut events)?;
        Ok(events)
    }

    /// Let bot seats act until a human is to move or the game is over.
    pub fn run_bots(&self) -> Result<Vec<GameEvent>, TableError> {
        let mut inner = self.inner.lock();
        let mut events = Vec::new();
        self.drive_bots(&mut inner.state, &mut events)?;
        Ok(events)
    }

    fn step(
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), TableError> {
        let before = state.clone();
        apply_action(state, player, action)?;
        events.extend(derive_events(&before, state, player, action));
        if state.phase() == Phase::Deal {
            deal_round(state)?;
            if let Some(next) = current_player(state) {
                events.push(GameEvent::TurnBecame { player: next });
            }
        }
        Ok(())
    }

    fn drive_bots(
        &self,
        state: &mut GameState,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), TableError> {
        for _ in 0..MAX_BOT_STEPS {
            let Some(me) = current_player(state) else {
                return Ok(());
            };
            let Some(bot) = self.seats.get(me as usize).and_then(Seat::bot) else {
                return Ok(());
            };
            let action = bot.choose_action(state, me).map_err(|e| {
                warn!(seat = me, bot = bot.name(), error = %e, "bot failed to choose");
                e
            })?;
            Self::step(state, me, &action, events).map_err(|e| {
                warn!(seat = me, bot = bot.name(), %action, error = %e, "bot action rejected");
                e
            })?;
        }
        warn!(limit = MAX_BOT_STEPS, "bot step limit reached");
        Ok(())
    }
}
