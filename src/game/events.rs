use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::LossReason;

/// Outcomes a session reports to its host, in the order they happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted {
        card_count: usize,
        max_attempts: u32,
        time_limit_secs: u32,
    },
    CardRevealed(usize),
    PairMatched(usize, usize),
    PairMismatched(usize, usize),
    AttemptsChanged { count: u32, max: u32 },
    TimeChanged(u32),
    GameWon,
    GameLost(LossReason),
}

impl GameEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameWon | GameEvent::GameLost(_))
    }
}

pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Shared recorder; clones observe the same log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn last(&self) -> Option<GameEvent> {
        self.events.borrow().last().copied()
    }
}

impl GameListener for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(*event);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingListener;

impl GameListener for TracingListener {
    fn on_event(&mut self, event: &GameEvent) {
        if event.is_terminal() {
            info!(?event, "game over");
        } else {
            debug!(?event, "game event");
        }
    }
}
