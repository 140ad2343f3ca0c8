//! Deterministic host loop.
//!
//! [`SessionDriver`] plays the role of a UI event loop: it owns a virtual
//! millisecond clock, fires one countdown tick per second and delivers each pair
//! resolution after its reveal delay. Due tasks run in the order they were
//! scheduled, so a late resolution can never revive a game that already timed out.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::trace;

use super::difficulty::DifficultyConfig;
use super::error::GameError;
use super::events::GameListener;
use super::session::{GameSession, ResolutionTicket};
use super::state::GameStatus;

pub const TICK_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Tick,
    Resolve(ResolutionTicket),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    task: Task,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
pub struct SessionDriver<R: Rng = StdRng> {
    session: GameSession<R>,
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Scheduled>>,
}

impl<R: Rng> SessionDriver<R> {
    pub fn new(session: GameSession<R>) -> Self {
        let mut driver = SessionDriver {
            session,
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        };
        driver.start_clock();
        driver
    }

    pub fn subscribe<L: GameListener + 'static>(&mut self, listener: L) {
        self.session.subscribe(listener);
    }

    /// Forwards a pick; a completed pair is queued for judgement after its delay.
    pub fn select_card(&mut self, index: usize) -> Option<ResolutionTicket> {
        let ticket = self.session.select_card(index)?;
        self.schedule(ticket.delay_ms(), Task::Resolve(ticket));
        Some(ticket)
    }

    /// Moves the clock forward by `ms`, running every task that falls due.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms.saturating_add(ms);
        loop {
            let due = match self.queue.peek() {
                Some(Reverse(next)) if next.due_ms <= target => *next,
                _ => break,
            };
            self.queue.pop();
            self.now_ms = due.due_ms;
            self.run(due.task);
        }
        self.now_ms = target;
    }

    /// Runs the clock until the game ends or `limit_ms` passes.
    pub fn run_until_finished(&mut self, limit_ms: u64) -> GameStatus {
        let deadline = self.now_ms.saturating_add(limit_ms);
        while !self.session.status().is_terminal() && self.now_ms < deadline {
            self.advance(TICK_MS.min(deadline - self.now_ms));
        }
        self.session.status()
    }

    pub fn reset(&mut self, config: DifficultyConfig) -> Result<(), GameError> {
        self.session.reset(config)?;
        self.queue.clear();
        self.start_clock();
        Ok(())
    }

    pub fn play_again(&mut self) -> Result<(), GameError> {
        self.reset(self.session.config())
    }

    /// Cancels every queued task and tears the session down.
    pub fn abandon(&mut self) {
        self.queue.clear();
        self.session.abandon();
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn into_session(self) -> GameSession<R> {
        self.session
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn queued_tasks(&self) -> usize {
        self.queue.len()
    }

    fn start_clock(&mut self) {
        self.schedule(TICK_MS, Task::Tick);
    }

    fn schedule(&mut self, delay_ms: u64, task: Task) {
        let scheduled = Scheduled {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            task,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.queue.push(Reverse(scheduled));
    }

    fn run(&mut self, task: Task) {
        trace!(now_ms = self.now_ms, ?task, "running task");
        match task {
            Task::Tick => {
                self.session.tick();
                if self.session.status() == GameStatus::Playing {
                    self.schedule(TICK_MS, Task::Tick);
                }
            }
            Task::Resolve(ticket) => {
                self.session.resolve_pending_pair(ticket);
            }
        }
        if self.session.status().is_terminal() {
            self.queue.clear();
        }
    }
}
