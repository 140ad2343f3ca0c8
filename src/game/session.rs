use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use super::board::{Board, generate};
use super::difficulty::{Difficulty, DifficultyConfig};
use super::error::GameError;
use super::events::{GameEvent, GameListener};
use super::records::GameSummary;
use super::snapshot::Snapshot;
use super::state::{CardStatus, GameStatus, LossReason, SessionPhase};
use super::timer::Countdown;

/// How long a completed pair stays face up before it is judged.
pub const PAIR_REVEAL_MS: u64 = 1000;

/// Handle for one deferred pair resolution. Only the ticket issued for the live
/// pair of the current game is honoured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionTicket {
    game_id: u64,
    pair_id: u64,
    delay_ms: u64,
}

impl ResolutionTicket {
    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    /// Sequence number of the pair within its game.
    pub fn pair_id(&self) -> u64 {
        self.pair_id
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

pub struct GameSession<R: Rng = StdRng> {
    config: DifficultyConfig,
    difficulty: Option<Difficulty>,
    board: Board,
    selection: Vec<usize>,
    attempt_count: u32,
    matched_count: usize,
    timer: Countdown,
    status: GameStatus,
    game_id: u64,
    pair_id: u64,
    pending: Option<ResolutionTicket>,
    rng: R,
    listeners: Vec<Box<dyn GameListener>>,
}

impl GameSession<StdRng> {
    pub fn new(config: DifficultyConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Result<Self, GameError> {
        Self::with_difficulty(difficulty, StdRng::from_os_rng())
    }
}

impl<R: Rng> GameSession<R> {
    /// Builds a session for a named tier; its summary ranks against that tier.
    pub fn with_difficulty(difficulty: Difficulty, rng: R) -> Result<Self, GameError> {
        let mut session = Self::with_rng(difficulty.config(), rng)?;
        session.difficulty = Some(difficulty);
        Ok(session)
    }

    pub fn with_rng(config: DifficultyConfig, mut rng: R) -> Result<Self, GameError> {
        let board = generate(&config, &mut rng)?;
        let mut timer = Countdown::new(config.time_limit_secs);
        timer.restart();
        debug!(cards = board.len(), "session created");
        Ok(GameSession {
            config,
            difficulty: None,
            board,
            selection: Vec::with_capacity(2),
            attempt_count: 0,
            matched_count: 0,
            timer,
            status: GameStatus::Playing,
            game_id: 1,
            pair_id: 0,
            pending: None,
            rng,
            listeners: Vec::new(),
        })
    }

    pub fn subscribe<L: GameListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Reveals the card at `index`. Returns a ticket when this completes a pair;
    /// the host hands it back to [`Self::resolve_pending_pair`] after
    /// [`ResolutionTicket::delay_ms`]. Rejected picks change nothing.
    #[instrument(skip(self))]
    pub fn select_card(&mut self, index: usize) -> Option<ResolutionTicket> {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "selection after game over ignored");
            return None;
        }
        if !self.timer.is_running() {
            debug!("selection after teardown ignored");
            return None;
        }
        let Some(card) = self.board.get(index) else {
            warn!(board_len = self.board.len(), "card index out of range");
            return None;
        };
        if card.is_matched() {
            debug!("card already matched");
            return None;
        }
        if self.selection.len() >= 2 {
            debug!("pair pending resolution");
            return None;
        }
        if self.selection.contains(&index) {
            debug!("card already selected");
            return None;
        }

        self.board.set_status(index, CardStatus::Revealed);
        self.selection.push(index);
        self.emit(GameEvent::CardRevealed(index));

        if self.selection.len() < 2 {
            return None;
        }
        self.pair_id = self.pair_id.wrapping_add(1);
        let ticket = ResolutionTicket {
            game_id: self.game_id,
            pair_id: self.pair_id,
            delay_ms: PAIR_REVEAL_MS,
        };
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Judges the pending pair. Returns whether the ticket was live and applied.
    #[instrument(skip(self))]
    pub fn resolve_pending_pair(&mut self, ticket: ResolutionTicket) -> bool {
        if self.pending != Some(ticket) {
            debug!(current_game = self.game_id, current_pair = self.pair_id, "stale resolution ignored");
            return false;
        }
        self.pending = None;
        if self.status.is_terminal() {
            return false;
        }
        let &[first, second] = self.selection.as_slice() else {
            return false;
        };
        self.selection.clear();

        let same_token = match (self.board.get(first), self.board.get(second)) {
            (Some(a), Some(b)) => a.token == b.token,
            _ => false,
        };

        if same_token {
            self.board.set_status(first, CardStatus::Matched);
            self.board.set_status(second, CardStatus::Matched);
            self.matched_count += 2;
            self.emit(GameEvent::PairMatched(first, second));
            if self.matched_count == self.board.len() {
                self.finish(GameStatus::Won);
            }
        } else {
            self.board.set_status(first, CardStatus::Hidden);
            self.board.set_status(second, CardStatus::Hidden);
            self.attempt_count = self
                .attempt_count
                .saturating_add(1)
                .min(self.config.max_attempts);
            self.emit(GameEvent::PairMismatched(first, second));
            self.emit(GameEvent::AttemptsChanged {
                count: self.attempt_count,
                max: self.config.max_attempts,
            });
            if self.attempt_count >= self.config.max_attempts {
                self.finish(GameStatus::Lost(LossReason::AttemptsExhausted));
            }
        }
        true
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        let Some(step) = self.timer.tick() else {
            return;
        };
        self.emit(GameEvent::TimeChanged(step.remaining));
        if step.expired {
            self.finish(GameStatus::Lost(LossReason::TimeExpired));
        }
    }

    /// Starts a fresh game with `config`. On error the current game is left as it was.
    #[instrument(skip(self))]
    pub fn reset(&mut self, config: DifficultyConfig) -> Result<(), GameError> {
        let difficulty = self.difficulty.filter(|difficulty| difficulty.config() == config);
        self.start_game(config, difficulty)
    }

    pub fn reset_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        self.start_game(difficulty.config(), Some(difficulty))
    }

    fn start_game(
        &mut self,
        config: DifficultyConfig,
        difficulty: Option<Difficulty>,
    ) -> Result<(), GameError> {
        let board = generate(&config, &mut self.rng)?;
        self.config = config;
        self.difficulty = difficulty;
        self.board = board;
        self.selection.clear();
        self.attempt_count = 0;
        self.matched_count = 0;
        self.pending = None;
        self.game_id = self.game_id.wrapping_add(1);
        self.pair_id = 0;
        self.status = GameStatus::Playing;
        self.timer.start(config.time_limit_secs);
        debug!(game_id = self.game_id, cards = self.board.len(), "session reset");
        self.emit(GameEvent::GameStarted {
            card_count: self.board.len(),
            max_attempts: config.max_attempts,
            time_limit_secs: config.time_limit_secs,
        });
        Ok(())
    }

    /// Replays the difficulty this session was playing.
    pub fn play_again(&mut self) -> Result<(), GameError> {
        self.start_game(self.config, self.difficulty)
    }

    /// Drops the pending pair without judging it; both cards flip back and no
    /// attempt is counted. Returns whether anything was pending.
    pub fn cancel_pending(&mut self) -> bool {
        let Some(_) = self.pending.take() else {
            return false;
        };
        if !self.status.is_terminal() {
            for index in self.selection.drain(..) {
                self.board.set_status(index, CardStatus::Hidden);
            }
        }
        true
    }

    /// Teardown: stops the countdown and discards any pending resolution. The
    /// session then rejects every pick until it is reset.
    pub fn abandon(&mut self) {
        self.timer.stop();
        self.cancel_pending();
        self.game_id = self.game_id.wrapping_add(1);
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.timer.stop();
        self.pending = None;
        info!(?status, attempts = self.attempt_count, remaining = self.timer.remaining(), "game finished");
        match status {
            GameStatus::Won => self.emit(GameEvent::GameWon),
            GameStatus::Lost(reason) => self.emit(GameEvent::GameLost(reason)),
            GameStatus::Playing => {}
        }
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    pub fn config(&self) -> DifficultyConfig {
        self.config
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.elapsed()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn phase(&self) -> SessionPhase {
        match self.status {
            GameStatus::Won => SessionPhase::Won,
            GameStatus::Lost(reason) => SessionPhase::Lost(reason),
            GameStatus::Playing if self.selection.len() >= 2 => SessionPhase::Resolving,
            GameStatus::Playing => SessionPhase::Playing {
                selected: self.selection.len(),
            },
        }
    }

    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    pub fn pending_resolution(&self) -> Option<ResolutionTicket> {
        self.pending
    }

    pub fn summary(&self) -> GameSummary {
        // Custom tiers rank against the Easy thresholds.
        let level = self.difficulty.map_or(1, Difficulty::level);
        GameSummary::new(
            self.status,
            level,
            (self.matched_count / 2) as u32,
            self.attempt_count,
            self.timer.elapsed(),
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.cards().to_vec(),
            selection: self.selection.clone(),
            attempt_count: self.attempt_count,
            max_attempts: self.config.max_attempts,
            matched_count: self.matched_count,
            remaining_seconds: self.timer.remaining(),
            status: self.status,
            phase: self.phase(),
        }
    }
}

impl<R: Rng> fmt::Debug for GameSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("selection", &self.selection)
            .field("attempt_count", &self.attempt_count)
            .field("matched_count", &self.matched_count)
            .field("remaining_seconds", &self.timer.remaining())
            .field("status", &self.status)
            .field("game_id", &self.game_id)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
