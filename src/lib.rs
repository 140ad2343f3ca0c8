//! Tile-matching memory game core.
//!
//! A board of face-down tokens is revealed two cards at a time. Pairs either match
//! or flip back, bounded by an attempt limit and a countdown timer. The host drives
//! a [`GameSession`] through `select_card`, `tick` and `reset`, and renders the
//! [`GameEvent`]s it emits.

pub mod game;

pub use game::board::{Board, generate};
pub use game::difficulty::{Difficulty, DifficultyConfig, LEVEL_OPTIONS, difficulty_from_level};
pub use game::driver::{SessionDriver, TICK_MS};
pub use game::error::GameError;
pub use game::events::{EventLog, GameEvent, GameListener, TracingListener};
pub use game::records::{GameSummary, Rank, rank_for_precision};
pub use game::session::{GameSession, PAIR_REVEAL_MS, ResolutionTicket};
pub use game::snapshot::Snapshot;
pub use game::state::{Card, CardStatus, GameStatus, LossReason, SessionPhase, Token};
pub use game::timer::{Countdown, CountdownTick};
