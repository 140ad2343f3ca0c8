use serde::{Deserialize, Serialize};

use super::state::{Card, CardStatus, GameStatus, SessionPhase};

/// Read-only copy of a session for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Vec<Card>,
    pub selection: Vec<usize>,
    pub attempt_count: u32,
    pub max_attempts: u32,
    pub matched_count: usize,
    pub remaining_seconds: u32,
    pub status: GameStatus,
    pub phase: SessionPhase,
}

impl Snapshot {
    pub fn board_size(&self) -> usize {
        self.board.len()
    }

    pub fn attempts_label(&self) -> String {
        format!("Attempts: {}/{}", self.attempt_count, self.max_attempts)
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.board
            .get(index)
            .is_some_and(|card| card.status != CardStatus::Hidden)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
