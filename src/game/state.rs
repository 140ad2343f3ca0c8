use serde::{Deserialize, Serialize};

/// Identifies one matchable pair-type. The host decides how a token is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Token(pub u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardStatus {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub index: usize,
    pub token: Token,
    pub status: CardStatus,
}

impl Card {
    pub fn new(index: usize, token: Token) -> Self {
        Card {
            index,
            token,
            status: CardStatus::Hidden,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.status == CardStatus::Matched
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    TimeExpired,
    AttemptsExhausted,
}

impl LossReason {
    pub fn message(self) -> &'static str {
        match self {
            LossReason::TimeExpired => "Time is up! You ran out of time.",
            LossReason::AttemptsExhausted => "Game over! You ran out of attempts.",
        }
    }
}

/// Won and Lost are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost(LossReason),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            GameStatus::Playing => None,
            GameStatus::Won => Some("Congratulations! You won!"),
            GameStatus::Lost(reason) => Some(reason.message()),
        }
    }
}

/// Fine-grained view of where a session sits in its select/resolve cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Playing { selected: usize },
    Resolving,
    Won,
    Lost(LossReason),
}
