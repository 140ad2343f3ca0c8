use serde::{Deserialize, Serialize};

use super::error::GameError;

pub const LEVEL_OPTIONS: [(&str, u8); 3] = [("Easy", 1), ("Normal", 2), ("Hard", 3)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn config(self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig::new(6, 20, 90),
            Difficulty::Normal => DifficultyConfig::new(8, 16, 90),
            Difficulty::Hard => DifficultyConfig::new(10, 12, 60),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

pub fn difficulty_from_level(level: u8) -> Difficulty {
    match level.clamp(1, 3) {
        1 => Difficulty::Easy,
        2 => Difficulty::Normal,
        _ => Difficulty::Hard,
    }
}

/// Per-tier game parameters. The board holds `token_count * 2` cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub token_count: usize,
    pub max_attempts: u32,
    pub time_limit_secs: u32,
}

impl DifficultyConfig {
    pub const fn new(token_count: usize, max_attempts: u32, time_limit_secs: u32) -> Self {
        DifficultyConfig {
            token_count,
            max_attempts,
            time_limit_secs,
        }
    }

    pub fn board_size(&self) -> usize {
        self.token_count.saturating_mul(2)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.token_count == 0 {
            return Err(GameError::InvalidConfig("token_count must be positive".into()));
        }
        if self.token_count > usize::from(u16::MAX) {
            return Err(GameError::InvalidConfig(format!(
                "token_count {} exceeds {}",
                self.token_count,
                u16::MAX
            )));
        }
        if self.max_attempts == 0 {
            return Err(GameError::InvalidConfig("max_attempts must be positive".into()));
        }
        if self.time_limit_secs == 0 {
            return Err(GameError::InvalidConfig("time_limit_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn from_json(raw: &str) -> Result<Self, GameError> {
        let config: DifficultyConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}

impl From<Difficulty> for DifficultyConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}
