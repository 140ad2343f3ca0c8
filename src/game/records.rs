use serde::{Deserialize, Serialize};

use super::state::GameStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    C,
    B,
    A,
    S,
}

impl Rank {
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::S => "S",
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "S" => Some(Rank::S),
            "A" => Some(Rank::A),
            "B" => Some(Rank::B),
            "C" => Some(Rank::C),
            _ => None,
        }
    }
}

pub fn rank_for_precision(level: u8, precision_pct: u8) -> Rank {
    if precision_pct >= 100 {
        return Rank::S;
    }
    let (a_threshold, b_threshold) = match level.clamp(1, 3) {
        1 => (85, 70),
        2 => (90, 80),
        _ => (88, 75),
    };
    if precision_pct >= a_threshold {
        Rank::A
    } else if precision_pct >= b_threshold {
        Rank::B
    } else {
        Rank::C
    }
}

/// Share of resolved pairs that matched, in percent rounded half up. 100 before
/// anything resolves.
pub fn precision_pct(matches: u32, mismatches: u32) -> u8 {
    let total = matches.saturating_add(mismatches);
    if total == 0 {
        return 100;
    }
    let total = u64::from(total);
    ((u64::from(matches) * 100 + total / 2) / total) as u8
}

pub fn format_mm_ss(total_secs: u32) -> String {
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub outcome: GameStatus,
    pub matches: u32,
    pub mismatches: u32,
    pub elapsed_secs: u32,
    pub precision_pct: u8,
    pub rank: Rank,
}

impl GameSummary {
    pub fn new(outcome: GameStatus, level: u8, matches: u32, mismatches: u32, elapsed_secs: u32) -> Self {
        let precision = precision_pct(matches, mismatches);
        GameSummary {
            outcome,
            matches,
            mismatches,
            elapsed_secs,
            precision_pct: precision,
            rank: rank_for_precision(level, precision),
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        self.outcome.message()
    }

    pub fn stats_text(&self) -> String {
        format!(
            "Time: {}\nPrecision: {}%\nRank: {}",
            format_mm_ss(self.elapsed_secs),
            self.precision_pct,
            self.rank.as_str()
        )
    }
}
