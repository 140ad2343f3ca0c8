use super::state::Token;

/// Fatal construction failures. Rejected player input is never an error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    #[display("Invalid difficulty config: {}", _0)]
    InvalidConfig(String),

    #[display("Malformed board: token {:?} appears {} times", token, occurrences)]
    MalformedBoard { token: Token, occurrences: usize },

    #[display("Could not parse difficulty config: {}", _0)]
    ConfigParse(String),
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::ConfigParse(err.to_string())
    }
}
