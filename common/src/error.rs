use thiserror::Error;

use crate::games::tictactoe::Player;

/// Rejections raised by the board, the engines and the session controller.
///
/// None of them are fatal: a rejected operation leaves the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell {index} is occupied or outside the board")]
    IllegalMove { index: usize },

    #[error("it is not player {player}'s turn")]
    TurnViolation { player: Player },

    #[error("no moves available")]
    NoMovesAvailable,

    #[error("game is already over")]
    GameFinished,
}

/// Errors raised while loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(serde_yaml_ng::Error),

    #[error("failed to deserialize config: {0}")]
    Deserialize(serde_yaml_ng::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

pub type GameResult<T> = Result<T, GameError>;
