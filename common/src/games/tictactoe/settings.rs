use std::time::Duration;

use crate::config::EngineConfig;
use super::types::{OpponentMode, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub opponent_mode: OpponentMode,
    pub engine_player: Player,
    /// Pause between a human move and the engine's reply.
    pub bot_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for TicTacToeSessionSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            opponent_mode: config.opponent_mode,
            engine_player: config.engine_player,
            bot_delay: Duration::from_millis(config.bot_delay_ms),
            seed: config.seed,
        }
    }
}
