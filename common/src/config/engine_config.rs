use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{OpponentMode, Player};
use super::Validate;

pub const MAX_BOT_DELAY_MS: u64 = 10_000;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    pub opponent_mode: OpponentMode,
    pub engine_player: Player,
    pub bot_delay_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot_delay_ms ({}) must not exceed {}",
                self.bot_delay_ms, MAX_BOT_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opponent_mode: OpponentMode::Optimal,
            engine_player: Player::X,
            bot_delay_ms: 500,
            seed: None,
        }
    }
}
