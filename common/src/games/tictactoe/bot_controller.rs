use crate::error::{GameError, GameResult};
use crate::games::SessionRng;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::heuristic::heuristic_move;
use super::minimax::best_move;
use super::types::{OpponentMode, Player};

pub struct BotInput {
    pub board: Board,
    pub bot_player: Player,
    pub is_first_move: bool,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            bot_player: state.current_player(),
            is_first_move: state.is_first_engine_move(),
        }
    }
}

/// Picks the engine's move for the configured opponent mode.
///
/// `OpponentMode::None` has no engine, so asking it for a move is a turn violation.
pub fn calculate_move(
    mode: OpponentMode,
    input: &BotInput,
    rng: &mut SessionRng,
) -> GameResult<usize> {
    match mode {
        OpponentMode::Optimal => best_move(&input.board, input.bot_player),
        OpponentMode::Heuristic => {
            heuristic_move(&input.board, input.bot_player, input.is_first_move, rng)
        }
        OpponentMode::None => Err(GameError::TurnViolation {
            player: input.bot_player,
        }),
    }
}
