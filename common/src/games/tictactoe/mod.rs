mod board;
mod bot_controller;
mod game_state;
mod heuristic;
mod minimax;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, calculate_move};
pub use game_state::{GameSnapshot, SessionPhase, TicTacToeGameState};
pub use heuristic::{blocking_move, fallback_move, first_move, heuristic_move};
pub use minimax::{best_move, minimax};
pub use session::TicTacToeSession;
pub use settings::TicTacToeSessionSettings;
pub use types::{BOARD_SIZE, GameStatus, Mark, OpponentMode, Player, WIN_PATTERNS, WinningLine};
pub use win_detector::{check_win, check_win_with_line, evaluate};
