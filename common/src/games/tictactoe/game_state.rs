use crate::error::{GameError, GameResult};
use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::settings::TicTacToeSessionSettings;
use super::types::{GameStatus, OpponentMode, Player, WinningLine};
use super::win_detector::{check_win_with_line, evaluate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingMove(Player),
    Finished(GameStatus),
}

/// Read-only copy of the game handed to whoever renders it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub status: GameStatus,
    pub current_player: Player,
    pub last_move: Option<usize>,
    pub winning_line: Option<WinningLine>,
    pub opponent_mode: OpponentMode,
    pub engine_player: Player,
}

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    last_move: Option<usize>,
    opponent_mode: OpponentMode,
    engine_player: Player,
    is_first_engine_move: bool,
}

impl TicTacToeGameState {
    pub fn new(settings: &TicTacToeSessionSettings) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::FIRST,
            status: GameStatus::InProgress,
            last_move: None,
            opponent_mode: settings.opponent_mode,
            engine_player: settings.engine_player,
            is_first_engine_move: true,
        }
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Player::FIRST;
        self.status = GameStatus::InProgress;
        self.last_move = None;
        self.is_first_engine_move = true;
    }

    /// Switches the opponent for the next game and starts it.
    pub fn configure(&mut self, opponent_mode: OpponentMode) {
        self.opponent_mode = opponent_mode;
        self.reset();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn opponent_mode(&self) -> OpponentMode {
        self.opponent_mode
    }

    pub fn engine_player(&self) -> Player {
        self.engine_player
    }

    pub fn is_first_engine_move(&self) -> bool {
        self.is_first_engine_move
    }

    pub fn phase(&self) -> SessionPhase {
        if self.status.is_terminal() {
            SessionPhase::Finished(self.status)
        } else {
            SessionPhase::AwaitingMove(self.current_player)
        }
    }

    pub fn is_engine_turn(&self) -> bool {
        self.opponent_mode != OpponentMode::None
            && self.status == GameStatus::InProgress
            && self.current_player == self.engine_player
    }

    /// Human side to move, if any. In human-vs-human games this is always the
    /// current player.
    pub fn human_to_move(&self) -> Option<Player> {
        if self.status.is_terminal() || self.is_engine_turn() {
            None
        } else {
            Some(self.current_player)
        }
    }

    pub fn available_moves(&self) -> Vec<usize> {
        if self.status.is_terminal() {
            Vec::new()
        } else {
            self.board.available_moves()
        }
    }

    /// Places a move for a human. The engine's turn is never open to humans.
    pub fn submit_move(&mut self, player: Player, index: usize) -> GameResult<GameStatus> {
        if self.status.is_terminal() {
            return Err(GameError::GameFinished);
        }
        if self.is_engine_turn() {
            return Err(GameError::TurnViolation { player });
        }
        self.place_mark(player, index)
    }

    /// Asks the configured engine for a move and applies it.
    pub fn play_engine_move(&mut self, rng: &mut SessionRng) -> GameResult<usize> {
        if self.status.is_terminal() {
            return Err(GameError::GameFinished);
        }
        if !self.is_engine_turn() {
            return Err(GameError::TurnViolation {
                player: self.engine_player,
            });
        }

        let input = BotInput::from_game_state(self);
        let index = calculate_move(self.opponent_mode, &input, rng)?;
        self.place_mark(self.engine_player, index)?;
        self.is_first_engine_move = false;
        Ok(index)
    }

    fn place_mark(&mut self, player: Player, index: usize) -> GameResult<GameStatus> {
        if self.status.is_terminal() {
            return Err(GameError::GameFinished);
        }
        if player != self.current_player {
            return Err(GameError::TurnViolation { player });
        }

        self.board.place(index, player)?;
        self.last_move = Some(index);
        self.status = evaluate(&self.board);

        if self.status == GameStatus::InProgress {
            self.current_player = self.current_player.opponent();
        }

        Ok(self.status)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            status: self.status,
            current_player: self.current_player,
            last_move: self.last_move,
            winning_line: check_win_with_line(&self.board),
            opponent_mode: self.opponent_mode,
            engine_player: self.engine_player,
        }
    }
}
