use crate::error::{GameError, GameResult};
use crate::games::SessionRng;
use super::board::Board;
use super::types::{Mark, Player, WIN_PATTERNS};

pub fn first_move(board: &Board, rng: &mut SessionRng) -> GameResult<usize> {
    random_move(board, rng)
}

pub fn fallback_move(board: &Board, rng: &mut SessionRng) -> GameResult<usize> {
    random_move(board, rng)
}

/// Cell that stops `opponent` from completing a line on their next move.
///
/// Patterns are scanned in table order and the first open threat wins.
pub fn blocking_move(board: &Board, opponent: Player) -> Option<usize> {
    let opponent_mark = opponent.mark();
    let cells = board.cells();

    WIN_PATTERNS.iter().find_map(|pattern| {
        let owned = pattern.iter().filter(|&&i| cells[i] == opponent_mark).count();
        let empty = pattern.iter().find(|&&i| cells[i] == Mark::Empty);
        match (owned, empty) {
            (2, Some(&index)) => Some(index),
            _ => None,
        }
    })
}

/// One heuristic turn for `bot_player`: random opening, otherwise block, otherwise random.
pub fn heuristic_move(
    board: &Board,
    bot_player: Player,
    is_first_move: bool,
    rng: &mut SessionRng,
) -> GameResult<usize> {
    if is_first_move {
        return first_move(board, rng);
    }
    match blocking_move(board, bot_player.opponent()) {
        Some(index) => Ok(index),
        None => fallback_move(board, rng),
    }
}

fn random_move(board: &Board, rng: &mut SessionRng) -> GameResult<usize> {
    let available_moves = board.available_moves();
    rng.choose(&available_moves)
        .copied()
        .ok_or(GameError::NoMovesAvailable)
}
