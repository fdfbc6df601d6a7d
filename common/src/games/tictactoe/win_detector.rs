use super::board::Board;
use super::types::{GameStatus, Mark, Player, WIN_PATTERNS, WinningLine};

pub fn check_win(board: &Board) -> Option<Player> {
    check_win_with_line(board).map(|line| line.player)
}

/// First completed line in pattern order, if any.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    for pattern in WIN_PATTERNS {
        let [a, b, c] = pattern;
        let mark = cells[a];
        if mark == Mark::Empty {
            continue;
        }
        if cells[b] == mark && cells[c] == mark {
            return mark.player().map(|player| WinningLine::new(player, pattern));
        }
    }
    None
}

pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(winner) = check_win(board) {
        return GameStatus::Won(winner);
    }
    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
