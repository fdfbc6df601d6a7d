use crate::error::{GameError, GameResult};
use super::board::Board;
use super::types::{GameStatus, Player};
use super::win_detector::evaluate;

const WIN_SCORE: i32 = 10;

/// Best move for `bot_player` assuming the opponent also plays perfectly.
///
/// Root moves are tried in ascending index order and only a strictly better
/// score replaces the current best, so ties go to the lowest index.
pub fn best_move(board: &Board, bot_player: Player) -> GameResult<usize> {
    let available_moves = board.available_moves();
    if available_moves.is_empty() {
        return Err(GameError::NoMovesAvailable);
    }

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in available_moves {
        let child = board.with_move(index, bot_player)?;
        let score = minimax(
            &child,
            bot_player,
            bot_player.opponent(),
            i32::MIN,
            i32::MAX,
            0,
        );

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move.ok_or(GameError::NoMovesAvailable)
}

/// Alpha-beta minimax score of `board` from `bot_player`'s point of view,
/// with `to_move` about to play.
///
/// Wins are worth `10 - depth` so faster wins and slower losses are preferred.
pub fn minimax(
    board: &Board,
    bot_player: Player,
    to_move: Player,
    mut alpha: i32,
    mut beta: i32,
    depth: i32,
) -> i32 {
    match evaluate(board) {
        GameStatus::Won(winner) if winner == bot_player => return WIN_SCORE - depth,
        GameStatus::Won(_) => return -(WIN_SCORE - depth),
        GameStatus::Draw => return 0,
        GameStatus::InProgress => {}
    }

    let is_maximizing = to_move == bot_player;
    let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

    for index in board.available_moves() {
        let Ok(child) = board.with_move(index, to_move) else {
            continue;
        };
        let eval = minimax(&child, bot_player, to_move.opponent(), alpha, beta, depth + 1);

        if is_maximizing {
            best = best.max(eval);
            alpha = alpha.max(eval);
        } else {
            best = best.min(eval);
            beta = beta.min(eval);
        }

        if beta <= alpha {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark::{Empty as E, O, X};
    use proptest::prelude::*;

    /// Same search without pruning.
    fn plain_minimax(board: &Board, bot_player: Player, to_move: Player, depth: i32) -> i32 {
        match evaluate(board) {
            GameStatus::Won(winner) if winner == bot_player => return WIN_SCORE - depth,
            GameStatus::Won(_) => return -(WIN_SCORE - depth),
            GameStatus::Draw => return 0,
            GameStatus::InProgress => {}
        }

        let scores = board.available_moves().into_iter().map(|index| {
            let child = board.with_move(index, to_move).unwrap();
            plain_minimax(&child, bot_player, to_move.opponent(), depth + 1)
        });

        if to_move == bot_player {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn play(moves: &[usize]) -> Board {
        let mut board = Board::new();
        let mut player = Player::O;
        for &index in moves {
            board.place(index, player).unwrap();
            player = player.opponent();
        }
        board
    }

    #[test]
    fn test_best_move_on_full_board_fails() {
        let board = Board::from_cells([O, X, O, O, X, X, X, O, O]);
        assert_eq!(best_move(&board, Player::X), Err(GameError::NoMovesAvailable));
    }

    #[test]
    fn test_takes_immediate_win() {
        // X to move with 6 and 7 taken: 8 completes the bottom row.
        let board = Board::from_cells([O, O, E, E, O, E, X, X, E]);
        assert_eq!(best_move(&board, Player::X), Ok(8));
    }

    #[test]
    fn test_prefers_win_over_block() {
        // O threatens 2, X can win at 5.
        let board = Board::from_cells([O, O, E, X, X, E, E, E, O]);
        assert_eq!(best_move(&board, Player::X), Ok(5));
    }

    #[test]
    fn test_blocks_open_row() {
        let board = play(&[0, 4, 1]);
        assert_eq!(best_move(&board, Player::X), Ok(2));
    }

    #[test]
    fn test_answers_corner_opening_with_center() {
        let board = play(&[0]);
        assert_eq!(best_move(&board, Player::X), Ok(4));
    }

    #[test]
    fn test_does_not_mutate_input() {
        let board = play(&[0, 4, 8]);
        let before = board;
        best_move(&board, Player::X).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_terminal_scores_prefer_fast_wins() {
        let won = Board::from_cells([X, X, X, O, O, E, O, E, E]);
        assert_eq!(minimax(&won, Player::X, Player::O, i32::MIN, i32::MAX, 0), 10);
        assert_eq!(minimax(&won, Player::X, Player::O, i32::MIN, i32::MAX, 3), 7);
        assert_eq!(minimax(&won, Player::O, Player::O, i32::MIN, i32::MAX, 3), -7);
    }

    #[test]
    fn test_draw_scores_zero() {
        let board = Board::from_cells([O, X, O, O, X, X, X, O, O]);
        assert_eq!(minimax(&board, Player::O, Player::X, i32::MIN, i32::MAX, 0), 0);
    }

    #[test]
    fn test_empty_board_value_is_draw() {
        let board = Board::new();
        assert_eq!(minimax(&board, Player::O, Player::O, i32::MIN, i32::MAX, 0), 0);
    }

    #[test]
    fn test_self_play_ends_in_draw() {
        let mut board = Board::new();
        let mut player = Player::O;
        while evaluate(&board) == GameStatus::InProgress {
            let index = best_move(&board, player).unwrap();
            board.place(index, player).unwrap();
            player = player.opponent();
        }
        assert_eq!(evaluate(&board), GameStatus::Draw);
    }

    #[test]
    fn test_pruned_matches_plain_on_openings() {
        for first in 0..9 {
            let board = play(&[first]);
            assert_eq!(
                minimax(&board, Player::X, Player::X, i32::MIN, i32::MAX, 1),
                plain_minimax(&board, Player::X, Player::X, 1),
                "opening {}",
                first
            );
        }
    }

    /// Reachable position: a random prefix of legal moves, stopping early if
    /// someone wins.
    fn arb_reachable_board() -> impl Strategy<Value = Board> {
        (Just((0..9).collect::<Vec<usize>>()).prop_shuffle(), 2usize..9).prop_map(
            |(order, len)| {
                let mut board = Board::new();
                let mut player = Player::O;
                for &index in order.iter().take(len) {
                    if evaluate(&board).is_terminal() {
                        break;
                    }
                    board.place(index, player).unwrap();
                    player = player.opponent();
                }
                board
            },
        )
    }

    proptest! {
        #[test]
        fn prop_pruning_does_not_change_score(board in arb_reachable_board(), bot_is_o in any::<bool>()) {
            let bot_player = if bot_is_o { Player::O } else { Player::X };
            let to_move = board.side_to_move();
            let depth = board.move_count() as i32;
            prop_assert_eq!(
                minimax(&board, bot_player, to_move, i32::MIN, i32::MAX, depth),
                plain_minimax(&board, bot_player, to_move, depth)
            );
        }

        #[test]
        fn prop_best_move_is_legal_and_non_mutating(board in arb_reachable_board()) {
            prop_assume!(!evaluate(&board).is_terminal());
            let before = board;
            let index = best_move(&board, board.side_to_move()).unwrap();
            prop_assert!(board.is_empty(index));
            prop_assert_eq!(board, before);
        }
    }
}
