use std::fmt;

use crate::error::{GameError, GameResult};
use super::types::{BOARD_SIZE, Mark, Player};

/// 3x3 grid stored row-major, plus the number of marks placed so far.
///
/// `Board` is `Copy`, so engines simulate moves on their own copies and the
/// session's board is never observed in a half-applied state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Mark; BOARD_SIZE],
    move_count: u8,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw cells. The alternation invariant is not checked,
    /// which lets callers set up positions that legal play never reaches.
    pub fn from_cells(cells: [Mark; BOARD_SIZE]) -> Self {
        let move_count = cells.iter().filter(|&&cell| cell != Mark::Empty).count() as u8;
        Self { cells, move_count }
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn move_count(&self) -> usize {
        self.move_count as usize
    }

    pub fn is_empty(&self, index: usize) -> bool {
        self.cell(index) == Some(Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.move_count() == BOARD_SIZE
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Player whose turn it is under strict alternation with O first.
    pub fn side_to_move(&self) -> Player {
        if self.count(Mark::O) > self.count(Mark::X) {
            Player::X
        } else {
            Player::O
        }
    }

    pub fn place(&mut self, index: usize, player: Player) -> GameResult<()> {
        if !self.is_empty(index) {
            return Err(GameError::IllegalMove { index });
        }
        self.cells[index] = player.mark();
        self.move_count += 1;
        Ok(())
    }

    /// Copy of the board with `player`'s mark at `index`.
    pub fn with_move(&self, index: usize, player: Player) -> GameResult<Board> {
        let mut next = *self;
        next.place(index, player)?;
        Ok(next)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(3).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for (col_index, cell) in row.iter().enumerate() {
                if col_index > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
