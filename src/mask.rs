use ndarray::Array2;

use crate::geom::{Board, Pos};

/// A set of board cells addressed by linear position, backed by a flat
/// boolean grid sized to the board.
#[derive(Clone, Debug)]
pub struct CellMask {
    cells: Array2<bool>,
}

impl CellMask {
    /// An empty mask sized to `board`.
    pub fn empty(board: &Board) -> Self {
        Self { cells: Array2::from_elem((board.rows() as usize, board.cols() as usize), false) }
    }

    fn slot(&self, position: Pos) -> Option<(usize, usize)> {
        if position < 1 || position > self.cells.len() as Pos {
            return None;
        }

        let index = (position - 1) as usize;
        Some((index / self.cells.ncols(), index % self.cells.ncols()))
    }

    /// Membership test. Positions off the index range are never members;
    /// out-of-board coordinates whose linear position aliases into the
    /// range answer for the aliased cell.
    pub fn contains(&self, position: Pos) -> bool {
        self.slot(position).is_some_and(|slot| self.cells[slot])
    }

    /// Mark `position` as occupied.
    pub fn insert(&mut self, position: Pos) {
        let slot = self.slot(position).expect("position off the board");
        self.cells[slot] = true;
    }

    /// Mark `position` as free.
    pub fn remove(&mut self, position: Pos) {
        let slot = self.slot(position).expect("position off the board");
        self.cells[slot] = false;
    }
}
