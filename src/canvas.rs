use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::mask::CellMask;
use crate::puzzle::{Line, Puzzle};
use crate::validate::{validate_indexed, PointIndex, Verdict};

/// Accumulates committed lines over a puzzle. Each candidate is validated
/// against the cells taken so far and claims them only if it passes, so a
/// canvas never holds two lines through one cell.
pub struct Canvas<'a> {
    puzzle: &'a Puzzle,
    index: PointIndex,
    taken: CellMask,
    committed: Vec<Line>,
}

impl<'a> Canvas<'a> {
    /// An empty canvas over `puzzle`.
    pub fn new(puzzle: &'a Puzzle) -> Self {
        Self {
            puzzle,
            index: PointIndex::new(puzzle.points()),
            taken: CellMask::empty(puzzle.board()),
            committed: Vec::new(),
        }
    }

    /// Validate `line` against the board and the cells taken so far; if it
    /// is valid, claim its cells. Returns the verdict either way.
    pub fn try_commit(&mut self, line: &Line) -> Verdict {
        let board = self.puzzle.board();
        let verdict = validate_indexed(line, board, &self.index, &self.taken);
        if verdict.valid {
            for cell in line.trace(board) {
                self.taken.insert(cell.position(board));
            }
            self.committed.push(line.clone());
        }

        verdict
    }

    /// Lines committed so far, in commit order.
    pub fn lines(&self) -> &[Line] {
        &self.committed
    }
}

impl Display for Canvas<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let board = self.puzzle.board();
        let mut grid = Array2::from_elem((board.rows() as usize, board.cols() as usize), '.');

        for line in &self.committed {
            let display = self.puzzle.color_displays[&line.color];
            for cell in line.trace(board) {
                grid[[(cell.row - 1) as usize, (cell.col - 1) as usize]] = display.to_ascii_lowercase();
            }
        }
        for point in self.puzzle.points() {
            let display = self.puzzle.color_displays[&point.color];
            grid[[(point.coords.row - 1) as usize, (point.coords.col - 1) as usize]] = display.to_ascii_uppercase();
        }

        let mut out = String::with_capacity(grid.nrows() * (grid.ncols() + 1));
        for row in grid.rows() {
            for cell in row {
                out.push(*cell);
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
