use std::num::NonZero;

use itertools::Itertools;
use strum::VariantArray;

/// Signed cell coordinate. Rows and columns are 1-indexed; values outside
/// the board arise transiently while walking candidate lines.
pub type Coord = isize;

/// Linearized cell position: `(row - 1) * cols + col`. The top-left cell
/// is position 1 and the bottom-right cell is `rows * cols`.
pub type Pos = isize;

/// A positive board extent.
pub type Dimension = NonZero<usize>;

/// A rectangular board, immutable for the lifetime of a puzzle instance.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Board {
    pub(crate) rows: Coord,
    pub(crate) cols: Coord,
}

impl Board {
    /// Construct a board with the given number of rows and columns.
    pub fn new(rows: Dimension, cols: Dimension) -> Self {
        Self { rows: rows.get() as Coord, cols: cols.get() as Coord }
    }

    /// Number of rows.
    pub fn rows(&self) -> Coord {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> Coord {
        self.cols
    }

    /// Total cell count, which is also the largest valid position.
    pub fn cell_count(&self) -> Pos {
        self.rows * self.cols
    }

    /// Recover the coordinates of a linear position.
    pub fn coords(&self, position: Pos) -> Coords {
        let row = (position - 1) / self.cols;
        Coords { row: row + 1, col: position - row * self.cols }
    }
}

/// A 1-indexed cell location.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct Coords {
    /// Row, counted from 1 at the top.
    pub row: Coord,
    /// Column, counted from 1 at the left.
    pub col: Coord,
}

impl Coords {
    /// Manhattan distance to `other`.
    pub fn manhattan_dist(&self, other: Coords) -> Coord {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The cell one step in `dir` from here. May leave the board.
    pub fn step(&self, dir: Dir) -> Coords {
        let (row_offset, col_offset) = dir.offset();
        Coords { row: self.row + row_offset, col: self.col + col_offset }
    }

    /// Linear position of this cell on `board`.
    ///
    /// Defined for out-of-board coordinates too; the result then aliases
    /// into a neighboring row or runs off the index range entirely.
    pub fn position(&self, board: &Board) -> Pos {
        (self.row - 1) * board.cols + self.col
    }

    /// Whether this cell lies on `board`.
    pub fn in_bounds(&self, board: &Board) -> bool {
        self.row > 0 && self.col > 0 && self.row <= board.rows && self.col <= board.cols
    }

    /// In-bounds neighbors, enumerated in the fixed `Dir::VARIANTS` order.
    pub fn neighbors(&self, board: &Board) -> Vec<Coords> {
        Dir::VARIANTS.iter()
            .map(|dir| self.step(*dir))
            .filter(|cell| cell.in_bounds(board))
            .collect_vec()
    }
}

/// The four step directions. The variant order is also the neighbor
/// enumeration order and must stay fixed for reproducible tie-breaking.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Dir {
    /// Toward row 1.
    North,
    /// Toward higher columns.
    East,
    /// Toward higher rows.
    South,
    /// Toward column 1.
    West,
}

impl Dir {
    /// Directions which step toward higher positions, given the row-major
    /// position order.
    pub(crate) const FORWARD_VARIANTS: [Dir; 2] = [Dir::East, Dir::South];

    fn offset(&self) -> (Coord, Coord) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if the two
    /// cells are not adjacent.
    pub fn between(a: Coords, b: Coords) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| a.step(**dir) == b).copied()
    }
}
