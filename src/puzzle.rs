use std::collections::HashMap;

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::geom::{Board, Coords, Dir, Pos};
use crate::mask::CellMask;
use crate::solver::DeductiveSolver;

/// Identifier of a color pair. 0 is reserved for "no color"; well-formed
/// puzzles use 1 and up.
pub type ColorId = usize;

/// A fixed, colored terminal cell. Exactly two points carry each color.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Point {
    /// Linear position of the cell holding this point.
    pub position: Pos,
    /// The color pair this point belongs to.
    pub color: ColorId,
    /// Coordinates of `position`, derived once at construction.
    pub coords: Coords,
}

impl Point {
    /// Construct a point at `position`, deriving its coordinates from `board`.
    pub fn new(position: Pos, color: ColorId, board: &Board) -> Self {
        Self { position, color, coords: board.coords(position) }
    }
}

/// A drawn or candidate path: a starting cell and an ordered step sequence.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Line {
    /// The color this line connects.
    pub color: ColorId,
    /// Linear position of the starting cell.
    pub start: Pos,
    /// Steps taken from the starting cell, in order.
    pub steps: Vec<Dir>,
}

impl Line {
    /// Construct a line from its starting position and step sequence.
    pub fn new(color: ColorId, start: Pos, steps: Vec<Dir>) -> Self {
        Self { color, start, steps }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the line has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every cell this line touches, starting cell included, in walk order.
    pub fn trace(&self, board: &Board) -> Vec<Coords> {
        let mut cells = Vec::with_capacity(self.steps.len() + 1);
        let mut current = board.coords(self.start);
        cells.push(current);
        for step in &self.steps {
            current = current.step(*step);
            cells.push(current);
        }

        cells
    }
}

/// A puzzle instance: a board and the terminal points on it.
///
/// Build one with a [`PuzzleBuilder`](crate::builder::PuzzleBuilder), or
/// assemble loader output directly with [`Puzzle::from_parts`].
pub struct Puzzle {
    pub(crate) board: Board,
    pub(crate) points: Vec<Point>,
    pub(crate) color_displays: HashMap<ColorId, char>,
}

impl Puzzle {
    /// Assemble a puzzle from already-constructed parts. Display characters
    /// for rendering are assigned 'A' and up by ascending color.
    ///
    /// Panics on malformed input: a point off the board, two points sharing
    /// a cell, or a color with other than exactly two points.
    pub fn from_parts(board: Board, points: Vec<Point>) -> Self {
        for point in &points {
            assert!(point.coords.in_bounds(&board), "point at position {} is off the board", point.position);
        }
        assert!(points.iter().map(|point| point.position).all_unique(), "two points share a cell");

        let by_color = points.iter().map(|point| (point.color, *point)).into_group_map();
        for (color, members) in &by_color {
            assert!(members.len() == 2, "color {} has {} points, want 2", color, members.len());
        }

        let color_displays = by_color.keys().sorted().enumerate()
            .map(|(index, color)| (*color, (b'A' + (index % 26) as u8) as char))
            .collect();

        Self { board, points, color_displays }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All terminal points, in construction order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Distinct colors, ascending.
    pub fn colors(&self) -> Vec<ColorId> {
        self.points.iter().map(|point| point.color).unique().sorted().collect_vec()
    }

    /// The two terminals of `color`.
    pub fn pair(&self, color: ColorId) -> UnorderedPair<Point> {
        let members = self.points.iter().filter(|point| point.color == color).collect_vec();
        assert!(members.len() == 2, "color {} has {} points, want 2", color, members.len());
        UnorderedPair(*members[0], *members[1])
    }

    /// The same-colored partner of `point`.
    pub(crate) fn partner_of(&self, point: &Point) -> Point {
        let UnorderedPair(a, b) = self.pair(point.color);
        if a.position == point.position { b } else { a }
    }

    /// Occupancy of the terminal points; static for the puzzle's lifetime.
    pub fn point_mask(&self) -> CellMask {
        let mut mask = CellMask::empty(&self.board);
        for point in &self.points {
            mask.insert(point.position);
        }

        mask
    }

    /// Deduce forced lines on an otherwise empty board.
    /// Shorthand for [`solve_with`](Puzzle::solve_with) and no drawn lines.
    pub fn solve(&self) -> Vec<Line> {
        self.solve_with(&[])
    }

    /// Deduce forced lines, deferring to the crate's propagation engine.
    /// The cells of `existing` lines are unavailable throughout and their
    /// colors are left alone.
    ///
    /// Returns only newly deduced lines, ascending by color and, within a
    /// color, by starting position. Colors with no forced route are absent;
    /// that is an accepted outcome, not an error.
    pub fn solve_with(&self, existing: &[Line]) -> Vec<Line> {
        DeductiveSolver::new(self, existing).run()
    }
}
