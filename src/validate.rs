use std::collections::HashMap;

use itertools::Itertools;

use crate::geom::{Board, Pos};
use crate::mask::CellMask;
use crate::puzzle::{ColorId, Line, Point};

/// Classification of a candidate line.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum LineStatus {
    /// The line connects its color's terminals without conflicts.
    Valid,
    /// The line revisits one of its own cells.
    CrossesItself,
    /// The line leaves the board.
    OutOfBounds,
    /// The line enters a cell held by a point of another color.
    TouchesPointOfDifferentColor,
    /// The line's final cell is not its color's other terminal.
    EndsInWrongPlace,
    /// The line enters a cell already taken by another line.
    CrossesOtherLine,
}

/// Outcome of validating a line.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Verdict {
    /// Whether the line is valid.
    pub valid: bool,
    /// Classification; [`Valid`](LineStatus::Valid) if and only if `valid`.
    pub reason: LineStatus,
    /// The 1-based step at which the walk failed, or the line length on
    /// success and on a bad final cell.
    pub index: usize,
}

impl Verdict {
    fn fail(reason: LineStatus, index: usize) -> Self {
        Self { valid: false, reason, index }
    }

    fn pass(length: usize) -> Self {
        Self { valid: true, reason: LineStatus::Valid, index: length }
    }
}

/// Validate `line` against the board and the full point set by linear scan.
///
/// `taken` holds cells already claimed by other committed lines. Checks run
/// per step in a fixed order: taken cell, bounds, self-visit, foreign
/// point; after the walk, the final cell must be the color's other
/// terminal. The taken test reads the linear position before any bounds
/// check, so an off-board step whose position aliases a taken in-board
/// cell reports [`CrossesOtherLine`](LineStatus::CrossesOtherLine).
///
/// Panics if `line` starts on no point or its color is not a pair
/// (malformed input).
pub fn validate(line: &Line, board: &Board, points: &[Point], taken: &CellMask) -> Verdict {
    let starting_point = points.iter()
        .find(|point| point.position == line.start)
        .expect("line starts on no point");
    let same_color = points.iter().filter(|point| point.color == line.color).collect_vec();
    assert!(same_color.len() == 2, "color {} has {} points, want 2", line.color, same_color.len());
    let target = if same_color[0].position == line.start { same_color[1] } else { same_color[0] };

    let mut visited = CellMask::empty(board);
    visited.insert(starting_point.position);

    let mut current = starting_point.coords;
    for (index, step) in line.steps.iter().enumerate() {
        current = current.step(*step);
        let position = current.position(board);
        if taken.contains(position) {
            return Verdict::fail(LineStatus::CrossesOtherLine, index + 1);
        }
        if !current.in_bounds(board) {
            return Verdict::fail(LineStatus::OutOfBounds, index + 1);
        }
        if visited.contains(position) {
            return Verdict::fail(LineStatus::CrossesItself, index + 1);
        }
        if points.iter().any(|point| point.position == position && point.color != starting_point.color) {
            return Verdict::fail(LineStatus::TouchesPointOfDifferentColor, index + 1);
        }
        visited.insert(position);
    }

    if current.position(board) != target.position {
        return Verdict::fail(LineStatus::EndsInWrongPlace, line.len());
    }

    Verdict::pass(line.len())
}

/// Position- and color-keyed lookup tables over a point set, for the
/// indexed validator variant.
pub struct PointIndex {
    by_position: HashMap<Pos, Point>,
    by_color: HashMap<ColorId, Vec<Point>>,
}

impl PointIndex {
    /// Build the tables from `points`.
    pub fn new(points: &[Point]) -> Self {
        Self {
            by_position: points.iter().map(|point| (point.position, *point)).collect(),
            by_color: points.iter().map(|point| (point.color, *point)).into_group_map(),
        }
    }
}

/// Validate `line` using prebuilt lookup tables instead of scanning the
/// point list. Classifies identically to [`validate`] on every input; only
/// the asymptotic cost differs.
pub fn validate_indexed(line: &Line, board: &Board, index: &PointIndex, taken: &CellMask) -> Verdict {
    let starting_point = index.by_position.get(&line.start)
        .expect("line starts on no point");
    let same_color = index.by_color.get(&line.color)
        .expect("line has a color with no points");
    assert!(same_color.len() == 2, "color {} has {} points, want 2", line.color, same_color.len());
    let target = if same_color[0].position == line.start { same_color[1] } else { same_color[0] };

    let mut visited = CellMask::empty(board);
    visited.insert(starting_point.position);

    let mut current = starting_point.coords;
    for (step_index, step) in line.steps.iter().enumerate() {
        current = current.step(*step);
        let position = current.position(board);
        if taken.contains(position) {
            return Verdict::fail(LineStatus::CrossesOtherLine, step_index + 1);
        }
        if !current.in_bounds(board) {
            return Verdict::fail(LineStatus::OutOfBounds, step_index + 1);
        }
        if visited.contains(position) {
            return Verdict::fail(LineStatus::CrossesItself, step_index + 1);
        }
        if index.by_position.contains_key(&position)
            && !same_color.iter().any(|point| point.position == position) {
            return Verdict::fail(LineStatus::TouchesPointOfDifferentColor, step_index + 1);
        }
        visited.insert(position);
    }

    if current.position(board) != target.position {
        return Verdict::fail(LineStatus::EndsInWrongPlace, line.len());
    }

    Verdict::pass(line.len())
}
