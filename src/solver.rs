use std::collections::HashSet;

use itertools::Itertools;

use crate::geom::{Coords, Dir};
use crate::mask::CellMask;
use crate::puzzle::{ColorId, Line, Point, Puzzle};

/// One growing stub per terminal. The registry in [`DeductiveSolver`] links
/// each trail to its color partner by index, so completions and merges are
/// index flips rather than pointer rewiring.
struct Trail {
    start: Point,
    target: Point,
    steps: Vec<Dir>,
    // cells entered by steps; the starting cell is not recorded here
    visited: Vec<Coords>,
    frontier: Coords,
    completed: bool,
    removed: bool,
}

impl Trail {
    fn open(start: Point, target: Point) -> Self {
        Self {
            start,
            target,
            steps: Vec::new(),
            visited: Vec::new(),
            frontier: start.coords,
            completed: false,
            removed: false,
        }
    }

    /// The step sequence walked backwards: reversed order, each direction
    /// inverted.
    fn reversed_steps(&self) -> Vec<Dir> {
        self.steps.iter().rev().map(Dir::invert).collect_vec()
    }
}

/// Local constraint propagation over all color pairs at once: any frontier
/// with exactly one legal continuation must take it. Cells freed when a
/// finished pair retires its spare stub can turn previously ambiguous
/// frontiers into forced ones, so sweeps repeat until one changes nothing.
///
/// The engine is deliberately incomplete; a color whose frontiers are never
/// forced stays undrawn. It never guesses, so everything it does draw is a
/// consequence of the puzzle.
pub(crate) struct DeductiveSolver<'a> {
    puzzle: &'a Puzzle,
    trails: Vec<Trail>,
    partner_of: Vec<usize>,
    point_mask: CellMask,
    path_mask: CellMask,
}

impl<'a> DeductiveSolver<'a> {
    /// Set up one trail per terminal of every color not already covered by
    /// an `existing` line. The cells of `existing` lines count as drawn.
    pub(crate) fn new(puzzle: &'a Puzzle, existing: &[Line]) -> Self {
        let board = puzzle.board();
        let drawn: HashSet<ColorId> = existing.iter().map(|line| line.color).collect();

        let mut path_mask = CellMask::empty(board);
        for line in existing {
            for cell in line.trace(board) {
                path_mask.insert(cell.position(board));
            }
        }

        let trails = puzzle.points().iter()
            .filter(|point| !drawn.contains(&point.color))
            .map(|point| Trail::open(*point, puzzle.partner_of(point)))
            .collect_vec();

        let partner_of = trails.iter()
            .map(|trail| trails.iter()
                .position(|other| other.start.position == trail.target.position)
                .expect("terminal without a partner trail"))
            .collect_vec();

        Self {
            puzzle,
            trails,
            partner_of,
            point_mask: puzzle.point_mask(),
            path_mask,
        }
    }

    /// Run sweeps to the fixed point, then harvest completed trails,
    /// ascending by color and within a color by starting position.
    pub(crate) fn run(mut self) -> Vec<Line> {
        while self.sweep() {}

        self.trails.iter()
            .filter(|trail| trail.completed && !trail.steps.is_empty())
            .sorted_by_key(|trail| (trail.start.color, trail.start.position))
            .map(|trail| Line::new(trail.start.color, trail.start.position, trail.steps.clone()))
            .collect_vec()
    }

    /// One pass over the live trails in fixed order. State changes are
    /// visible to trails examined later in the same pass, so a move by an
    /// early trail can force a later one immediately. Returns whether
    /// anything moved.
    fn sweep(&mut self) -> bool {
        let board = self.puzzle.board();
        let mut changed = false;

        for i in 0..self.trails.len() {
            if self.trails[i].completed || self.trails[i].removed {
                continue;
            }

            let frontier = self.trails[i].frontier;
            let target_position = self.trails[i].target.position;
            let partner = self.partner_of[i];
            let partner_frontier_position = self.trails[partner].frontier.position(board);

            // a continuation is legal if the cell is unoccupied, or is this
            // trail's target, or is where the partner's frontier stands
            let legal = frontier.neighbors(board).into_iter()
                .filter(|cell| {
                    let position = cell.position(board);
                    !(self.point_mask.contains(position) || self.path_mask.contains(position))
                        || position == target_position
                        || position == partner_frontier_position
                })
                .collect_vec();
            if legal.len() != 1 {
                // ambiguous or dead; a later sweep may force it
                continue;
            }

            let next = legal[0];
            let position = next.position(board);
            let dir = Dir::between(frontier, next).expect("legal continuation not adjacent");
            self.trails[i].steps.push(dir);

            if position == target_position {
                self.complete(i, next);
            } else if position == partner_frontier_position {
                self.merge(i);
            } else {
                self.trails[i].frontier = next;
                self.trails[i].visited.push(next);
                self.path_mask.insert(position);
            }
            changed = true;
        }

        changed
    }

    /// The frontier reached the trail's own target, finishing the color.
    /// The partner's half-walked stub is no longer needed, so its cells go
    /// back into circulation.
    fn complete(&mut self, i: usize, next: Coords) {
        let board = self.puzzle.board();
        self.trails[i].frontier = next;
        self.trails[i].visited.push(next);
        self.trails[i].completed = true;

        let partner = self.partner_of[i];
        self.trails[partner].removed = true;
        for cell in &self.trails[partner].visited {
            self.path_mask.remove(cell.position(board));
        }

        // the surviving record runs from the lower-positioned terminal
        if self.trails[i].start.position > self.trails[i].target.position {
            let reversed = self.trails[i].reversed_steps();
            let trail = &mut self.trails[i];
            std::mem::swap(&mut trail.start, &mut trail.target);
            trail.steps = reversed;
        }
    }

    /// Two frontiers of one color met. The trail starting from the
    /// lower-positioned terminal keeps the record; the other folds into it
    /// backwards and is dropped.
    fn merge(&mut self, i: usize) {
        let partner = self.partner_of[i];
        let (keeper, folded) = if self.trails[i].start.position < self.trails[partner].start.position {
            (i, partner)
        } else {
            (partner, i)
        };

        let steps_tail = self.trails[folded].reversed_steps();
        self.trails[keeper].steps.extend(steps_tail);
        let visited_tail = self.trails[folded].visited.iter().rev().copied().collect_vec();
        self.trails[keeper].visited.extend(visited_tail);

        self.trails[keeper].completed = true;
        self.trails[folded].removed = true;
    }
}
