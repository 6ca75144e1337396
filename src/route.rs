use std::collections::HashSet;

use petgraph::algo::astar;
use petgraph::graphmap::UnGraphMap;

use crate::geom::{Board, Coords, Dir};
use crate::mask::CellMask;
use crate::puzzle::{ColorId, Line, Point, Puzzle};

/// How a color pair stands given the lines drawn so far.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Connectivity {
    /// A drawn line already joins the pair.
    Connected,
    /// No line yet, but an unobstructed route still exists.
    Connectable,
    /// Every route is walled off.
    Unconnectable,
}

/// Graph of the open cells, i.e. those not in `blocked`, with an edge
/// between every 4-adjacent open pair.
fn open_grid(board: &Board, blocked: &CellMask) -> UnGraphMap<Coords, ()> {
    // naively allocate for a fully open grid, which usually isn't too far off
    let mut graph = UnGraphMap::with_capacity(
        board.cell_count() as usize,
        (2 * board.cell_count() - board.rows() - board.cols()) as usize,
    );

    for row in 1..=board.rows() {
        for col in 1..=board.cols() {
            let cell = Coords { row, col };
            if blocked.contains(cell.position(board)) {
                continue;
            }

            graph.add_node(cell);
            // add edges down and to the right, if possible
            for dir in Dir::FORWARD_VARIANTS {
                let neighbor = cell.step(dir);
                if neighbor.in_bounds(board) && !blocked.contains(neighbor.position(board)) {
                    graph.add_edge(cell, neighbor, ());
                }
            }
        }
    }

    graph
}

/// Find a shortest unobstructed route between the two terminals of a color,
/// or [`None`] if every route is cut off. A negative answer is a domain
/// result for the caller, not an error.
///
/// The terminals' own cells are freed from `blocked` for the duration of
/// the search; whatever membership each had before the call is restored
/// afterwards, whether or not a route exists.
pub fn route_between(a: &Point, b: &Point, board: &Board, blocked: &mut CellMask) -> Option<Vec<Coords>> {
    let had_a = blocked.contains(a.position);
    let had_b = blocked.contains(b.position);
    if had_a {
        blocked.remove(a.position);
    }
    if had_b {
        blocked.remove(b.position);
    }

    let graph = open_grid(board, blocked);
    let goal = b.coords;
    let found = astar(&graph, a.coords, |cell| cell == goal, |_| 1, |cell| cell.manhattan_dist(goal));

    if had_a {
        blocked.insert(a.position);
    }
    if had_b {
        blocked.insert(b.position);
    }

    found.map(|(_, route)| route)
}

/// Occupancy of the terminal points plus every cell of every drawn line.
pub fn occupied_mask(puzzle: &Puzzle, lines: &[Line]) -> CellMask {
    let board = puzzle.board();
    let mut mask = puzzle.point_mask();
    for line in lines {
        for cell in line.trace(board) {
            mask.insert(cell.position(board));
        }
    }

    mask
}

/// Classify every color of `puzzle` given the `lines` drawn so far,
/// ascending by color: drawn colors are
/// [`Connected`](Connectivity::Connected), the rest are probed with
/// [`route_between`].
pub fn classify(puzzle: &Puzzle, lines: &[Line]) -> Vec<(ColorId, Connectivity)> {
    let drawn: HashSet<ColorId> = lines.iter().map(|line| line.color).collect();
    let mut blocked = occupied_mask(puzzle, lines);

    puzzle.colors().into_iter()
        .map(|color| {
            let connectivity = if drawn.contains(&color) {
                Connectivity::Connected
            } else {
                let pair = puzzle.pair(color);
                match route_between(&pair.0, &pair.1, puzzle.board(), &mut blocked) {
                    Some(_) => Connectivity::Connectable,
                    None => Connectivity::Unconnectable,
                }
            };

            (color, connectivity)
        })
        .collect()
}
