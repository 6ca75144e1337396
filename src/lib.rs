#![warn(missing_docs)]

//! # `capillary`
//!
//! A deduction toolkit for [Numberlink](https://en.wikipedia.org/wiki/Numberlink)-style
//! path puzzles as posited in the mobile game Flow Free: pairs of same-colored
//! terminal points on a rectangular board, to be joined by non-crossing
//! 4-connected lines.
//! Build a [`Puzzle`] using a [`PuzzleBuilder`](builder::PuzzleBuilder), or
//! assemble one from loader output with [`Puzzle::from_parts`]; then call
//! [`Puzzle::solve`] for the forced lines, [`validate`] to judge candidate
//! lines, or [`route_between`] and [`classify`] to probe whether pairs can
//! still be joined.
//!
//! # Internals
//! Unlike SAT- or backtracking-based solvers, the solver here is a local
//! constraint-propagation engine. It keeps one growing frontier per terminal
//! and repeatedly commits the continuation of any frontier with exactly one
//! legal neighbor, merging the two frontiers of a color when they meet and
//! finishing a color when a frontier reaches its partner's cell. Cells freed
//! by a finished pair's spare stub go back into circulation, which can turn
//! previously ambiguous frontiers into forced ones on a later pass; the loop
//! runs to a fixed point. It is deliberately incomplete: a color with no
//! forced route is left undrawn rather than guessed at, and the caller
//! decides what that means.
//!
//! The connectivity oracle treats the open cells as an undirected grid graph
//! and asks `petgraph` for a shortest route under the Manhattan distance
//! heuristic, so "still connectable" and "walled off" are exact answers.

pub use canvas::Canvas;
pub use geom::{Board, Coord, Coords, Dimension, Dir, Pos};
pub use mask::CellMask;
pub use puzzle::{ColorId, Line, Point, Puzzle};
pub use route::{classify, occupied_mask, route_between, Connectivity};
pub use validate::{validate, validate_indexed, LineStatus, PointIndex, Verdict};

pub mod builder;
pub(crate) mod canvas;
pub(crate) mod geom;
pub(crate) mod mask;
pub(crate) mod puzzle;
pub(crate) mod route;
pub(crate) mod solver;
mod tests;
pub(crate) mod validate;
