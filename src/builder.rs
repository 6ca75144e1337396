//! Chainable construction of [`Puzzle`]s, in the style of a board editor:
//! invalid placements mark the builder rather than failing eagerly, and the
//! collected reasons surface when building.

use std::collections::HashMap;
use std::num::NonZero;

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::geom::{Board, Coords, Dimension};
use crate::puzzle::{Point, Puzzle};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug)]
pub enum BuilderInvalidReason {
    /// A terminal was placed outside the bounds specified by `with_dims`.
    FeatureOutOfBounds,
    /// A terminal was placed on a cell already holding one.
    TerminusOverlap,
}

/// A builder for [`Puzzle`]s on rectangular boards.
///
/// Mutates itself while building but can be [`Clone`]d to save its state at
/// some point.
#[derive(Clone)]
pub struct PuzzleBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    pairs: Vec<(char, UnorderedPair<Coords>)>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for PuzzleBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl PuzzleBuilder {
    /// Construct a new builder with the specified dimensions, given in
    /// `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            pairs: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    fn board(&self) -> Board {
        Board::new(self.dims.0, self.dims.1)
    }

    /// Add a color's two terminals. The order within `terminals` does not
    /// matter; colors are numbered 1 and up in call order and render as
    /// `display`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds)
    /// invalid state if either terminal is off the board, or a
    /// [`TerminusOverlap`](BuilderInvalidReason::TerminusOverlap) invalid
    /// state if either cell already holds a terminal.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_pair(&mut self, display: char, terminals: UnorderedPair<Coords>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let board = self.board();
        for cell in [terminals.0, terminals.1] {
            if !cell.in_bounds(&board) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        let taken = self.pairs.iter().flat_map(|(_, pair)| [pair.0, pair.1]).collect_vec();
        if terminals.0 == terminals.1 || taken.contains(&terminals.0) || taken.contains(&terminals.1) {
            self.invalid_reasons.push(BuilderInvalidReason::TerminusOverlap);
            return self;
        }

        self.pairs.push((display, terminals));
        self
    }

    /// Remove the most recently added pair of terminals.
    ///
    /// If the builder is in an invalid state or no pairs are present, this
    /// function does nothing.
    pub fn pop_pair(&mut self) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.pairs.pop();
        }

        self
    }

    /// Check the validity of this builder, ensuring no
    /// [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Puzzle`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`]
    /// of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Puzzle, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let board = self.board();
        let mut points = Vec::with_capacity(self.pairs.len() * 2);
        let mut color_displays = HashMap::with_capacity(self.pairs.len());
        for (index, (display, terminals)) in self.pairs.iter().enumerate() {
            // color 0 is reserved, so pairs are numbered from 1
            let color = index + 1;
            color_displays.insert(color, *display);
            for cell in [terminals.0, terminals.1] {
                points.push(Point::new(cell.position(&board), color, &board));
            }
        }

        Ok(Puzzle {
            board,
            points,
            color_displays,
        })
    }
}
