#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use strum::VariantArray;
    use unordered_pair::UnorderedPair;

    use crate::builder::{BuilderInvalidReason, PuzzleBuilder};
    use crate::{
        classify, occupied_mask, route_between, validate, validate_indexed, Board, Canvas,
        CellMask, Connectivity, Coords, Dir, Line, LineStatus, Point, PointIndex, Puzzle,
    };

    fn board(rows: usize, cols: usize) -> Board {
        Board::new(NonZero::new(rows).unwrap(), NonZero::new(cols).unwrap())
    }

    fn at(row: isize, col: isize) -> Coords {
        Coords { row, col }
    }

    /// Two pairs whose direct routes cross at the center of a 3x3 board.
    fn crossed_pairs() -> Puzzle {
        let board = board(3, 3);
        Puzzle::from_parts(board, vec![
            Point::new(1, 1, &board),
            Point::new(9, 1, &board),
            Point::new(3, 2, &board),
            Point::new(7, 2, &board),
        ])
    }

    /// A 3x3 board with color 1 in the top corners and the other two pairs
    /// forming a wall across every route between them.
    fn walled() -> Puzzle {
        let board = board(3, 3);
        Puzzle::from_parts(board, vec![
            Point::new(1, 1, &board),
            Point::new(3, 1, &board),
            Point::new(2, 2, &board),
            Point::new(5, 2, &board),
            Point::new(8, 3, &board),
            Point::new(9, 3, &board),
        ])
    }

    #[test]
    fn position_roundtrip() {
        let board = board(4, 7);
        for position in 1..=board.cell_count() {
            let coords = board.coords(position);
            assert!(coords.in_bounds(&board));
            assert_eq!(coords.position(&board), position);
        }

        assert_eq!(board.coords(1), at(1, 1));
        assert_eq!(board.coords(8), at(2, 1));
        assert_eq!(board.coords(28), at(4, 7));
    }

    #[test]
    fn neighbor_enumeration() {
        let board = board(3, 3);
        // fixed N, E, S, W order; off-board cells are dropped
        assert_eq!(at(2, 2).neighbors(&board), vec![at(1, 2), at(2, 3), at(3, 2), at(2, 1)]);
        assert_eq!(at(1, 1).neighbors(&board), vec![at(1, 2), at(2, 1)]);
        assert_eq!(at(3, 3).neighbors(&board), vec![at(2, 3), at(3, 2)]);
    }

    #[test]
    fn direction_algebra() {
        for dir in Dir::VARIANTS {
            assert_eq!(dir.invert().invert(), *dir);
        }
        assert_eq!(Dir::North.invert(), Dir::South);
        assert_eq!(Dir::East.invert(), Dir::West);

        assert_eq!(Dir::between(at(2, 2), at(2, 3)), Some(Dir::East));
        assert_eq!(Dir::between(at(2, 2), at(1, 2)), Some(Dir::North));
        assert_eq!(Dir::between(at(2, 2), at(3, 3)), None);

        assert_eq!(at(1, 1).manhattan_dist(at(3, 4)), 5);
    }

    #[test]
    fn line_trace_walks_from_the_start() {
        let board = board(3, 3);
        let line = Line::new(1, 1, vec![Dir::East, Dir::South]);
        assert_eq!(line.trace(&board), vec![at(1, 1), at(1, 2), at(2, 2)]);
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn validator_classifications() {
        let puzzle = crossed_pairs();
        let board = puzzle.board();
        let empty = CellMask::empty(board);

        use Dir::*;

        let ok = Line::new(1, 1, vec![East, South, South, East]);
        let verdict = validate(&ok, board, puzzle.points(), &empty);
        assert!(verdict.valid);
        assert_eq!((verdict.reason, verdict.index), (LineStatus::Valid, 4));

        let self_cross = Line::new(1, 1, vec![East, South, West, North]);
        let verdict = validate(&self_cross, board, puzzle.points(), &empty);
        assert_eq!((verdict.valid, verdict.reason, verdict.index), (false, LineStatus::CrossesItself, 4));

        let off_board = Line::new(1, 1, vec![North]);
        let verdict = validate(&off_board, board, puzzle.points(), &empty);
        assert_eq!((verdict.reason, verdict.index), (LineStatus::OutOfBounds, 1));

        let foreign = Line::new(1, 1, vec![South, South]);
        let verdict = validate(&foreign, board, puzzle.points(), &empty);
        assert_eq!((verdict.reason, verdict.index), (LineStatus::TouchesPointOfDifferentColor, 2));

        let short = Line::new(1, 1, vec![East]);
        let verdict = validate(&short, board, puzzle.points(), &empty);
        assert_eq!((verdict.reason, verdict.index), (LineStatus::EndsInWrongPlace, 1));

        let mut taken = CellMask::empty(board);
        taken.insert(4);
        let crossing = Line::new(1, 1, vec![South, East]);
        let verdict = validate(&crossing, board, puzzle.points(), &taken);
        assert_eq!((verdict.reason, verdict.index), (LineStatus::CrossesOtherLine, 1));
    }

    #[test]
    fn valid_verdicts_are_stable() {
        let puzzle = crossed_pairs();
        let empty = CellMask::empty(puzzle.board());

        let ok = Line::new(1, 1, vec![Dir::East, Dir::South, Dir::South, Dir::East]);
        let first = validate(&ok, puzzle.board(), puzzle.points(), &empty);
        let again = validate(&ok, puzzle.board(), puzzle.points(), &empty);
        assert!(first.valid);
        assert_eq!(first, again);
    }

    #[test]
    fn indexed_variant_matches_linear_scan() {
        let puzzle = crossed_pairs();
        let board = puzzle.board();
        let index = PointIndex::new(puzzle.points());
        let mut taken = CellMask::empty(board);
        taken.insert(4);

        use Dir::*;
        let candidates = vec![
            Line::new(1, 1, vec![East, South, South, East]),
            Line::new(1, 1, vec![East, South, West, North]),
            Line::new(1, 1, vec![North]),
            Line::new(1, 1, vec![East, East, South, South]),
            Line::new(2, 3, vec![South, South]),
            Line::new(1, 1, vec![South, East]),
            Line::new(1, 1, vec![East]),
        ];
        for line in &candidates {
            assert_eq!(
                validate(line, board, puzzle.points(), &taken),
                validate_indexed(line, board, &index, &taken),
            );
        }
    }

    #[test]
    fn taken_alias_wins_over_bounds() {
        // stepping off the right edge of row 1 produces the linear index of
        // (2, 1); while that cell is taken the verdict is CrossesOtherLine,
        // not OutOfBounds, because taken cells are tested first
        let puzzle = crossed_pairs();
        let board = puzzle.board();
        let mut taken = CellMask::empty(board);
        taken.insert(4);

        let line = Line::new(2, 3, vec![Dir::East]);
        let verdict = validate(&line, board, puzzle.points(), &taken);
        assert_eq!((verdict.reason, verdict.index), (LineStatus::CrossesOtherLine, 1));

        taken.remove(4);
        let verdict = validate(&line, board, puzzle.points(), &taken);
        assert_eq!((verdict.reason, verdict.index), (LineStatus::OutOfBounds, 1));
    }

    #[test]
    fn route_is_shortest_when_unobstructed() {
        let board = board(4, 4);
        let a = Point::new(1, 1, &board);
        let z = Point::new(12, 1, &board);
        let mut blocked = CellMask::empty(&board);

        let route = route_between(&a, &z, &board, &mut blocked).unwrap();
        assert_eq!(route.len() as isize, a.coords.manhattan_dist(z.coords) + 1);
        assert_eq!(*route.first().unwrap(), a.coords);
        assert_eq!(*route.last().unwrap(), z.coords);

        // terminals were free before the call and must stay free
        assert!(!blocked.contains(a.position));
        assert!(!blocked.contains(z.position));
    }

    #[test]
    fn route_respects_walls_and_restores_endpoints() {
        let puzzle = walled();
        let pair = puzzle.pair(1);
        let mut blocked = puzzle.point_mask();

        assert_eq!(route_between(&pair.0, &pair.1, puzzle.board(), &mut blocked), None);

        // terminals were blocked before the call and must still be
        assert!(blocked.contains(pair.0.position));
        assert!(blocked.contains(pair.1.position));
    }

    #[test]
    fn east_east_on_one_by_three() {
        let board = board(1, 3);
        let puzzle = Puzzle::from_parts(board, vec![Point::new(1, 1, &board), Point::new(3, 1, &board)]);

        assert_eq!(puzzle.solve(), vec![Line::new(1, 1, vec![Dir::East, Dir::East])]);
    }

    #[test]
    fn walled_color_stays_undrawn() {
        let puzzle = walled();

        // colors 2 and 3 close by forced moves; color 1 is walled off and
        // must be absent rather than reported as a failure
        assert_eq!(puzzle.solve(), vec![
            Line::new(2, 2, vec![Dir::South]),
            Line::new(3, 8, vec![Dir::East]),
        ]);
    }

    #[test]
    fn solved_lines_revalidate_against_each_other() {
        let puzzle = walled();
        let board = puzzle.board();
        let lines = puzzle.solve();
        assert!(!lines.is_empty());

        for line in &lines {
            let mut taken = CellMask::empty(board);
            for other in lines.iter().filter(|other| other.color != line.color) {
                for cell in other.trace(board) {
                    taken.insert(cell.position(board));
                }
            }
            let verdict = validate(line, board, puzzle.points(), &taken);
            assert!(verdict.valid, "line for color {} failed as {:?}", line.color, verdict.reason);
        }
    }

    #[test]
    fn solving_is_deterministic() {
        let puzzle = walled();
        assert_eq!(puzzle.solve(), puzzle.solve());
    }

    #[test]
    fn solve_over_existing_lines() {
        let puzzle = walled();
        let drawn = vec![Line::new(2, 2, vec![Dir::South])];

        // the drawn color is left alone; only color 3 is newly deduced
        assert_eq!(puzzle.solve_with(&drawn), vec![Line::new(3, 8, vec![Dir::East])]);
    }

    #[test]
    fn builder_round_trip() {
        let puzzle = PuzzleBuilder::with_dims((NonZero::new(1).unwrap(), NonZero::new(3).unwrap()))
            .add_pair('A', UnorderedPair(at(1, 1), at(1, 3)))
            .build()
            .unwrap();

        assert_eq!(puzzle.colors(), vec![1]);
        assert_eq!(
            puzzle.pair(1),
            UnorderedPair(Point::new(1, 1, puzzle.board()), Point::new(3, 1, puzzle.board())),
        );
        assert_eq!(puzzle.solve(), vec![Line::new(1, 1, vec![Dir::East, Dir::East])]);
    }

    #[test]
    fn pop_pair_clears_the_last_pair() {
        let puzzle = PuzzleBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
            .add_pair('A', UnorderedPair(at(1, 1), at(3, 3)))
            .add_pair('B', UnorderedPair(at(1, 3), at(3, 1)))
            .pop_pair()
            .build()
            .unwrap();

        assert_eq!(puzzle.colors(), vec![1]);
        assert_eq!(format!("{}", Canvas::new(&puzzle)), "A..
...
..A
");
    }

    #[test]
    fn builder_collects_reasons() {
        let mut builder = PuzzleBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()));
        builder.add_pair('A', UnorderedPair(at(1, 1), at(3, 3)));
        assert!(builder.is_valid().is_none());

        builder.add_pair('B', UnorderedPair(at(4, 1), at(2, 2)));
        assert!(matches!(builder.is_valid().unwrap()[0], BuilderInvalidReason::FeatureOutOfBounds));
        assert!(builder.build().is_err());
    }

    #[test]
    fn builder_rejects_overlapping_termini() {
        let mut builder = PuzzleBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()));
        builder
            .add_pair('A', UnorderedPair(at(1, 1), at(3, 3)))
            .add_pair('B', UnorderedPair(at(1, 1), at(2, 2)));
        assert!(matches!(builder.is_valid().unwrap()[0], BuilderInvalidReason::TerminusOverlap));
    }

    #[test]
    fn canvas_commits_valid_lines_only() {
        let puzzle = crossed_pairs();
        let mut canvas = Canvas::new(&puzzle);

        use Dir::*;
        let first = canvas.try_commit(&Line::new(1, 1, vec![East, South, South, East]));
        assert!(first.valid);

        // color 2 can no longer get through the middle column
        let second = canvas.try_commit(&Line::new(2, 3, vec![South, South]));
        assert_eq!((second.valid, second.reason), (false, LineStatus::CrossesOtherLine));
        assert_eq!(canvas.lines().len(), 1);

        assert_eq!(format!("{}", canvas), "AaB
.a.
BaA
");
    }

    #[test]
    fn render_after_solving() {
        let puzzle = walled();
        let mut canvas = Canvas::new(&puzzle);
        for line in puzzle.solve() {
            assert!(canvas.try_commit(&line).valid);
        }

        assert_eq!(format!("{}", canvas), "ABA
.B.
.CC
");
    }

    #[test]
    fn survey_distinguishes_drawn_open_and_dead_pairs() {
        let puzzle = walled();
        let drawn = vec![Line::new(2, 2, vec![Dir::South])];

        let mask = occupied_mask(&puzzle, &drawn);
        assert!(mask.contains(2) && mask.contains(5));
        assert!(!mask.contains(4) && !mask.contains(6) && !mask.contains(7));

        assert_eq!(classify(&puzzle, &drawn), vec![
            (1, Connectivity::Unconnectable),
            (2, Connectivity::Connected),
            (3, Connectivity::Connectable),
        ]);
    }
}
