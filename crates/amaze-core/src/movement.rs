//! Slide resolution.
//!
//! A ball slides until the next cell is off the board, not traversable, or
//! held by another ball. Multi-ball moves resolve every ball against one
//! occupancy snapshot taken before anything moves, so the outcome does not
//! depend on the order balls are processed in.

use serde::{Deserialize, Serialize};

use crate::{CellSet, Direction, Grid, Position};

/// Which cells hold a ball at one instant
#[derive(Debug, Clone)]
pub struct Occupancy<'a> {
    grid: &'a Grid,
    occupied: CellSet,
}

impl<'a> Occupancy<'a> {
    /// Snapshot of `positions` on `grid`; off-board positions are ignored
    pub fn from_positions(grid: &'a Grid, positions: &[Position]) -> Self {
        let mut occupied = CellSet::new(grid.len());
        for idx in positions.iter().filter_map(|pos| grid.index_of(*pos)) {
            occupied.insert(idx);
        }
        Self { grid, occupied }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.grid
            .index_of(pos)
            .is_some_and(|idx| self.occupied.contains(idx))
    }
}

/// The cells one ball passes through in a single move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Every cell from start to rest inclusive; never empty
    pub path: Vec<Position>,
    pub rest: Position,
}

impl Slide {
    pub fn start(&self) -> Position {
        self.path[0]
    }

    pub fn moved(&self) -> bool {
        self.path.len() > 1
    }
}

/// Slide one ball from `start` in `direction` against a fixed snapshot
pub fn resolve_slide(
    grid: &Grid,
    occupancy: &Occupancy<'_>,
    start: Position,
    direction: Direction,
) -> Slide {
    let mut path = vec![start];
    let mut current = start;
    loop {
        let next = current.step(direction);
        if !grid.is_traversable(next) || occupancy.is_occupied(next) {
            break;
        }
        path.push(next);
        current = next;
    }
    Slide { path, rest: current }
}

/// Outcome of one directional input applied to every ball
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResolution {
    pub direction: Direction,
    /// One slide per ball, in the order the positions were given
    pub slides: Vec<Slide>,
}

impl MoveResolution {
    /// A move only counts if at least one ball changed cell
    pub fn any_moved(&self) -> bool {
        self.slides.iter().any(Slide::moved)
    }

    pub fn rest_positions(&self) -> Vec<Position> {
        self.slides.iter().map(|slide| slide.rest).collect()
    }

    /// Every cell touched by any ball, with repeats
    pub fn traversed(&self) -> impl Iterator<Item = Position> + '_ {
        self.slides.iter().flat_map(|slide| slide.path.iter().copied())
    }
}

/// Resolve a move for all balls at `positions`
pub fn resolve_move(grid: &Grid, positions: &[Position], direction: Direction) -> MoveResolution {
    let occupancy = Occupancy::from_positions(grid, positions);
    resolve_move_with(grid, &occupancy, positions, direction)
}

/// Like [`resolve_move`], reusing an occupancy snapshot of `positions`
pub fn resolve_move_with(
    grid: &Grid,
    occupancy: &Occupancy<'_>,
    positions: &[Position],
    direction: Direction,
) -> MoveResolution {
    let slides: Vec<Slide> = positions
        .iter()
        .map(|start| resolve_slide(grid, occupancy, *start, direction))
        .collect();

    // Balls moving the same way stop short of each other's pre-move cells,
    // so two rests can never coincide.
    debug_assert!(
        {
            let mut rests: Vec<Position> = slides.iter().map(|s| s.rest).collect();
            rests.sort_unstable();
            rests.windows(2).all(|pair| pair[0] != pair[1])
        },
        "two balls resolved to the same cell"
    );

    MoveResolution { direction, slides }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellKind;
    use proptest::prelude::*;

    fn slide(grid: &Grid, balls: &[Position], start: Position, dir: Direction) -> Slide {
        let occupancy = Occupancy::from_positions(grid, balls);
        resolve_slide(grid, &occupancy, start, dir)
    }

    #[test]
    fn test_slides_to_edge() {
        let grid = Grid::parse("o..").unwrap();
        let start = Position::new(0, 0);
        let result = slide(&grid, &[start], start, Direction::Right);
        assert_eq!(result.rest, Position::new(2, 0));
        assert_eq!(
            result.path,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
        assert!(result.moved());
    }

    #[test]
    fn test_stops_before_wall_and_empty() {
        let grid = Grid::parse("o.#.\n..._").unwrap();
        let start = Position::new(0, 1);
        let result = slide(&grid, &[start], start, Direction::Right);
        assert_eq!(result.rest, Position::new(1, 1));

        let start = Position::new(0, 0);
        let result = slide(&grid, &[start], start, Direction::Right);
        assert_eq!(result.rest, Position::new(2, 0));
    }

    #[test]
    fn test_blocked_ball_paints_own_cell() {
        let grid = Grid::parse("o#").unwrap();
        let start = Position::new(0, 0);
        let result = slide(&grid, &[start], start, Direction::Right);
        assert_eq!(result.path, vec![start]);
        assert_eq!(result.rest, start);
        assert!(!result.moved());
    }

    #[test]
    fn test_snapshot_blocks_on_pre_move_position() {
        // Both balls move right; the trailing ball stops behind the leading
        // ball's old cell even though that ball slides away.
        let grid = Grid::parse("o.o..").unwrap();
        let balls = [Position::new(0, 0), Position::new(2, 0)];
        let resolution = resolve_move(&grid, &balls, Direction::Right);
        assert_eq!(
            resolution.rest_positions(),
            vec![Position::new(1, 0), Position::new(4, 0)]
        );
        assert!(resolution.any_moved());
    }

    #[test]
    fn test_order_independent() {
        let grid = Grid::parse("o.o..\n.....\n..o..").unwrap();
        let balls = grid.ball_starts();
        let mut reversed = balls.clone();
        reversed.reverse();
        for dir in Direction::ALL {
            let mut a = resolve_move(&grid, &balls, dir).rest_positions();
            let mut b = resolve_move(&grid, &reversed, dir).rest_positions();
            a.sort();
            b.sort();
            assert_eq!(a, b, "direction {}", dir);
        }
    }

    #[test]
    fn test_no_ball_moves() {
        let grid = Grid::parse("o#").unwrap();
        let resolution = resolve_move(&grid, &grid.ball_starts(), Direction::Right);
        assert!(!resolution.any_moved());
        assert_eq!(resolution.traversed().count(), 1);
    }

    fn arb_case() -> impl Strategy<Value = (Grid, Vec<Position>, Direction)> {
        (1usize..7, 1usize..7).prop_flat_map(|(w, h)| {
            let kinds = prop::collection::vec(
                prop_oneof![
                    6 => Just(CellKind::Open),
                    2 => Just(CellKind::Wall),
                    1 => Just(CellKind::Empty),
                    1 => Just(CellKind::BallStart),
                ],
                w * h,
            );
            let dir = prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ];
            (kinds, dir).prop_map(move |(cells, dir)| {
                let grid = Grid::new(w, h, cells).unwrap();
                let balls = grid.ball_starts();
                (grid, balls, dir)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_rest_is_legal((grid, balls, dir) in arb_case()) {
            let resolution = resolve_move(&grid, &balls, dir);
            let occupancy = Occupancy::from_positions(&grid, &balls);
            for (slide, start) in resolution.slides.iter().zip(&balls) {
                prop_assert!(grid.contains(slide.rest));
                prop_assert!(grid.is_traversable(slide.rest));
                // Only the ball's own pre-move cell may be occupied at rest.
                prop_assert!(slide.rest == *start || !occupancy.is_occupied(slide.rest));
            }
        }

        #[test]
        fn prop_path_is_contiguous((grid, balls, dir) in arb_case()) {
            let resolution = resolve_move(&grid, &balls, dir);
            for (slide, start) in resolution.slides.iter().zip(&balls) {
                prop_assert_eq!(slide.path[0], *start);
                prop_assert_eq!(*slide.path.last().unwrap(), slide.rest);
                for pair in slide.path.windows(2) {
                    prop_assert_eq!(pair[0].step(dir), pair[1]);
                }
            }
        }

        #[test]
        fn prop_processing_order_is_irrelevant((grid, balls, dir) in arb_case()) {
            let mut reversed = balls.clone();
            reversed.reverse();
            let mut a = resolve_move(&grid, &balls, dir).rest_positions();
            let mut b = resolve_move(&grid, &reversed, dir).rest_positions();
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
        }
    }
}
