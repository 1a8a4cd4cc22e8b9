//! Live play: one level, its balls, and their paint.
//!
//! The session is the only writer of ball positions and paint while a level
//! is played. Each directional input is resolved against the positions
//! before the move and committed in one step; callers animate the returned
//! outcome however they like.

use log::info;
use serde::{Deserialize, Serialize};

use crate::movement::resolve_move;
use crate::{CoverageTracker, Direction, Grid, GridError, LevelData, Position, Validator};

/// Index of a ball in setup order
pub type BallId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub position: Position,
}

/// Where one ball went during a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallSlide {
    pub ball: BallId,
    pub from: Position,
    pub rest: Position,
    /// Start to rest inclusive
    pub path: Vec<Position>,
}

/// Result of one directional input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub direction: Direction,
    pub slides: Vec<BallSlide>,
    pub any_ball_moved: bool,
    pub painted_count: usize,
    pub total_paintable: usize,
    /// Set only by the move that finished the level
    pub level_complete: bool,
}

/// A level being played
#[derive(Debug, Clone)]
pub struct PlaySession {
    grid: Grid,
    initial: Vec<Ball>,
    balls: Vec<Ball>,
    coverage: CoverageTracker,
    total_moves: usize,
}

impl PlaySession {
    /// Start a level; ball start cells count as painted immediately
    pub fn new(grid: Grid) -> Self {
        let initial: Vec<Ball> = grid
            .ball_starts()
            .into_iter()
            .enumerate()
            .map(|(id, position)| Ball { id, position })
            .collect();
        let coverage = CoverageTracker::new(&grid);
        let mut session = Self {
            grid,
            balls: initial.clone(),
            initial,
            coverage,
            total_moves: 0,
        };
        session.paint_start_cells();
        session
    }

    pub fn from_level(level: &LevelData) -> Result<Self, GridError> {
        Ok(Self::new(level.to_grid()?))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn coverage(&self) -> &CoverageTracker {
        &self.coverage
    }

    /// Moves that changed at least one ball's cell
    pub fn total_moves(&self) -> usize {
        self.total_moves
    }

    pub fn is_complete(&self) -> bool {
        self.coverage.is_complete()
    }

    pub fn ball_positions(&self) -> Vec<Position> {
        self.balls.iter().map(|ball| ball.position).collect()
    }

    /// Apply one directional input
    ///
    /// Input after the level is complete is ignored.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.is_complete() {
            return self.idle_outcome(direction, Vec::new());
        }

        let resolution = resolve_move(&self.grid, &self.ball_positions(), direction);
        let slides: Vec<BallSlide> = self
            .balls
            .iter()
            .zip(&resolution.slides)
            .map(|(ball, slide)| BallSlide {
                ball: ball.id,
                from: ball.position,
                rest: slide.rest,
                path: slide.path.clone(),
            })
            .collect();

        if !resolution.any_moved() {
            return self.idle_outcome(direction, slides);
        }

        for (ball, slide) in self.balls.iter_mut().zip(&slides) {
            ball.position = slide.rest;
        }
        self.total_moves += 1;
        let report = self.coverage.paint(resolution.traversed());
        if report.completed {
            info!("level complete after {} moves", self.total_moves);
        }

        MoveOutcome {
            direction,
            slides,
            any_ball_moved: true,
            painted_count: report.painted_count,
            total_paintable: self.coverage.total_paintable(),
            level_complete: report.completed,
        }
    }

    /// Put every ball back, wipe paint and the move counter
    pub fn reset(&mut self) {
        self.balls = self.initial.clone();
        self.coverage.reset();
        self.total_moves = 0;
        self.paint_start_cells();
    }

    /// Whether full coverage is still reachable from the current position
    pub fn can_still_complete(&self) -> bool {
        self.is_complete()
            || Validator::new()
                .validate_from(&self.grid, &self.ball_positions(), self.coverage.painted_set())
                .solvable
    }

    fn paint_start_cells(&mut self) {
        let starts = self.ball_positions();
        if self.coverage.paint(starts).completed {
            info!("level complete at setup");
        }
    }

    fn idle_outcome(&self, direction: Direction, slides: Vec<BallSlide>) -> MoveOutcome {
        MoveOutcome {
            direction,
            slides,
            any_ball_moved: false,
            painted_count: self.coverage.painted_count(),
            total_paintable: self.coverage.total_paintable(),
            level_complete: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_paints_start_cells() {
        let session = PlaySession::new(Grid::parse("o..\n..o").unwrap());
        assert_eq!(session.balls().len(), 2);
        assert_eq!(session.balls()[0].position, Position::new(2, 0));
        assert_eq!(session.balls()[1].position, Position::new(0, 1));
        assert_eq!(session.coverage().painted_count(), 2);
        assert_eq!(session.total_moves(), 0);
    }

    #[test]
    fn test_move_paints_and_completes() {
        let mut session = PlaySession::new(Grid::parse("o..").unwrap());
        let outcome = session.apply_move(Direction::Right);
        assert!(outcome.any_ball_moved);
        assert_eq!(outcome.slides[0].rest, Position::new(2, 0));
        assert_eq!(outcome.painted_count, 3);
        assert!(outcome.level_complete);
        assert_eq!(session.total_moves(), 1);

        // Further input is ignored once the level is won.
        let outcome = session.apply_move(Direction::Left);
        assert!(!outcome.any_ball_moved);
        assert!(!outcome.level_complete);
        assert_eq!(session.balls()[0].position, Position::new(2, 0));
        assert_eq!(session.total_moves(), 1);
    }

    #[test]
    fn test_blocked_move_is_not_counted() {
        let mut session = PlaySession::new(Grid::parse("o#.").unwrap());
        let outcome = session.apply_move(Direction::Right);
        assert!(!outcome.any_ball_moved);
        assert_eq!(outcome.slides.len(), 1);
        assert_eq!(outcome.slides[0].rest, Position::new(0, 0));
        assert_eq!(session.total_moves(), 0);
    }

    #[test]
    fn test_multi_ball_move_uses_snapshot() {
        let mut session = PlaySession::new(Grid::parse("o.o..").unwrap());
        let outcome = session.apply_move(Direction::Right);
        let rests: Vec<Position> = outcome.slides.iter().map(|s| s.rest).collect();
        assert_eq!(rests, vec![Position::new(1, 0), Position::new(4, 0)]);
        assert_eq!(outcome.painted_count, 5);
        assert!(outcome.level_complete);
    }

    #[test]
    fn test_reset() {
        let mut session = PlaySession::new(Grid::parse("o..\n...").unwrap());
        session.apply_move(Direction::Right);
        session.apply_move(Direction::Down);
        session.reset();
        assert_eq!(session.ball_positions(), vec![Position::new(0, 1)]);
        assert_eq!(session.coverage().painted_count(), 1);
        assert_eq!(session.total_moves(), 0);
    }

    #[test]
    fn test_can_still_complete() {
        let grid = Grid::parse(
            "\
            .#.
            o..",
        )
        .unwrap();
        let mut session = PlaySession::new(grid);
        assert!(session.can_still_complete());
        session.apply_move(Direction::Right);
        assert!(session.can_still_complete());
        session.apply_move(Direction::Up);
        assert!(session.can_still_complete());

        // From the centre of a plus the ball commits to one arm pair.
        let plus = Grid::parse(
            "\
            #.#
            .o.
            #.#",
        )
        .unwrap();
        let mut session = PlaySession::new(plus);
        assert!(!session.can_still_complete());
        session.apply_move(Direction::Up);
        assert!(!session.can_still_complete());
    }

    #[test]
    fn test_painted_count_never_decreases() {
        let mut session = PlaySession::new(Grid::parse("o.#.\n....\n.#..").unwrap());
        let mut last = session.coverage().painted_count();
        for dir in Direction::parse_sequence("RDLURRDDLLUU").unwrap() {
            let outcome = session.apply_move(dir);
            assert!(outcome.painted_count >= last);
            last = outcome.painted_count;
        }
    }

    #[test]
    fn test_complete_at_setup() {
        let mut session = PlaySession::new(Grid::parse("o#").unwrap());
        assert!(session.is_complete());
        assert!(!session.apply_move(Direction::Right).level_complete);
    }
}
