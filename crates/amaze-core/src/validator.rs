//! Solvability search.
//!
//! Breadth-first search over joint ball positions. Each canonical joint state
//! keeps the largest painted-set seen for it; a revisit is expanded again only
//! when the admission rule says it brings something new, and its painted-set
//! is merged into the recorded one.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use crate::movement::{resolve_move_with, Occupancy};
use crate::{CellSet, Direction, Grid, Position};

/// When a previously seen joint state is searched again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdmissionRule {
    /// Revisit only if the new painted-set is strictly larger than the recorded one
    PaintedSize,
    /// Revisit whenever the new painted-set has a cell the recorded one lacks
    #[default]
    Containment,
}

impl AdmissionRule {
    fn admits(self, candidate: &CellSet, recorded: &CellSet) -> bool {
        match self {
            AdmissionRule::PaintedSize => candidate.len() > recorded.len(),
            AdmissionRule::Containment => !candidate.is_subset(recorded),
        }
    }
}

/// Search settings
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    pub admission: AdmissionRule,
    /// Stop after expanding this many states; `None` searches exhaustively
    pub max_states: Option<usize>,
}

/// Why a layout could not be searched at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationFailure {
    NoBalls,
    NoPaintableCells,
    /// A ball is off the board, off a traversable cell, or shares its cell
    InvalidBallPosition,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::NoBalls => write!(f, "level has no balls"),
            ValidationFailure::NoPaintableCells => write!(f, "level has no paintable cells"),
            ValidationFailure::InvalidBallPosition => {
                write!(f, "ball outside the traversable cells")
            }
        }
    }
}

/// Outcome of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub solvable: bool,
    /// Largest painted-set reached by the search
    pub max_painted: usize,
    pub total_paintable: usize,
    pub failure: Option<ValidationFailure>,
    /// Number of joint states expanded
    pub states_explored: usize,
    /// The state cap stopped the search early
    pub truncated: bool,
}

impl ValidationReport {
    fn rejected(failure: ValidationFailure, total_paintable: usize) -> Self {
        Self {
            solvable: false,
            max_painted: 0,
            total_paintable,
            failure: Some(failure),
            states_explored: 0,
            truncated: false,
        }
    }

    /// Best reachable coverage as a fraction of paintable cells
    pub fn coverage(&self) -> f64 {
        if self.total_paintable == 0 {
            return 0.0;
        }
        self.max_painted as f64 / self.total_paintable as f64
    }
}

/// Stateless solvability checker; all search state is per call
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Decide whether every paintable cell of `grid` can be painted starting
    /// from its ball start cells
    pub fn validate(&self, grid: &Grid) -> ValidationReport {
        let balls = grid.ball_starts();
        self.validate_from(grid, &balls, &CellSet::new(grid.len()))
    }

    /// Search from balls at `positions` with `painted` already covered
    ///
    /// The balls' own cells count as painted. Members of `painted` that are
    /// not paintable cells of `grid` are ignored; `painted` may have any
    /// capacity.
    pub fn validate_from(
        &self,
        grid: &Grid,
        positions: &[Position],
        painted: &CellSet,
    ) -> ValidationReport {
        let total_paintable = grid.paintable_count();
        if positions.is_empty() {
            return ValidationReport::rejected(ValidationFailure::NoBalls, total_paintable);
        }
        if total_paintable == 0 {
            return ValidationReport::rejected(ValidationFailure::NoPaintableCells, total_paintable);
        }

        let mut start = positions.to_vec();
        start.sort_unstable();
        let distinct = start.windows(2).all(|pair| pair[0] != pair[1]);
        if !distinct || !start.iter().all(|pos| grid.is_traversable(*pos)) {
            return ValidationReport::rejected(
                ValidationFailure::InvalidBallPosition,
                total_paintable,
            );
        }

        let cells = grid.cells();
        let mut seed = CellSet::new(grid.len());
        let paintable = |idx: &usize| *idx < cells.len() && cells[*idx].is_paintable();
        for idx in painted.iter().filter(paintable) {
            seed.insert(idx);
        }
        for idx in start.iter().filter_map(|pos| grid.index_of(*pos)) {
            seed.insert(idx);
        }

        let mut best: HashMap<Vec<Position>, CellSet> = HashMap::new();
        let mut queue: VecDeque<(Vec<Position>, CellSet)> = VecDeque::new();
        let mut max_painted = seed.len();
        best.insert(start.clone(), seed.clone());
        queue.push_back((start, seed));

        let mut states_explored = 0;
        let mut truncated = false;

        while let Some((state, painted)) = queue.pop_front() {
            // Full coverage cannot be beaten; the remaining queue only
            // reorders states already known to exist.
            if max_painted >= total_paintable {
                break;
            }
            if self
                .config
                .max_states
                .is_some_and(|limit| states_explored >= limit)
            {
                truncated = true;
                break;
            }
            states_explored += 1;

            let occupancy = Occupancy::from_positions(grid, &state);
            for direction in Direction::ALL {
                let resolution = resolve_move_with(grid, &occupancy, &state, direction);
                if !resolution.any_moved() {
                    continue;
                }

                let mut next_painted = painted.clone();
                for idx in resolution.traversed().filter_map(|pos| grid.index_of(pos)) {
                    next_painted.insert(idx);
                }
                let mut next_state = resolution.rest_positions();
                next_state.sort_unstable();

                let admitted = match best.entry(next_state.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(next_painted.clone());
                        Some(next_painted)
                    }
                    Entry::Occupied(mut slot) => {
                        let recorded = slot.get_mut();
                        if self.config.admission.admits(&next_painted, recorded) {
                            recorded.union_with(&next_painted);
                            Some(recorded.clone())
                        } else {
                            None
                        }
                    }
                };

                if let Some(merged) = admitted {
                    max_painted = max_painted.max(merged.len());
                    queue.push_back((next_state, merged));
                }
            }
        }

        if truncated {
            warn!(
                "validation stopped after {} states with {}/{} cells painted",
                states_explored, max_painted, total_paintable
            );
        }
        debug!(
            "validated {}x{} grid: {}/{} painted over {} states ({} distinct)",
            grid.width(),
            grid.height(),
            max_painted,
            total_paintable,
            states_explored,
            best.len()
        );

        ValidationReport {
            solvable: max_painted >= total_paintable,
            max_painted,
            total_paintable,
            failure: None,
            states_explored,
            truncated,
        }
    }
}
