//! Amaze puzzle engine
//!
//! Balls slide across a grid until something stops them, painting every cell
//! they pass. A level is won once every open cell is painted.
//!
//! Core modules:
//! - `grid`: board model and text map format
//! - `movement`: slide resolution against an occupancy snapshot
//! - `coverage`: painted-cell tracking with an edge-triggered win signal
//! - `validator`: breadth-first solvability search over joint ball positions
//! - `generator`: random solvable maze generation
//! - `session`: live play of one level
//! - `level`, `editor`: level data, progression and editing

mod cellset;
mod coverage;
mod direction;
mod editor;
mod error;
mod generator;
mod grid;
mod level;
mod movement;
mod position;
mod session;
mod validator;

pub use cellset::CellSet;
pub use coverage::{CoverageTracker, PaintReport};
pub use direction::Direction;
pub use editor::{LevelEditor, MAX_EDITOR_SIZE, MIN_EDITOR_SIZE};
pub use error::{GenerationError, GridError, ParseDirectionError};
pub use generator::{Generator, GeneratorConfig};
pub use grid::{CellKind, Grid};
pub use level::{LevelData, LevelSequence, PaintColor};
pub use movement::{
    resolve_move, resolve_move_with, resolve_slide, MoveResolution, Occupancy, Slide,
};
pub use position::Position;
pub use session::{Ball, BallId, BallSlide, MoveOutcome, PlaySession};
pub use validator::{AdmissionRule, ValidationFailure, ValidationReport, Validator, ValidatorConfig};
