use thiserror::Error;

use crate::Position;

/// Errors raised while building or addressing a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },
    #[error("expected {expected} cells, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("unexpected character {ch:?} on line {line}")]
    Parse { line: usize, ch: char },
}

impl GridError {
    pub(crate) fn out_of_bounds(pos: Position, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width,
            height,
        }
    }
}

/// Errors raised by the maze generator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("no solvable layout found after {attempts} attempts at wall density {density}")]
    GenerationExhausted { attempts: usize, density: f64 },
    #[error("wall density {0} is outside [0, 1]")]
    InvalidDensity(f64),
    #[error("generation cancelled after {attempts} attempts")]
    Cancelled { attempts: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A direction string that is not one of the four cardinal directions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction {0:?}, expected one of U, D, L, R")]
pub struct ParseDirectionError(pub String);
