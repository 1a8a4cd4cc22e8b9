use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::grid::check_dimensions;
use crate::{CellKind, GenerationError, Grid, GridError, Position, Validator};

/// Configuration for maze generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    /// Fraction of cells turned into walls, in `[0, 1]`
    pub density: f64,
    /// Maximum attempts before giving up
    pub max_attempts: usize,
    /// Cell that always holds the ball
    pub anchor: Position,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            density: 0.3,
            max_attempts: 500,
            anchor: Position::new(0, 0),
        }
    }
}

impl GeneratorConfig {
    pub fn small() -> Self {
        Self {
            width: 5,
            height: 5,
            density: 0.3,
            max_attempts: 200,
            ..Self::default()
        }
    }

    pub fn medium() -> Self {
        Self {
            width: 8,
            height: 8,
            density: 0.35,
            max_attempts: 500,
            ..Self::default()
        }
    }

    pub fn large() -> Self {
        Self {
            width: 12,
            height: 12,
            density: 0.4,
            max_attempts: 1000,
            ..Self::default()
        }
    }

    /// Number of walls placed per attempt
    pub fn wall_count(&self) -> usize {
        let cells = self.width.saturating_mul(self.height);
        let walls = (cells as f64 * self.density).floor() as usize;
        walls.min(cells.saturating_sub(1))
    }

    fn check(&self) -> Result<(), GenerationError> {
        check_dimensions(self.width, self.height)?;
        if !(0.0..=1.0).contains(&self.density) {
            return Err(GenerationError::InvalidDensity(self.density));
        }
        let in_bounds = self.anchor.x >= 0
            && self.anchor.y >= 0
            && (self.anchor.x as usize) < self.width
            && (self.anchor.y as usize) < self.height;
        if !in_bounds {
            return Err(GridError::out_of_bounds(self.anchor, self.width, self.height).into());
        }
        Ok(())
    }
}

/// Random maze generator that only returns solvable layouts
pub struct Generator {
    config: GeneratorConfig,
    rng: Pcg32,
    validator: Validator,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self::with_config_and_seed(config, entropy_seed())
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config_and_seed(GeneratorConfig::default(), seed)
    }

    pub fn with_config_and_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            validator: Validator::new(),
        }
    }

    /// Replace the validator used to accept layouts
    pub fn set_validator(&mut self, validator: Validator) {
        self.validator = validator;
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a solvable `width`×`height` layout
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        density: f64,
        max_attempts: usize,
    ) -> Result<Grid, GenerationError> {
        self.config.width = width;
        self.config.height = height;
        self.config.density = density;
        self.config.max_attempts = max_attempts;
        self.generate_with_config()
    }

    /// Generate a layout with the current configuration
    pub fn generate_with_config(&mut self) -> Result<Grid, GenerationError> {
        let never = AtomicBool::new(false);
        self.generate_with_cancel(&never)
    }

    /// Generate a layout, checking `cancel` before every attempt
    pub fn generate_with_cancel(&mut self, cancel: &AtomicBool) -> Result<Grid, GenerationError> {
        self.config.check()?;
        let GeneratorConfig {
            width,
            height,
            density,
            max_attempts,
            anchor,
        } = self.config;
        let anchor_index = anchor.y as usize * width + anchor.x as usize;
        let wall_count = self.config.wall_count();
        let mut candidates: Vec<usize> = (0..width * height)
            .filter(|&idx| idx != anchor_index)
            .collect();

        for attempt in 1..=max_attempts {
            if cancel.load(Ordering::Relaxed) {
                return Err(GenerationError::Cancelled {
                    attempts: attempt - 1,
                });
            }

            let mut cells = vec![CellKind::Open; width * height];
            cells[anchor_index] = CellKind::BallStart;
            let (walls, _) = candidates.partial_shuffle(&mut self.rng, wall_count);
            for &idx in walls.iter() {
                cells[idx] = CellKind::Wall;
            }

            let grid = Grid::new(width, height, cells)?;
            let report = self.validator.validate(&grid);
            if report.solvable {
                info!(
                    "generated {}x{} maze with {} walls on attempt {}",
                    width, height, wall_count, attempt
                );
                return Ok(grid);
            }
            debug!(
                "attempt {} rejected: {}/{} cells reachable",
                attempt, report.max_painted, report.total_paintable
            );
        }

        warn!(
            "no solvable {}x{} maze after {} attempts at density {}",
            width, height, max_attempts, density
        );
        Err(GenerationError::GenerationExhausted {
            attempts: max_attempts,
            density,
        })
    }
}

/// Seed from the OS, falling back to a process-wide counter
fn entropy_seed() -> u64 {
    let mut seed_bytes = [0u8; 8];
    if getrandom::getrandom(&mut seed_bytes).is_ok() {
        return u64::from_le_bytes(seed_bytes);
    }
    static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_maze_is_solvable() {
        let mut generator = Generator::with_seed(42);
        let grid = generator.generate(3, 3, 0.3, 500).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.ball_starts(), vec![Position::new(0, 0)]);
        let walls = grid.cells().iter().filter(|k| **k == CellKind::Wall).count();
        assert_eq!(walls, 2);
        assert!(Validator::new().validate(&grid).solvable);
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = Generator::with_seed(7).generate(6, 4, 0.25, 300);
        let b = Generator::with_seed(7).generate(6, 4, 0.25, 300);
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_density_keeps_anchor() {
        let config = GeneratorConfig {
            width: 3,
            height: 3,
            density: 1.0,
            max_attempts: 1,
            anchor: Position::new(1, 1),
        };
        let grid = Generator::with_config_and_seed(config, 1)
            .generate_with_config()
            .unwrap();
        assert_eq!(grid.cell_kind(Position::new(1, 1)), Ok(CellKind::BallStart));
        assert_eq!(grid.paintable_count(), 1);
    }

    #[test]
    fn test_exhaustion_reports_cap() {
        // In an open 3x3 room the ball only slides along the border, so the
        // centre is never painted.
        let config = GeneratorConfig {
            width: 3,
            height: 3,
            density: 0.0,
            max_attempts: 7,
            anchor: Position::new(0, 0),
        };
        let mut generator = Generator::with_config_and_seed(config, 3);
        let err = generator.generate_with_config().unwrap_err();
        assert_eq!(
            err,
            GenerationError::GenerationExhausted {
                attempts: 7,
                density: 0.0
            }
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let mut generator = Generator::with_seed(1);
        assert_eq!(
            generator.generate(5, 5, 1.5, 10),
            Err(GenerationError::InvalidDensity(1.5))
        );
        assert!(matches!(
            generator.generate(0, 5, 0.2, 10),
            Err(GenerationError::Grid(GridError::InvalidDimensions { .. }))
        ));
        assert!(matches!(
            generator.generate(5, 5, f64::NAN, 10),
            Err(GenerationError::InvalidDensity(_))
        ));
        assert!(matches!(
            generator.generate(usize::MAX, 2, 0.2, 10),
            Err(GenerationError::Grid(GridError::InvalidDimensions { .. }))
        ));
        assert!(matches!(
            generator.generate(i32::MAX as usize + 1, 1, 0.2, 10),
            Err(GenerationError::Grid(GridError::InvalidDimensions { .. }))
        ));

        let config = GeneratorConfig {
            anchor: Position::new(9, 0),
            ..GeneratorConfig::small()
        };
        assert!(matches!(
            Generator::with_config_and_seed(config, 1).generate_with_config(),
            Err(GenerationError::Grid(GridError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_cancelled_before_first_attempt() {
        let mut generator = Generator::with_seed(5);
        let cancel = AtomicBool::new(true);
        assert_eq!(
            generator.generate_with_cancel(&cancel),
            Err(GenerationError::Cancelled { attempts: 0 })
        );
    }

    #[test]
    fn test_wall_count() {
        let config = GeneratorConfig {
            width: 5,
            height: 5,
            density: 0.4,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.wall_count(), 10);
    }
}
