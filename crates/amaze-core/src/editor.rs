//! Editable level board.
//!
//! Holds the mutable cell list a level designer works on and turns it into
//! an immutable `Grid` or `LevelData` on demand.

use crate::{
    CellKind, GenerationError, Generator, Grid, GridError, LevelData, PaintColor, Position,
    ValidationReport, Validator,
};

pub const MIN_EDITOR_SIZE: usize = 1;
pub const MAX_EDITOR_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct LevelEditor {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
    color: PaintColor,
}

impl Default for LevelEditor {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

impl LevelEditor {
    /// A board of open cells; sizes are clamped to the editor's limits
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.clamp(MIN_EDITOR_SIZE, MAX_EDITOR_SIZE);
        let height = height.clamp(MIN_EDITOR_SIZE, MAX_EDITOR_SIZE);
        Self {
            width,
            height,
            cells: vec![CellKind::Open; width * height],
            color: PaintColor::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color(&self) -> &PaintColor {
        &self.color
    }

    pub fn set_color(&mut self, color: PaintColor) {
        self.color = color;
    }

    /// Change the board size; this clears every cell
    pub fn resize(&mut self, width: usize, height: usize) {
        let color = std::mem::take(&mut self.color);
        *self = Self::new(width, height);
        self.color = color;
    }

    pub fn kind_at(&self, pos: Position) -> Result<CellKind, GridError> {
        self.index_of(pos).map(|idx| self.cells[idx])
    }

    pub fn paint(&mut self, pos: Position, kind: CellKind) -> Result<(), GridError> {
        let idx = self.index_of(pos)?;
        self.cells[idx] = kind;
        Ok(())
    }

    /// Reset one cell to open floor
    pub fn clear(&mut self, pos: Position) -> Result<(), GridError> {
        self.paint(pos, CellKind::Open)
    }

    /// Replace the board with a stored level
    ///
    /// The level is checked first; on error the board is left untouched.
    pub fn load(&mut self, level: &LevelData) -> Result<(), GridError> {
        let grid = level.to_grid()?;
        self.load_grid(&grid);
        self.color = level.start_color.clone();
        Ok(())
    }

    pub fn to_level(&self) -> LevelData {
        LevelData {
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
            start_color: self.color.clone(),
        }
    }

    pub fn build(&self) -> Result<Grid, GridError> {
        Grid::new(self.width, self.height, self.cells.clone())
    }

    pub fn validate(&self, validator: &Validator) -> Result<ValidationReport, GridError> {
        Ok(validator.validate(&self.build()?))
    }

    /// Fill the board with a generated solvable layout of the current size
    pub fn generate(
        &mut self,
        generator: &mut Generator,
        density: f64,
        max_attempts: usize,
    ) -> Result<(), GenerationError> {
        let grid = generator.generate(self.width, self.height, density, max_attempts)?;
        self.load_grid(&grid);
        Ok(())
    }

    fn load_grid(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.height = grid.height();
        self.cells = grid.cells().to_vec();
    }

    fn index_of(&self, pos: Position) -> Result<usize, GridError> {
        let in_bounds = pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height;
        if in_bounds {
            Ok(pos.y as usize * self.width + pos.x as usize)
        } else {
            Err(GridError::out_of_bounds(pos, self.width, self.height))
        }
    }
}
