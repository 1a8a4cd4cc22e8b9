//! Board model: a fixed-shape rectangle of typed cells.
//!
//! Cells live in one flat vector indexed by `y * width + x`. Kinds never
//! change once a `Grid` exists; editing happens on raw cell vectors that are
//! turned into a new grid (see `LevelEditor`).

use serde::{Deserialize, Serialize};

use crate::{GridError, Position};

/// What occupies a cell at setup time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    /// Paintable floor
    #[default]
    Open,
    /// Blocks movement, never painted
    Wall,
    /// Not part of the playing field
    Empty,
    /// Open floor holding a ball when the level starts
    BallStart,
}

impl CellKind {
    /// Whether a ball may enter or rest on this cell
    pub fn is_traversable(self) -> bool {
        matches!(self, CellKind::Open | CellKind::BallStart)
    }

    /// Paintable cells are exactly the traversable ones
    pub fn is_paintable(self) -> bool {
        self.is_traversable()
    }

    /// Character used by the text map format
    pub fn as_char(self) -> char {
        match self {
            CellKind::Open => '.',
            CellKind::Wall => '#',
            CellKind::Empty => '_',
            CellKind::BallStart => 'o',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellKind::Open),
            '#' => Some(CellKind::Wall),
            '_' => Some(CellKind::Empty),
            'o' | 'O' => Some(CellKind::BallStart),
            _ => None,
        }
    }
}

/// A rectangular board of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Build a grid from cells listed row by row, starting at `y = 0`
    pub fn new(width: usize, height: usize, cells: Vec<CellKind>) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from cells listed column by column, starting at `x = 0`
    pub fn from_columns(
        width: usize,
        height: usize,
        cells: Vec<CellKind>,
    ) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        let mut row_major = vec![CellKind::Open; expected];
        for (i, kind) in cells.into_iter().enumerate() {
            let (x, y) = (i / height, i % height);
            row_major[y * width + x] = kind;
        }
        Self::new(width, height, row_major)
    }

    /// A grid where every cell has the same kind
    pub fn filled(width: usize, height: usize, kind: CellKind) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        Self::new(width, height, vec![kind; width * height])
    }

    /// Parse a text map, one line per row with the top row first
    ///
    /// `.` open, `#` wall, `_` empty, `o` ball start. Blank lines and
    /// surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        check_dimensions(width, height)?;

        let mut cells = vec![CellKind::Open; width * height];
        for (line_idx, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(GridError::SizeMismatch {
                    expected: width,
                    actual: len,
                });
            }
            let y = height - 1 - line_idx;
            for (x, ch) in row.chars().enumerate() {
                let kind = CellKind::from_char(ch).ok_or(GridError::Parse {
                    line: line_idx + 1,
                    ch,
                })?;
                cells[y * width + x] = kind;
            }
        }
        Self::new(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Flat index of an in-bounds position
    #[inline]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    /// Position of a flat index
    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn cell_kind(&self, pos: Position) -> Result<CellKind, GridError> {
        self.index_of(pos)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| GridError::out_of_bounds(pos, self.width, self.height))
    }

    /// Whether a ball can enter `pos`; false outside the board
    #[inline]
    pub fn is_traversable(&self, pos: Position) -> bool {
        self.index_of(pos)
            .is_some_and(|idx| self.cells[idx].is_traversable())
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(|idx| self.position_of(idx))
    }

    /// Ball start positions in row-major order
    pub fn ball_starts(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == CellKind::BallStart)
            .map(|(idx, _)| self.position_of(idx))
            .collect()
    }

    /// Number of cells that can be painted
    pub fn paintable_count(&self) -> usize {
        self.cells.iter().filter(|kind| kind.is_paintable()).count()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.height).rev() {
            let row = &self.cells[y * self.width..(y + 1) * self.width];
            let line: String = row.iter().map(|kind| kind.as_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    // Coordinates are i32, so each side must fit, and the cell count must fit usize.
    let limit = i32::MAX as usize;
    if width == 0
        || height == 0
        || width > limit
        || height > limit
        || width.checked_mul(height).is_none()
    {
        return Err(GridError::InvalidDimensions { width, height });
    }
    Ok(())
}
