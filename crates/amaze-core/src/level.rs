//! Level input data and level progression.

use serde::{Deserialize, Serialize};

use crate::{CellKind, Grid, GridError};

/// Opaque identifier of the paint colour a level starts with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaintColor(String);

impl PaintColor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PaintColor {
    fn default() -> Self {
        Self::new("none")
    }
}

impl std::fmt::Display for PaintColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to set up one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    pub width: usize,
    pub height: usize,
    /// Row-major, starting at `y = 0`
    pub cells: Vec<CellKind>,
    #[serde(default)]
    pub start_color: PaintColor,
}

impl LevelData {
    pub fn from_grid(grid: &Grid, start_color: PaintColor) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().to_vec(),
            start_color,
        }
    }

    pub fn to_grid(&self) -> Result<Grid, GridError> {
        Grid::new(self.width, self.height, self.cells.clone())
    }

    pub fn into_grid(self) -> Result<Grid, GridError> {
        Grid::new(self.width, self.height, self.cells)
    }
}

/// An ordered list of levels that wraps around after the last one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSequence {
    levels: Vec<LevelData>,
}

impl LevelSequence {
    pub fn new(levels: Vec<LevelData>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the level played as level number `level_no` (1-based)
    ///
    /// Level numbers past the end wrap back to the first level; `0` is
    /// treated as `1`.
    pub fn index_for(&self, level_no: usize) -> Option<usize> {
        if self.levels.is_empty() {
            return None;
        }
        Some(level_no.saturating_sub(1) % self.levels.len())
    }

    pub fn level(&self, level_no: usize) -> Option<&LevelData> {
        self.index_for(level_no).map(|idx| &self.levels[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelData> {
        self.levels.iter()
    }
}
