use serde::{Deserialize, Serialize};

use crate::{CellSet, Grid, Position};

/// Result of painting a batch of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintReport {
    pub painted_count: usize,
    /// Cells painted for the first time by this call, in input order
    pub newly_painted: Vec<Position>,
    /// True only on the call that first completed the board
    pub completed: bool,
}

/// Tracks which paintable cells have been painted
#[derive(Debug, Clone)]
pub struct CoverageTracker {
    width: usize,
    height: usize,
    paintable: CellSet,
    painted: CellSet,
    total_paintable: usize,
    completion_signalled: bool,
}

impl CoverageTracker {
    pub fn new(grid: &Grid) -> Self {
        let mut paintable = CellSet::new(grid.len());
        for (idx, kind) in grid.cells().iter().enumerate() {
            if kind.is_paintable() {
                paintable.insert(idx);
            }
        }
        Self {
            width: grid.width(),
            height: grid.height(),
            total_paintable: paintable.len(),
            painted: CellSet::new(grid.len()),
            paintable,
            completion_signalled: false,
        }
    }

    pub fn total_paintable(&self) -> usize {
        self.total_paintable
    }

    pub fn painted_count(&self) -> usize {
        self.painted.len()
    }

    /// Painted cells as flat grid indices
    pub fn painted_set(&self) -> &CellSet {
        &self.painted
    }

    pub fn is_painted(&self, pos: Position) -> bool {
        self.index_of(pos)
            .is_some_and(|idx| self.painted.contains(idx))
    }

    pub fn is_complete(&self) -> bool {
        self.painted.len() >= self.total_paintable
    }

    /// Paint `coords`, ignoring repeats and cells that cannot be painted
    pub fn paint<I>(&mut self, coords: I) -> PaintReport
    where
        I: IntoIterator<Item = Position>,
    {
        let mut newly_painted = Vec::new();
        for pos in coords {
            let Some(idx) = self.index_of(pos) else {
                continue;
            };
            if self.paintable.contains(idx) && self.painted.insert(idx) {
                newly_painted.push(pos);
            }
        }

        let completed = !self.completion_signalled && self.is_complete();
        if completed {
            self.completion_signalled = true;
        }

        PaintReport {
            painted_count: self.painted.len(),
            newly_painted,
            completed,
        }
    }

    /// Paint `coords` and return the updated painted count
    pub fn mark_painted<I>(&mut self, coords: I) -> usize
    where
        I: IntoIterator<Item = Position>,
    {
        self.paint(coords).painted_count
    }

    /// Fraction of paintable cells painted, 1.0 for a board with none
    pub fn fraction(&self) -> f64 {
        if self.total_paintable == 0 {
            return 1.0;
        }
        self.painted.len() as f64 / self.total_paintable as f64
    }

    /// Whole-number percentage for progress display
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    /// Forget all paint and re-arm the completion signal
    pub fn reset(&mut self) {
        self.painted.clear();
        self.completion_signalled = false;
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        let in_bounds = pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height;
        in_bounds.then(|| pos.y as usize * self.width + pos.x as usize)
    }
}
