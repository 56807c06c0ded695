//! Brush extents and per-stroke dirty tracking
//!
//! A stroke marks cells into a dirty bitmap while the pointer is held; the
//! bitmap guarantees each cell is written at most once when the stroke is
//! committed. A running bounding box limits how much of the bitmap has to be
//! scanned on commit and touched on clear.

use serde::{Deserialize, Serialize};

use crate::{GridSize, TileCoord};

/// Square brush described by how far it reaches left/up and right/down of
/// the sample point. Covers `[center - left, center + right)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    size: i32,
    left: i32,
    right: i32,
}

impl Brush {
    /// Build a brush of `size` cells, clamped to at least 1
    pub fn new(size: i32) -> Self {
        let size = size.max(1);
        // ceil((size + 1) / 2)
        let right = size / 2 + 1;
        Self {
            size,
            left: size - right,
            right,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    /// Cells covered around `center`, clamped into `bounds`.
    ///
    /// Returns `(lo, hi)` with `hi` exclusive; the region is empty when
    /// `lo.x >= hi.x` or `lo.y >= hi.y`.
    pub fn region(&self, center: TileCoord, bounds: GridSize) -> (TileCoord, TileCoord) {
        let limit = bounds.as_coord();
        let lo = TileCoord::new(
            center.x.saturating_sub(self.left),
            center.y.saturating_sub(self.left),
        )
        .max(TileCoord::ZERO);
        let hi = TileCoord::new(
            center.x.saturating_add(self.right),
            center.y.saturating_add(self.right),
        )
        .min(limit);
        (lo, hi)
    }
}

impl Default for Brush {
    fn default() -> Self {
        Brush::new(1)
    }
}

/// Axis-aligned cell range, `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeBounds {
    pub min: TileCoord,
    pub max: TileCoord,
}

impl StrokeBounds {
    /// True when the range holds no cells
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn width(&self) -> i32 {
        (self.max.x - self.min.x).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.max.y - self.min.y).max(0)
    }
}

/// Dirty bitmap plus bounding box for one stroke.
///
/// Invariant: every dirty cell lies inside `[min, max)` and the box is the
/// smallest one that covers them. A cleared tracker holds the inverted box
/// `(size, 0)`.
#[derive(Debug, Clone)]
pub struct StrokeTracker {
    size: GridSize,
    dirty: Vec<bool>,
    min: TileCoord,
    max: TileCoord,
}

impl StrokeTracker {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            dirty: vec![false; size.area()],
            min: size.as_coord(),
            max: TileCoord::ZERO,
        }
    }

    /// Reallocate the bitmap for a new grid size
    pub fn resize(&mut self, size: GridSize) {
        *self = StrokeTracker::new(size);
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Mark every unmarked cell under the brush. Returns how many cells became dirty.
    pub fn mark_region(&mut self, center: TileCoord, brush: &Brush) -> usize {
        let (lo, hi) = brush.region(center, self.size);
        if lo.x >= hi.x || lo.y >= hi.y {
            return 0;
        }

        self.min = self.min.min(lo);
        self.max = self.max.max(hi);

        let width = self.size.width as usize;
        let mut marked = 0;
        for y in lo.y..hi.y {
            let row = y as usize * width;
            for x in lo.x..hi.x {
                let cell = &mut self.dirty[row + x as usize];
                if !*cell {
                    *cell = true;
                    marked += 1;
                }
            }
        }
        marked
    }

    /// Unmark cells inside the current bounding box, then reset the box.
    /// Cells outside the box are never touched.
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        if !bounds.is_empty() {
            let width = self.size.width as usize;
            for y in bounds.min.y..bounds.max.y {
                let row = y as usize * width;
                self.dirty[row + bounds.min.x as usize..row + bounds.max.x as usize].fill(false);
            }
        }
        self.min = self.size.as_coord();
        self.max = TileCoord::ZERO;
    }

    pub fn is_dirty(&self, coord: TileCoord) -> bool {
        self.size
            .index_of(coord)
            .map(|i| self.dirty[i])
            .unwrap_or(false)
    }

    pub fn bounds(&self) -> StrokeBounds {
        StrokeBounds {
            min: self.min,
            max: self.max,
        }
    }

    /// Dirty cells in row-major order within the bounding box
    pub fn dirty_cells(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let bounds = self.bounds();
        let (ys, xs) = if bounds.is_empty() {
            (0..0, 0..0)
        } else {
            (bounds.min.y..bounds.max.y, bounds.min.x..bounds.max.x)
        };
        ys.flat_map(move |y| xs.clone().map(move |x| TileCoord::new(x, y)))
            .filter(move |c| self.is_dirty(*c))
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty_cells().count()
    }

    /// Flag a cell without touching the bounding box
    #[cfg(test)]
    pub(crate) fn force_dirty(&mut self, coord: TileCoord) {
        if let Some(i) = self.size.index_of(coord) {
            self.dirty[i] = true;
        }
    }
}
