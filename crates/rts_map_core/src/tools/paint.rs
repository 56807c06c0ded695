//! Tile painting tool
//!
//! `Idle --(left down)--> Stroking --(left up)--> Idle`. Every pointer sample
//! while stroking marks the brush footprint; the grid is only written when the
//! stroke finishes, once per marked cell.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{EditorTool, OverlayKind, OverlayPainter, ToolKind, ToolSignal};
use crate::{
    Brush, ButtonPhase, EditContext, GridSize, LevelInfo, MapError, OperationKind,
    OperationRecord, PointerButton, PointerEvent, StrokeTracker, TileCoord, TileGrid, TileRecord,
    TileType, VARIATION_RANGE,
};

/// User-facing paint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintSettings {
    pub tile_type: TileType,
    /// Fixed variation, used when `randomize_variation` is off
    pub variation: u8,
    /// Draw a fresh variation for every painted cell
    pub randomize_variation: bool,
    pub show_stroke_bounds: bool,
    pub show_paint_reach: bool,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            tile_type: TileType::default(),
            variation: 0,
            randomize_variation: false,
            show_stroke_bounds: false,
            show_paint_reach: false,
        }
    }
}

impl PaintSettings {
    /// Set the fixed variation, clamped into the valid range
    pub fn set_variation(&mut self, variation: u8) {
        self.variation = variation.min(VARIATION_RANGE - 1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokePhase {
    #[default]
    Idle,
    Stroking,
}

pub struct PaintTool {
    pub settings: PaintSettings,
    brush: Brush,
    tracker: StrokeTracker,
    phase: StrokePhase,
    hovered: Option<TileCoord>,
    rng: fastrand::Rng,
}

impl PaintTool {
    pub fn new(size: GridSize) -> Self {
        Self::with_rng(size, fastrand::Rng::new())
    }

    /// Build with a caller-supplied generator, e.g. a seeded one
    pub fn with_rng(size: GridSize, rng: fastrand::Rng) -> Self {
        Self {
            settings: PaintSettings::default(),
            brush: Brush::default(),
            tracker: StrokeTracker::new(size),
            phase: StrokePhase::Idle,
            hovered: None,
            rng,
        }
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn tracker(&self) -> &StrokeTracker {
        &self.tracker
    }

    pub fn phase(&self) -> StrokePhase {
        self.phase
    }

    pub fn is_stroking(&self) -> bool {
        self.phase == StrokePhase::Stroking
    }

    pub fn hovered(&self) -> Option<TileCoord> {
        self.hovered
    }

    /// Resize the brush; sizes below 1 are clamped
    pub fn update_brush_size(&mut self, size: i32) {
        self.brush = Brush::new(size);
        trace!("Brush size set to {}", self.brush.size());
    }

    /// Drop marks left by the previous stroke and begin a new one
    pub fn on_stroke_start(&mut self) {
        self.tracker.clear();
        self.phase = StrokePhase::Stroking;
    }

    /// Mark the brush footprint at `coord`. Ignored unless stroking.
    pub fn mark(&mut self, coord: TileCoord) -> usize {
        if self.phase != StrokePhase::Stroking {
            return 0;
        }
        self.tracker.mark_region(coord, &self.brush)
    }

    /// Write every marked cell once and return the record that undoes it.
    ///
    /// The tracker keeps its marks so the reach of the stroke can be shown
    /// until the next stroke starts. Returns `None` when nothing was marked.
    pub fn finish_stroke(
        &mut self,
        grid: &mut dyn TileGrid,
    ) -> Result<Option<OperationRecord>, MapError> {
        if self.phase != StrokePhase::Stroking {
            return Ok(None);
        }
        self.phase = StrokePhase::Idle;

        let cells: Vec<TileCoord> = self.tracker.dirty_cells().collect();
        if cells.is_empty() {
            return Ok(None);
        }

        // Read everything first so a grid that no longer matches the tracker
        // fails before any cell is written
        let mut record = OperationRecord::with_capacity(OperationKind::TilePaint, cells.len());
        for cell in cells {
            let old = grid.get_tile(cell)?;
            record.push(TileRecord::new(cell, old.tile_type, old.variation));
        }

        let tile_type = self.settings.tile_type;
        let fixed = self.settings.variation.min(VARIATION_RANGE - 1);
        for (i, entry) in record.entries.iter().enumerate() {
            let variation = if self.settings.randomize_variation {
                self.rng.u8(0..VARIATION_RANGE)
            } else {
                fixed
            };
            if let Err(e) = grid.modify_tile(entry.position, tile_type, variation) {
                for done in &record.entries[..i] {
                    let _ = grid.modify_tile(done.position, done.tile_type, done.variation);
                }
                return Err(e);
            }
        }

        debug!(
            "Stroke committed: {} cells of {}",
            record.len(),
            tile_type.name()
        );
        Ok(Some(record))
    }

    /// Abandon an open stroke without writing anything.
    /// Returns false if no stroke was open.
    pub fn cancel_stroke(&mut self) -> bool {
        if self.phase != StrokePhase::Stroking {
            return false;
        }
        self.tracker.clear();
        self.phase = StrokePhase::Idle;
        debug!("Stroke cancelled");
        true
    }
}

impl EditorTool for PaintTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Paint
    }

    fn on_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditContext<'_>,
    ) -> Result<Option<OperationRecord>, MapError> {
        if event.button != PointerButton::Left {
            return Ok(None);
        }
        self.hovered = Some(event.coord);

        match event.phase {
            ButtonPhase::Down => {
                self.on_stroke_start();
                self.mark(event.coord);
                Ok(None)
            }
            ButtonPhase::Held => {
                self.mark(event.coord);
                Ok(None)
            }
            ButtonPhase::Up => {
                self.mark(event.coord);
                self.finish_stroke(&mut *ctx.grid)
            }
        }
    }

    fn on_hover(&mut self, coord: Option<TileCoord>) {
        self.hovered = coord;
    }

    fn custom_signal(&mut self, delta: i32, signal: ToolSignal) {
        match signal {
            ToolSignal::BrushSize => {
                self.update_brush_size(self.brush.size().saturating_add(delta))
            }
        }
    }

    fn try_apply_inverse(
        &mut self,
        record: &mut OperationRecord,
        grid: &mut dyn TileGrid,
    ) -> Result<bool, MapError> {
        if record.kind != OperationKind::TilePaint {
            return Ok(false);
        }
        record.apply(grid)?;
        // Reach of the last stroke no longer matches the grid
        self.tracker.clear();
        Ok(true)
    }

    fn on_tool_switch(&mut self, active: bool) {
        if !active {
            self.cancel_stroke();
            self.hovered = None;
        }
    }

    fn new_level_created(&mut self, size: GridSize) {
        self.tracker.resize(size);
        self.phase = StrokePhase::Idle;
        self.hovered = None;
    }

    fn render(&self, _info: &LevelInfo, painter: &mut dyn OverlayPainter) {
        let stroking = self.is_stroking();
        if stroking || self.settings.show_paint_reach {
            let kind = if stroking {
                OverlayKind::StrokeCell
            } else {
                OverlayKind::PaintReach
            };
            for cell in self.tracker.dirty_cells() {
                painter.fill_cell(cell, kind);
            }
        }

        if self.settings.show_stroke_bounds {
            let bounds = self.tracker.bounds();
            if !bounds.is_empty() {
                painter.outline_rect(bounds.min, bounds.max, OverlayKind::StrokeBounds);
            }
        }

        if let Some(hovered) = self.hovered {
            let (lo, hi) = self.brush.region(hovered, self.tracker.size());
            if lo.x < hi.x && lo.y < hi.y {
                painter.outline_rect(lo, hi, OverlayKind::Hover);
            }
        }
    }
}
