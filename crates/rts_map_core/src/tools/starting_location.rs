//! Player starting locations for custom games.
//!
//! These edits change level info, not tiles, and are not recorded in history.

use tracing::debug;

use super::{EditorTool, OverlayKind, OverlayPainter, ToolKind};
use crate::{
    ButtonPhase, EditContext, GridSize, LevelInfo, MapError, OperationRecord, PointerButton,
    PointerEvent, TileCoord,
};

/// Most starting locations a level can hold
pub const MAX_PLAYERS: usize = 8;

#[derive(Debug)]
pub struct StartingLocationTool {
    /// Draw markers while another tool is active
    pub render_locations: bool,
    dragging: Option<usize>,
    hovered: Option<TileCoord>,
}

impl Default for StartingLocationTool {
    fn default() -> Self {
        Self {
            render_locations: true,
            dragging: None,
            hovered: None,
        }
    }
}

impl StartingLocationTool {
    /// Index of the location being dragged
    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    fn is_free(info: &LevelInfo, size: GridSize, coord: TileCoord) -> bool {
        size.contains(coord) && !info.starting_locations.contains(&coord)
    }

    fn draw_markers(info: &LevelInfo, painter: &mut dyn OverlayPainter) {
        for (i, location) in info.starting_locations.iter().enumerate() {
            painter.marker(*location, &format!("P{}", i + 1), OverlayKind::StartingLocation);
        }
    }
}

impl EditorTool for StartingLocationTool {
    fn kind(&self) -> ToolKind {
        ToolKind::StartingLocation
    }

    fn on_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditContext<'_>,
    ) -> Result<Option<OperationRecord>, MapError> {
        self.hovered = Some(event.coord);
        if !ctx.info.custom_game {
            self.dragging = None;
            return Ok(None);
        }
        let size = ctx.grid.size();
        let info = &mut *ctx.info;

        match (event.button, event.phase) {
            (PointerButton::Left, ButtonPhase::Down) if event.modifiers.ctrl => {
                if info.starting_locations.len() < MAX_PLAYERS
                    && Self::is_free(info, size, event.coord)
                {
                    info.starting_locations.push(event.coord);
                    debug!(
                        "Added starting location {} at ({}, {})",
                        info.starting_locations.len(),
                        event.coord.x,
                        event.coord.y
                    );
                }
            }
            (PointerButton::Left, ButtonPhase::Down) => {
                self.dragging = info
                    .starting_locations
                    .iter()
                    .position(|l| *l == event.coord);
            }
            (PointerButton::Left, ButtonPhase::Up) => {
                if let Some(index) = self.dragging.take() {
                    if index < info.starting_locations.len()
                        && Self::is_free(info, size, event.coord)
                    {
                        info.starting_locations[index] = event.coord;
                    }
                }
            }
            (PointerButton::Right, ButtonPhase::Down) => {
                if let Some(index) = info
                    .starting_locations
                    .iter()
                    .position(|l| *l == event.coord)
                {
                    info.starting_locations.remove(index);
                    debug!("Removed starting location {}", index + 1);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn on_hover(&mut self, coord: Option<TileCoord>) {
        self.hovered = coord;
    }

    fn on_tool_switch(&mut self, _active: bool) {
        self.dragging = None;
    }

    fn new_level_created(&mut self, _size: GridSize) {
        self.dragging = None;
        self.hovered = None;
    }

    fn render(&self, info: &LevelInfo, painter: &mut dyn OverlayPainter) {
        if !info.custom_game {
            return;
        }
        Self::draw_markers(info, painter);
        if let (Some(_), Some(target)) = (self.dragging, self.hovered) {
            painter.outline_rect(
                target,
                TileCoord::new(target.x + 1, target.y + 1),
                OverlayKind::DragTarget,
            );
        }
    }

    fn render_passive(&self, info: &LevelInfo, painter: &mut dyn OverlayPainter) {
        if info.custom_game && self.render_locations {
            Self::draw_markers(info, painter);
        }
    }
}
