use super::{EditorTool, OverlayKind, OverlayPainter, ToolKind};
use crate::{
    ButtonPhase, EditContext, GridSize, LevelInfo, MapError, OperationRecord, PointerButton,
    PointerEvent, TileCoord,
};

/// Inspection tool: remembers the last clicked cell
#[derive(Debug, Default)]
pub struct SelectionTool {
    selected: Option<TileCoord>,
}

impl SelectionTool {
    pub fn selected(&self) -> Option<TileCoord> {
        self.selected
    }
}

impl EditorTool for SelectionTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Selection
    }

    fn on_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditContext<'_>,
    ) -> Result<Option<OperationRecord>, MapError> {
        if event.button == PointerButton::Left && event.phase == ButtonPhase::Down {
            self.selected = ctx
                .grid
                .size()
                .contains(event.coord)
                .then_some(event.coord);
        }
        Ok(None)
    }

    fn new_level_created(&mut self, _size: GridSize) {
        self.selected = None;
    }

    fn render(&self, _info: &LevelInfo, painter: &mut dyn OverlayPainter) {
        if let Some(cell) = self.selected {
            painter.fill_cell(cell, OverlayKind::Selection);
        }
    }
}
