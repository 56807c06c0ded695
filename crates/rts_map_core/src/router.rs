//! Tool dispatch and the shared undo/redo history

use tracing::{debug, trace, warn};

use crate::tools::{
    EditorTool, ObjectPlacementTool, OverlayPainter, PaintTool, SelectionTool,
    StartingLocationTool, ToolKind, ToolSignal,
};
use crate::{
    EditContext, GridSize, HistoryError, HistoryStack, LevelInfo, MapError, OperationKind,
    OperationRecord, PointerEvent, TileCoord, TileGrid, HISTORY_CAPACITY,
};

/// Result of an undo or redo request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// The record was applied by the given tool and moved to the opposite stack
    Applied(ToolKind),
    /// Nothing to undo or redo
    Empty,
    /// No tool understood the record; it was dropped
    Unclaimed(OperationKind),
}

/// Owns every tool and both history stacks.
///
/// Pointer input, signals and `render` go to the active tool only. History
/// is global across tools, so undo and redo offer popped records to each
/// tool in registration order.
pub struct ToolRouter {
    selection: SelectionTool,
    paint: PaintTool,
    object_placement: ObjectPlacementTool,
    starting_location: StartingLocationTool,
    active: ToolKind,
    undo_stack: HistoryStack<OperationRecord>,
    redo_stack: HistoryStack<OperationRecord>,
}

impl ToolRouter {
    pub fn new(size: GridSize) -> Self {
        Self::with_capacity(size, HISTORY_CAPACITY)
    }

    pub fn with_capacity(size: GridSize, capacity: usize) -> Self {
        Self::with_paint_tool(PaintTool::new(size), capacity)
    }

    /// Build around an existing paint tool, e.g. one with a seeded generator
    pub fn with_paint_tool(paint: PaintTool, capacity: usize) -> Self {
        Self {
            selection: SelectionTool::default(),
            paint,
            object_placement: ObjectPlacementTool,
            starting_location: StartingLocationTool::default(),
            active: ToolKind::default(),
            undo_stack: HistoryStack::with_capacity(capacity),
            redo_stack: HistoryStack::with_capacity(capacity),
        }
    }

    fn tool(&self, kind: ToolKind) -> &dyn EditorTool {
        match kind {
            ToolKind::Selection => &self.selection,
            ToolKind::Paint => &self.paint,
            ToolKind::ObjectPlacement => &self.object_placement,
            ToolKind::StartingLocation => &self.starting_location,
        }
    }

    fn tool_mut(&mut self, kind: ToolKind) -> &mut dyn EditorTool {
        match kind {
            ToolKind::Selection => &mut self.selection,
            ToolKind::Paint => &mut self.paint,
            ToolKind::ObjectPlacement => &mut self.object_placement,
            ToolKind::StartingLocation => &mut self.starting_location,
        }
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn paint(&self) -> &PaintTool {
        &self.paint
    }

    pub fn paint_mut(&mut self) -> &mut PaintTool {
        &mut self.paint
    }

    pub fn selection(&self) -> &SelectionTool {
        &self.selection
    }

    pub fn starting_location(&self) -> &StartingLocationTool {
        &self.starting_location
    }

    pub fn starting_location_mut(&mut self) -> &mut StartingLocationTool {
        &mut self.starting_location
    }

    pub fn switch_tool(&mut self, kind: ToolKind) {
        if kind == self.active {
            return;
        }
        self.tool_mut(self.active).on_tool_switch(false);
        self.active = kind;
        self.tool_mut(kind).on_tool_switch(true);
        debug!("Switched to tool {}", kind);
    }

    /// Forward a pointer event to the active tool, recording any edit it commits
    pub fn on_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditContext<'_>,
    ) -> Result<(), MapError> {
        if let Some(record) = self.tool_mut(self.active).on_pointer(event, ctx)? {
            self.push_operation(record);
        }
        Ok(())
    }

    pub fn on_hover(&mut self, coord: Option<TileCoord>) {
        self.tool_mut(self.active).on_hover(coord);
    }

    pub fn custom_signal(&mut self, delta: i32, signal: ToolSignal) {
        self.tool_mut(self.active).custom_signal(delta, signal);
    }

    /// Record a committed edit. Any new edit invalidates the redo chain.
    pub fn push_operation(&mut self, record: OperationRecord) {
        if self.undo_stack.push(record).is_some() {
            trace!("Oldest undo entry evicted");
        }
        self.redo_stack.clear();
    }

    /// Undo the newest edit. An open stroke is abandoned first so its marks
    /// cannot outlive the grid state they were made against.
    pub fn undo(&mut self, grid: &mut dyn TileGrid) -> Result<HistoryOutcome, MapError> {
        self.paint.cancel_stroke();
        let record = match self.undo_stack.pop() {
            Ok(record) => record,
            Err(HistoryError::EmptyHistory) => {
                trace!("Nothing to undo");
                return Ok(HistoryOutcome::Empty);
            }
        };
        let outcome = self.dispatch(record, grid, true)?;
        trace!(
            "Undo: {} left to undo, {} to redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(outcome)
    }

    pub fn redo(&mut self, grid: &mut dyn TileGrid) -> Result<HistoryOutcome, MapError> {
        self.paint.cancel_stroke();
        let record = match self.redo_stack.pop() {
            Ok(record) => record,
            Err(HistoryError::EmptyHistory) => {
                trace!("Nothing to redo");
                return Ok(HistoryOutcome::Empty);
            }
        };
        let outcome = self.dispatch(record, grid, false)?;
        trace!(
            "Redo: {} left to undo, {} to redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(outcome)
    }

    /// Offer a popped record to each tool until one applies it, then move it
    /// to the opposite stack. A record that fails to apply goes back where it
    /// came from, unchanged.
    fn dispatch(
        &mut self,
        mut record: OperationRecord,
        grid: &mut dyn TileGrid,
        undo: bool,
    ) -> Result<HistoryOutcome, MapError> {
        for kind in ToolKind::ALL {
            let claimed = match self.tool_mut(kind).try_apply_inverse(&mut record, grid) {
                Ok(claimed) => claimed,
                Err(e) => {
                    let source = if undo {
                        &mut self.undo_stack
                    } else {
                        &mut self.redo_stack
                    };
                    source.push(record);
                    return Err(e);
                }
            };
            if claimed {
                let target = if undo {
                    &mut self.redo_stack
                } else {
                    &mut self.undo_stack
                };
                target.push(record);
                return Ok(HistoryOutcome::Applied(kind));
            }
        }
        warn!(
            "No tool claimed {:?} record with {} entries; dropping it",
            record.kind,
            record.len()
        );
        Ok(HistoryOutcome::Unclaimed(record.kind))
    }

    /// Abandon an open paint stroke. Returns false if none was open.
    pub fn cancel_stroke(&mut self) -> bool {
        self.paint.cancel_stroke()
    }

    pub fn is_stroking(&self) -> bool {
        self.paint.is_stroking()
    }

    /// Reset tools for a new or resized grid. History of the old grid is discarded.
    pub fn new_level_created(&mut self, size: GridSize) {
        for kind in ToolKind::ALL {
            self.tool_mut(kind).new_level_created(size);
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Active tool overlays, plus passive visuals of every other tool
    pub fn render(&self, info: &LevelInfo, painter: &mut dyn OverlayPainter) {
        for kind in ToolKind::ALL {
            if kind != self.active {
                self.tool(kind).render_passive(info, painter);
            }
        }
        self.tool(self.active).render(info, painter);
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn history_capacity(&self) -> usize {
        self.undo_stack.capacity()
    }
}
