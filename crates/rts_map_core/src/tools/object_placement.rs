use super::{EditorTool, ToolKind};
use crate::{EditContext, MapError, OperationRecord, PointerEvent};

/// Placeholder for unit and building placement. Takes no input and claims
/// no history records.
#[derive(Debug, Default)]
pub struct ObjectPlacementTool;

impl EditorTool for ObjectPlacementTool {
    fn kind(&self) -> ToolKind {
        ToolKind::ObjectPlacement
    }

    fn on_pointer(
        &mut self,
        _event: &PointerEvent,
        _ctx: &mut EditContext<'_>,
    ) -> Result<Option<OperationRecord>, MapError> {
        Ok(None)
    }
}
