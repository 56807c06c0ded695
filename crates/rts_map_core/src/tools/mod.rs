//! Editor tools and the capability interface the router dispatches through

mod object_placement;
mod paint;
mod selection;
mod starting_location;

pub use object_placement::ObjectPlacementTool;
pub use paint::{PaintSettings, PaintTool, StrokePhase};
pub use selection::SelectionTool;
pub use starting_location::{StartingLocationTool, MAX_PLAYERS};

use crate::{EditContext, GridSize, LevelInfo, MapError, OperationRecord, PointerEvent, TileCoord, TileGrid};

/// The closed set of tools, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    #[default]
    Selection,
    Paint,
    ObjectPlacement,
    StartingLocation,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Selection,
        ToolKind::Paint,
        ToolKind::ObjectPlacement,
        ToolKind::StartingLocation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Selection => "SELECT",
            ToolKind::Paint => "TILE_PAINT",
            ToolKind::ObjectPlacement => "OBJECT_PLACEMENT",
            ToolKind::StartingLocation => "STARTING_LOCATION",
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tool-local signals routed to the active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolSignal {
    /// Grow or shrink the brush by the signal delta
    BrushSize,
}

/// What an overlay element represents; hosts pick the colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Brush footprint under the pointer
    Hover,
    /// Cell marked by the stroke in progress
    StrokeCell,
    /// Cell written by the last finished stroke
    PaintReach,
    /// Bounding box of the current or last stroke
    StrokeBounds,
    Selection,
    StartingLocation,
    /// Target cell while dragging a starting location
    DragTarget,
}

/// Drawing surface for tool overlays, in cell coordinates
pub trait OverlayPainter {
    /// Outline the cells in `[min, max)`
    fn outline_rect(&mut self, min: TileCoord, max: TileCoord, kind: OverlayKind);

    fn fill_cell(&mut self, cell: TileCoord, kind: OverlayKind);

    fn marker(&mut self, cell: TileCoord, label: &str, kind: OverlayKind);
}

/// Capability interface shared by every tool.
///
/// Only the active tool sees pointer input and `render`; every registered
/// tool is offered records on undo/redo and gets `render_passive` while
/// another tool is active.
pub trait EditorTool {
    fn kind(&self) -> ToolKind;

    /// Handle a pointer event. A returned record is pushed onto the undo stack.
    fn on_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditContext<'_>,
    ) -> Result<Option<OperationRecord>, MapError>;

    /// Cell under the pointer, `None` when the pointer left the viewport
    fn on_hover(&mut self, _coord: Option<TileCoord>) {}

    fn custom_signal(&mut self, _delta: i32, _signal: ToolSignal) {}

    /// Apply `record` if this tool understands its kind. The record is
    /// inverted in place on success.
    fn try_apply_inverse(
        &mut self,
        _record: &mut OperationRecord,
        _grid: &mut dyn TileGrid,
    ) -> Result<bool, MapError> {
        Ok(false)
    }

    /// Called with `true` when the tool becomes active and `false` when it stops being active
    fn on_tool_switch(&mut self, _active: bool) {}

    fn new_level_created(&mut self, _size: GridSize) {}

    fn render(&self, _info: &LevelInfo, _painter: &mut dyn OverlayPainter) {}

    fn render_passive(&self, _info: &LevelInfo, _painter: &mut dyn OverlayPainter) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::{TileData, TileMap, TileType};

    /// Grid wrapper that counts writes per cell
    pub struct CountingGrid {
        pub map: TileMap,
        pub writes: Vec<u32>,
    }

    impl CountingGrid {
        pub fn new(size: GridSize) -> Self {
            Self {
                map: TileMap::new(size),
                writes: vec![0; size.area()],
            }
        }

        pub fn writes_at(&self, coord: TileCoord) -> u32 {
            self.map
                .size()
                .index_of(coord)
                .map(|i| self.writes[i])
                .unwrap_or(0)
        }

        pub fn total_writes(&self) -> u32 {
            self.writes.iter().sum()
        }

        pub fn reset_counts(&mut self) {
            self.writes.iter_mut().for_each(|w| *w = 0);
        }
    }

    impl TileGrid for CountingGrid {
        fn size(&self) -> GridSize {
            self.map.size()
        }

        fn get_tile(&self, coord: TileCoord) -> Result<TileData, MapError> {
            self.map.get_tile(coord)
        }

        fn modify_tile(
            &mut self,
            coord: TileCoord,
            tile_type: TileType,
            variation: u8,
        ) -> Result<(), MapError> {
            self.map.modify_tile(coord, tile_type, variation)?;
            if let Some(i) = self.map.size().index_of(coord) {
                self.writes[i] += 1;
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Drawn {
        Rect(TileCoord, TileCoord, OverlayKind),
        Cell(TileCoord, OverlayKind),
        Marker(TileCoord, String, OverlayKind),
    }

    /// Painter that records every call
    #[derive(Default)]
    pub struct RecordingPainter {
        pub drawn: Vec<Drawn>,
    }

    impl RecordingPainter {
        pub fn count(&self, kind: OverlayKind) -> usize {
            self.drawn
                .iter()
                .filter(|d| match d {
                    Drawn::Rect(_, _, k) | Drawn::Cell(_, k) | Drawn::Marker(_, _, k) => *k == kind,
                })
                .count()
        }
    }

    impl OverlayPainter for RecordingPainter {
        fn outline_rect(&mut self, min: TileCoord, max: TileCoord, kind: OverlayKind) {
            self.drawn.push(Drawn::Rect(min, max, kind));
        }

        fn fill_cell(&mut self, cell: TileCoord, kind: OverlayKind) {
            self.drawn.push(Drawn::Cell(cell, kind));
        }

        fn marker(&mut self, cell: TileCoord, label: &str, kind: OverlayKind) {
            self.drawn.push(Drawn::Marker(cell, label.to_string(), kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_labels() {
        let labels: Vec<_> = ToolKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec!["SELECT", "TILE_PAINT", "OBJECT_PLACEMENT", "STARTING_LOCATION"]
        );
        assert_eq!(ToolKind::default(), ToolKind::Selection);
        assert_eq!(ToolKind::Paint.to_string(), "TILE_PAINT");
    }
}
