//! rts_map_core - Edit engine for a tile-based RTS map editor
//!
//! This crate holds everything the editor needs that does not depend on a
//! game engine:
//! - Tile model and the [`TileGrid`] access trait
//! - Level documents with a working copy and explicit sync
//! - Stroke tracking with per-stroke write deduplication
//! - Self-inverting operation records and bounded undo/redo history
//! - The editor tools and the [`ToolRouter`] that dispatches to them
//!
//! # Example
//!
//! ```
//! use rts_map_core::{
//!     ButtonPhase, EditableLevel, GridSize, Level, PointerEvent, TileCoord, ToolKind, ToolRouter,
//! };
//!
//! let size = GridSize::new(10, 10);
//! let mut level = EditableLevel::new(Level::new("Skirmish", size));
//! let mut router = ToolRouter::new(size);
//! router.switch_tool(ToolKind::Paint);
//!
//! let mut ctx = level.context();
//! for phase in [ButtonPhase::Down, ButtonPhase::Up] {
//!     router
//!         .on_pointer(&PointerEvent::left(phase, TileCoord::new(5, 5)), &mut ctx)
//!         .unwrap();
//! }
//! assert_eq!(router.undo_len(), 1);
//! ```

pub mod history;
pub mod input;
pub mod level;
pub mod map;
pub mod operation;
pub mod router;
pub mod stroke;
pub mod tile;
pub mod tools;

pub use history::{HistoryError, HistoryStack, HISTORY_CAPACITY};
pub use input::{ButtonPhase, Modifiers, PointerButton, PointerEvent};
pub use level::{EditContext, EditableLevel, Level, LevelInfo, WorkingMap};
pub use map::{MapError, TileGrid, TileMap};
pub use operation::{OperationKind, OperationRecord, TileRecord};
pub use router::{HistoryOutcome, ToolRouter};
pub use stroke::{Brush, StrokeBounds, StrokeTracker};
pub use tile::{GridSize, TileCoord, TileData, TileType, VARIATION_RANGE};
pub use tools::{
    EditorTool, ObjectPlacementTool, OverlayKind, OverlayPainter, PaintSettings, PaintTool,
    SelectionTool, StartingLocationTool, StrokePhase, ToolKind, ToolSignal, MAX_PLAYERS,
};
