//! The level being edited, together with its tools and history

mod file;

pub use file::{load_level, LevelFileError};

use bevy::prelude::*;
use rts_map_core::{
    EditableLevel, GridSize, HistoryOutcome, Level, MapError, PointerEvent, TileCoord, ToolKind,
    ToolRouter, ToolSignal,
};
use std::path::PathBuf;

/// Editing session: the open level, the tool router, and where the level lives on disk
#[derive(Resource)]
pub struct EditorSession {
    pub level: EditableLevel,
    pub router: ToolRouter,
    /// File the level was loaded from or last saved to
    pub path: Option<PathBuf>,
    generation: u64,
}

impl EditorSession {
    pub fn new(level: Level, history_capacity: usize) -> Self {
        let router = ToolRouter::with_capacity(level.size(), history_capacity);
        Self {
            level: EditableLevel::new(level),
            router,
            path: None,
            generation: 0,
        }
    }

    /// Bumped whenever the level is replaced; renderers pair it with the level revision
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn size(&self) -> GridSize {
        self.level.level().size()
    }

    /// Swap in another level. Tools are reset and history is discarded.
    pub fn replace_level(&mut self, level: Level, path: Option<PathBuf>) {
        let size = level.size();
        self.level = EditableLevel::new(level);
        self.router.new_level_created(size);
        self.path = path;
        self.generation += 1;
        info!("Editing level '{}' ({}x{})", self.level.name(), size.width, size.height);
    }

    /// Start over with a blank level of the given size
    pub fn new_level(&mut self, name: impl Into<String>, size: GridSize) {
        self.replace_level(Level::new(name, size), None);
    }

    pub fn on_pointer(&mut self, event: &PointerEvent) -> Result<(), MapError> {
        let mut ctx = self.level.context();
        self.router.on_pointer(event, &mut ctx)
    }

    pub fn on_hover(&mut self, coord: Option<TileCoord>) {
        self.router.on_hover(coord);
    }

    pub fn custom_signal(&mut self, delta: i32, signal: ToolSignal) {
        self.router.custom_signal(delta, signal);
    }

    pub fn switch_tool(&mut self, kind: ToolKind) {
        self.router.switch_tool(kind);
    }

    pub fn undo(&mut self) -> Result<HistoryOutcome, MapError> {
        self.router.undo(&mut self.level)
    }

    pub fn redo(&mut self) -> Result<HistoryOutcome, MapError> {
        self.router.redo(&mut self.level)
    }

    /// Publish working edits into the level document
    pub fn commit(&mut self) -> Result<(), MapError> {
        self.level.sync_to_level_data()
    }

    pub fn has_uncommitted_changes(&self) -> bool {
        self.level.modified_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rts_map_core::{ButtonPhase, TileGrid, TileType};

    fn paint_at(session: &mut EditorSession, coord: TileCoord) {
        for phase in [ButtonPhase::Down, ButtonPhase::Up] {
            session
                .on_pointer(&PointerEvent::left(phase, coord))
                .unwrap();
        }
    }

    #[test]
    fn test_paint_commit_and_undo() {
        let mut session = EditorSession::new(Level::new("Test", GridSize::new(8, 8)), 16);
        session.switch_tool(ToolKind::Paint);
        session.router.paint_mut().settings.tile_type = TileType::Water;

        let coord = TileCoord::new(3, 3);
        paint_at(&mut session, coord);
        assert!(session.has_uncommitted_changes());
        assert_eq!(
            session.level.get_tile(coord).unwrap().tile_type,
            TileType::Water
        );

        session.commit().unwrap();
        assert!(!session.has_uncommitted_changes());
        assert_eq!(
            session.level.level().map.get_tile(coord).unwrap().tile_type,
            TileType::Water
        );

        assert_eq!(
            session.undo().unwrap(),
            HistoryOutcome::Applied(ToolKind::Paint)
        );
        assert_eq!(
            session.level.get_tile(coord).unwrap().tile_type,
            TileType::Ground1
        );
        assert!(session.has_uncommitted_changes());
    }

    #[test]
    fn test_replace_level_resets_history() {
        let mut session = EditorSession::new(Level::new("Test", GridSize::new(8, 8)), 16);
        session.switch_tool(ToolKind::Paint);
        paint_at(&mut session, TileCoord::new(1, 1));
        assert_eq!(session.router.undo_len(), 1);
        let generation = session.generation();

        session.new_level("Bigger", GridSize::new(40, 20));
        assert_eq!(session.router.undo_len(), 0);
        assert_eq!(session.size(), GridSize::new(40, 20));
        assert_eq!(session.router.paint().tracker().size(), GridSize::new(40, 20));
        assert_eq!(session.undo().unwrap(), HistoryOutcome::Empty);
        assert_eq!(session.generation(), generation + 1);
    }

    #[test]
    fn test_history_capacity_is_configurable() {
        let session = EditorSession::new(Level::new("Test", GridSize::new(4, 4)), 3);
        assert_eq!(session.router.history_capacity(), 3);
    }
}
