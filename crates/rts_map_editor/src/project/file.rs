//! Level file save/load operations

use super::EditorSession;
use bevy::log::{info, warn};
use rts_map_core::Level;
use std::path::Path;

#[derive(Debug)]
pub enum LevelFileError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    NoPath,
}

impl std::fmt::Display for LevelFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelFileError::IoError(e) => write!(f, "IO error: {}", e),
            LevelFileError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelFileError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            LevelFileError::NoPath => write!(f, "No file path set"),
        }
    }
}

impl std::error::Error for LevelFileError {}

/// Read and validate a level file
pub fn load_level(path: &Path) -> Result<Level, LevelFileError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| LevelFileError::IoError(e.to_string()))?;

    let mut level: Level =
        serde_json::from_str(&content).map_err(|e| LevelFileError::ParseError(e.to_string()))?;

    level
        .map
        .validate()
        .map_err(|e| LevelFileError::ParseError(e.to_string()))?;

    let size = level.size();
    let dropped = level.info.retain_valid(size);
    if dropped > 0 {
        warn!(
            "Dropped {} invalid starting locations from {}",
            dropped,
            path.display()
        );
    }

    Ok(level)
}

impl EditorSession {
    /// Load a level file and start editing it
    pub fn open(&mut self, path: &Path) -> Result<(), LevelFileError> {
        let level = load_level(path)?;
        self.replace_level(level, Some(path.to_path_buf()));
        Ok(())
    }

    /// Commit pending edits and write the level to `path`
    pub fn save(&mut self, path: &Path) -> Result<(), LevelFileError> {
        let level = self
            .level
            .synced_level()
            .map_err(|e| LevelFileError::SerializeError(e.to_string()))?;

        let content = serde_json::to_string_pretty(level)
            .map_err(|e| LevelFileError::SerializeError(e.to_string()))?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| LevelFileError::IoError(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| LevelFileError::IoError(e.to_string()))?;

        self.path = Some(path.to_path_buf());
        info!("Saved level '{}' to {}", self.level.name(), path.display());
        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), LevelFileError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(LevelFileError::NoPath)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rts_map_core::{
        ButtonPhase, GridSize, PointerEvent, TileCoord, TileGrid, TileType, ToolKind,
    };
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("rts_map_editor_levels_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_commits_and_reloads() {
        let path = temp_path("saved.json");
        let mut session = EditorSession::new(Level::new("Saved", GridSize::new(6, 6)), 16);
        session.switch_tool(ToolKind::Paint);
        session.router.paint_mut().settings.tile_type = TileType::Rock;
        for phase in [ButtonPhase::Down, ButtonPhase::Up] {
            session
                .on_pointer(&PointerEvent::left(phase, TileCoord::new(2, 4)))
                .unwrap();
        }
        session.level.info_mut().custom_game = true;

        session.save(&path).unwrap();
        assert!(!session.has_uncommitted_changes());
        assert_eq!(session.path.as_deref(), Some(path.as_path()));

        let mut other = EditorSession::new(Level::new("Other", GridSize::new(2, 2)), 16);
        other.open(&path).unwrap();
        assert_eq!(other.level.name(), "Saved");
        assert_eq!(other.size(), GridSize::new(6, 6));
        assert!(other.level.info().custom_game);
        assert_eq!(
            other.level.get_tile(TileCoord::new(2, 4)).unwrap().tile_type,
            TileType::Rock
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_current_without_path() {
        let mut session = EditorSession::new(Level::new("Unsaved", GridSize::new(2, 2)), 16);
        assert!(matches!(
            session.save_current(),
            Err(LevelFileError::NoPath)
        ));
    }

    #[test]
    fn test_load_trims_invalid_starting_locations() {
        let path = temp_path("locations.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut level = Level::new("Locations", GridSize::new(5, 5));
        level.info.custom_game = true;
        level.info.starting_locations = vec![
            TileCoord::new(1, 1),
            TileCoord::new(9, 9),
            TileCoord::new(1, 1),
            TileCoord::new(-2, 0),
        ];
        level
            .info
            .starting_locations
            .extend((0..10).map(|x| TileCoord::new(x % 5, 4)));
        std::fs::write(&path, serde_json::to_string(&level).unwrap()).unwrap();

        let loaded = load_level(&path).unwrap();
        let mut expected = vec![TileCoord::new(1, 1)];
        expected.extend((0..5).map(|x| TileCoord::new(x, 4)));
        assert_eq!(loaded.info.starting_locations, expected);
        assert!(loaded.info.custom_game);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_bad_files() {
        assert!(matches!(
            load_level(&temp_path("missing.json")),
            Err(LevelFileError::IoError(_))
        ));

        let path = temp_path("truncated.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{"name":"Bad","map":{"width":3,"height":3,"tiles":[]}}"#,
        )
        .unwrap();
        assert!(matches!(
            load_level(&path),
            Err(LevelFileError::ParseError(_))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
