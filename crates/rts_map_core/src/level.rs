//! Level document and the working copy the editor mutates

use serde::{Deserialize, Serialize};

use crate::{GridSize, MapError, TileCoord, TileData, TileGrid, TileMap, TileType, MAX_PLAYERS};

/// Scenario metadata stored alongside the map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Starting locations only matter for custom games
    #[serde(default)]
    pub custom_game: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starting_locations: Vec<TileCoord>,
}

impl LevelInfo {
    /// Drop starting locations outside `size`, repeats, and anything past
    /// the player limit. Returns how many were removed.
    pub fn retain_valid(&mut self, size: GridSize) -> usize {
        let before = self.starting_locations.len();
        let mut kept: Vec<TileCoord> = Vec::with_capacity(before.min(MAX_PLAYERS));
        for location in self.starting_locations.drain(..) {
            if kept.len() < MAX_PLAYERS && size.contains(location) && !kept.contains(&location) {
                kept.push(location);
            }
        }
        self.starting_locations = kept;
        before - self.starting_locations.len()
    }
}

/// A playable map: terrain grid plus scenario info
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub map: TileMap,
    #[serde(default)]
    pub info: LevelInfo,
}

impl Level {
    /// Create a new level covered in the default terrain
    pub fn new(name: impl Into<String>, size: GridSize) -> Self {
        Self {
            name: name.into(),
            map: TileMap::new(size),
            info: LevelInfo::default(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.map.size()
    }
}

/// Borrowed view handed to tools: the grid they paint into and the level info
/// they may edit directly.
pub struct EditContext<'a> {
    pub grid: &'a mut dyn TileGrid,
    pub info: &'a mut LevelInfo,
}

impl<'a> EditContext<'a> {
    pub fn new(grid: &'a mut dyn TileGrid, info: &'a mut LevelInfo) -> Self {
        Self { grid, info }
    }
}

/// Working clone of a level's map that remembers which cells were written
#[derive(Debug, Clone)]
pub struct WorkingMap {
    map: TileMap,
    modified: Vec<bool>,
    modified_count: usize,
    revision: u64,
}

impl WorkingMap {
    pub fn new(map: TileMap) -> Self {
        let modified = vec![false; map.size().area()];
        Self {
            map,
            modified,
            modified_count: 0,
            revision: 0,
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn is_modified(&self, coord: TileCoord) -> bool {
        self.map
            .size()
            .index_of(coord)
            .map(|i| self.modified[i])
            .unwrap_or(false)
    }

    fn clear_modified(&mut self) {
        self.modified.iter_mut().for_each(|m| *m = false);
        self.modified_count = 0;
    }
}

impl TileGrid for WorkingMap {
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
        // modify_tile succeeded, so the coordinate is in bounds
        if let Some(i) = self.map.size().index_of(coord) {
            if !self.modified[i] {
                self.modified[i] = true;
                self.modified_count += 1;
            }
        }
        self.revision += 1;
        Ok(())
    }
}

/// Editing session over a [`Level`].
///
/// All tile writes land in a [`WorkingMap`]; the level itself only changes
/// on [`EditableLevel::sync_to_level_data`].
#[derive(Debug, Clone)]
pub struct EditableLevel {
    level: Level,
    working: WorkingMap,
}

impl EditableLevel {
    pub fn new(level: Level) -> Self {
        let working = WorkingMap::new(level.map.clone());
        Self { level, working }
    }

    /// The authoritative level (as of the last sync)
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The working clone, including unsynced edits
    pub fn working_map(&self) -> &TileMap {
        self.working.map()
    }

    pub fn info(&self) -> &LevelInfo {
        &self.level.info
    }

    pub fn info_mut(&mut self) -> &mut LevelInfo {
        &mut self.level.info
    }

    pub fn name(&self) -> &str {
        &self.level.name
    }

    /// Bumped on every tile write; renderers compare against it
    pub fn revision(&self) -> u64 {
        self.working.revision
    }

    /// Number of cells written since the last sync
    pub fn modified_count(&self) -> usize {
        self.working.modified_count
    }

    pub fn is_modified(&self, coord: TileCoord) -> bool {
        self.working.is_modified(coord)
    }

    /// Split borrow for tool dispatch
    pub fn context(&mut self) -> EditContext<'_> {
        EditContext {
            grid: &mut self.working,
            info: &mut self.level.info,
        }
    }

    /// Publish the working clone into the level and clear all modified flags
    pub fn sync_to_level_data(&mut self) -> Result<(), MapError> {
        if self.working.size() != self.level.map.size() {
            return Err(MapError::SizeMismatch {
                expected: self.level.map.size(),
                found: self.working.size(),
            });
        }
        self.level.map.clone_from(&self.working.map);
        self.working.clear_modified();
        Ok(())
    }

    /// Sync and hand out the level, e.g. for saving
    pub fn synced_level(&mut self) -> Result<&Level, MapError> {
        self.sync_to_level_data()?;
        Ok(&self.level)
    }
}

impl TileGrid for EditableLevel {
    fn size(&self) -> GridSize {
        self.working.size()
    }

    fn get_tile(&self, coord: TileCoord) -> Result<TileData, MapError> {
        self.working.get_tile(coord)
    }

    fn modify_tile(
        &mut self,
        coord: TileCoord,
        tile_type: TileType,
        variation: u8,
    ) -> Result<(), MapError> {
        self.working.modify_tile(coord, tile_type, variation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_10x10() -> EditableLevel {
        EditableLevel::new(Level::new("Test", GridSize::new(10, 10)))
    }

    #[test]
    fn test_writes_stay_in_working_copy_until_sync() {
        let mut editable = level_10x10();
        let coord = TileCoord::new(4, 4);
        editable.modify_tile(coord, TileType::Trees, 3).unwrap();

        assert_eq!(
            editable.get_tile(coord).unwrap(),
            TileData::new(TileType::Trees, 3)
        );
        assert_eq!(
            editable.level().map.get_tile(coord).unwrap(),
            TileData::default()
        );
        assert!(editable.is_modified(coord));
        assert_eq!(editable.modified_count(), 1);

        editable.sync_to_level_data().unwrap();
        assert_eq!(
            editable.level().map.get_tile(coord).unwrap(),
            TileData::new(TileType::Trees, 3)
        );
        assert!(!editable.is_modified(coord));
        assert_eq!(editable.modified_count(), 0);
    }

    #[test]
    fn test_modified_count_counts_cells_not_writes() {
        let mut editable = level_10x10();
        let before = editable.revision();
        editable
            .modify_tile(TileCoord::new(1, 1), TileType::Rock, 0)
            .unwrap();
        editable
            .modify_tile(TileCoord::new(1, 1), TileType::Water, 0)
            .unwrap();
        assert_eq!(editable.modified_count(), 1);
        assert_eq!(editable.revision(), before + 2);
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        let mut editable = level_10x10();
        assert!(editable
            .modify_tile(TileCoord::new(10, 0), TileType::Rock, 0)
            .is_err());
        assert_eq!(editable.modified_count(), 0);
        assert_eq!(editable.revision(), 0);
    }

    #[test]
    fn test_context_exposes_grid_and_info() {
        let mut editable = level_10x10();
        {
            let ctx = editable.context();
            ctx.info.custom_game = true;
            ctx.grid
                .modify_tile(TileCoord::new(0, 0), TileType::Mud1, 0)
                .unwrap();
        }
        assert!(editable.info().custom_game);
        assert!(editable.is_modified(TileCoord::ZERO));
        assert_eq!(editable.revision(), 1);
        assert_eq!(
            editable.working_map().get_tile(TileCoord::ZERO).unwrap(),
            TileData::new(TileType::Mud1, 0)
        );
    }

    #[test]
    fn test_retain_valid_trims_starting_locations() {
        let mut info = LevelInfo {
            custom_game: true,
            starting_locations: vec![
                TileCoord::new(0, 0),
                TileCoord::new(-1, 2),
                TileCoord::new(0, 0),
                TileCoord::new(4, 1),
            ],
        };
        info.starting_locations.extend((0..10).map(|x| TileCoord::new(x % 4, 2)));

        let removed = info.retain_valid(GridSize::new(4, 3));
        assert_eq!(info.starting_locations.len(), 5);
        assert_eq!(removed, 9);
        assert_eq!(info.starting_locations[0], TileCoord::new(0, 0));
        assert_eq!(info.starting_locations[1], TileCoord::new(0, 2));
        assert_eq!(info.retain_valid(GridSize::new(4, 3)), 0);
    }

    #[test]
    fn test_retain_valid_caps_player_count() {
        let mut info = LevelInfo {
            custom_game: true,
            starting_locations: (0..12).map(|x| TileCoord::new(x, 0)).collect(),
        };
        assert_eq!(info.retain_valid(GridSize::new(16, 1)), 12 - MAX_PLAYERS);
        assert_eq!(info.starting_locations.len(), MAX_PLAYERS);
        assert_eq!(
            info.starting_locations.last(),
            Some(&TileCoord::new(MAX_PLAYERS as i32 - 1, 0))
        );
    }

    #[test]
    fn test_level_json_round_trip_keeps_info() {
        let mut level = Level::new("Skirmish", GridSize::new(3, 2));
        level.info.custom_game = true;
        level.info.starting_locations.push(TileCoord::new(1, 1));

        let json = serde_json::to_string(&level).unwrap();
        let loaded: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, level);
    }
}
