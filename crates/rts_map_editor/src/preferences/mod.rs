//! User preferences persisted between editor sessions

mod file;

pub use file::PreferencesError;

use bevy::prelude::*;
use rts_map_core::{GridSize, PaintSettings, ToolRouter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest level edge the new level dialog accepts
pub const MAX_LEVEL_EDGE: u32 = 512;

/// Largest brush the editor offers
pub const MAX_BRUSH_SIZE: i32 = 64;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Size used for new levels
    pub level_width: u32,
    pub level_height: u32,
    /// Edge length of one cell in world units
    pub tile_size: f32,
    pub brush_size: i32,
    pub paint: PaintSettings,
    pub render_locations: bool,
    pub show_grid: bool,
    pub last_level_path: Option<PathBuf>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            level_width: 64,
            level_height: 64,
            tile_size: 24.0,
            brush_size: 1,
            paint: PaintSettings::default(),
            render_locations: true,
            show_grid: true,
            last_level_path: None,
        }
    }
}

impl EditorPreferences {
    /// Size for new levels, clamped to something the editor can hold
    pub fn level_size(&self) -> GridSize {
        GridSize::new(
            self.level_width.clamp(1, MAX_LEVEL_EDGE),
            self.level_height.clamp(1, MAX_LEVEL_EDGE),
        )
    }

    /// Push stored tool settings into a freshly built router
    pub fn apply_to_router(&self, router: &mut ToolRouter) {
        let paint = router.paint_mut();
        paint.settings = self.paint.clone();
        paint.settings.set_variation(self.paint.variation);
        paint.update_brush_size(self.brush_size.clamp(1, MAX_BRUSH_SIZE));
        router.starting_location_mut().render_locations = self.render_locations;
    }

    /// Copy the current tool settings back for saving
    pub fn capture_from_router(&mut self, router: &ToolRouter) {
        self.paint = router.paint().settings.clone();
        self.brush_size = router.paint().brush().size();
        self.render_locations = router.starting_location().render_locations;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rts_map_core::TileType;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let prefs: EditorPreferences = serde_json::from_str(r#"{"brush_size":4}"#).unwrap();
        assert_eq!(prefs.brush_size, 4);
        assert_eq!(prefs.level_size(), GridSize::new(64, 64));
        assert!(prefs.show_grid);
    }

    #[test]
    fn test_level_size_is_clamped() {
        let prefs = EditorPreferences {
            level_width: 0,
            level_height: 100_000,
            ..Default::default()
        };
        assert_eq!(prefs.level_size(), GridSize::new(1, MAX_LEVEL_EDGE));
    }

    #[test]
    fn test_stored_brush_size_is_clamped() {
        let mut router = ToolRouter::new(GridSize::new(8, 8));
        let prefs = EditorPreferences {
            brush_size: i32::MAX,
            ..Default::default()
        };
        prefs.apply_to_router(&mut router);
        assert_eq!(router.paint().brush().size(), MAX_BRUSH_SIZE);

        let prefs = EditorPreferences {
            brush_size: -3,
            ..Default::default()
        };
        prefs.apply_to_router(&mut router);
        assert_eq!(router.paint().brush().size(), 1);
    }

    #[test]
    fn test_router_settings_round_trip() {
        let mut prefs = EditorPreferences::default();
        prefs.brush_size = 5;
        prefs.paint.tile_type = TileType::WallHu;
        prefs.paint.variation = 150;
        prefs.render_locations = false;

        let mut router = ToolRouter::new(GridSize::new(8, 8));
        prefs.apply_to_router(&mut router);
        assert_eq!(router.paint().brush().size(), 5);
        assert_eq!(router.paint().settings.variation, 99);
        assert!(!router.starting_location().render_locations);

        let mut captured = EditorPreferences::default();
        captured.capture_from_router(&router);
        assert_eq!(captured.brush_size, 5);
        assert_eq!(captured.paint.tile_type, TileType::WallHu);
        assert!(!captured.render_locations);
    }
}
