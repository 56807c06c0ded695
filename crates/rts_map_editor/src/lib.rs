//! rts_map_editor - Bevy map editor for tile-based RTS levels
//!
//! Wires the edit engine from `rts_map_core` into a Bevy app:
//! - Viewport input mapped onto tool pointer events
//! - Sprite rendering of the working map plus gizmo tool overlays
//! - egui toolbar, tool panel and dialogs
//! - Level files and user preferences on disk
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use rts_map_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::default())
//!         .run();
//! }
//! ```

pub mod commands;
pub mod preferences;
pub mod project;
pub mod render;
pub mod tools;
pub mod ui;

pub use rts_map_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use rts_map_core::{GridSize, Level, ToolKind, HISTORY_CAPACITY};

use commands::{handle_keyboard_shortcuts, process_edit_actions};
use preferences::EditorPreferences;
use project::EditorSession;
use render::MapRenderPlugin;
use tools::EditorToolsPlugin;
use ui::{EditorUiPlugin, PendingAction};

/// Configuration for initial editor state.
/// Values set here override saved preferences.
#[derive(Clone, Debug)]
pub struct EditorStateConfig {
    /// Size of the level created on startup; preferences decide when unset
    pub level_size: Option<GridSize>,
    pub initial_tool: ToolKind,
    /// Depth of the undo and redo stacks
    pub history_capacity: usize,
    /// Grid overlay on startup; preferences decide when unset
    pub show_grid: Option<bool>,
}

impl Default for EditorStateConfig {
    fn default() -> Self {
        Self {
            level_size: None,
            initial_tool: ToolKind::Selection,
            history_capacity: HISTORY_CAPACITY,
            show_grid: None,
        }
    }
}

/// Main editor plugin.
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use rts_map_editor::{rts_map_core::{GridSize, ToolKind}, EditorPlugin};
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_level_size(GridSize::new(128, 96))
///             .with_initial_tool(ToolKind::Paint)
///             .with_history_capacity(32)
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    pub initial_state: EditorStateConfig,
}

impl EditorPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the blank level created on startup
    pub fn with_level_size(mut self, size: GridSize) -> Self {
        self.initial_state.level_size = Some(size);
        self
    }

    /// Set the initial tool selection (default: Selection)
    pub fn with_initial_tool(mut self, tool: ToolKind) -> Self {
        self.initial_state.initial_tool = tool;
        self
    }

    /// Depth of undo/redo history (default: 16)
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.initial_state.history_capacity = capacity.max(1);
        self
    }

    /// Set whether to show the grid on startup
    pub fn with_initial_grid(mut self, show: bool) -> Self {
        self.initial_state.show_grid = Some(show);
        self
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        let preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        let size = self
            .initial_state
            .level_size
            .unwrap_or_else(|| preferences.level_size());
        let mut session =
            EditorSession::new(Level::new("Untitled", size), self.initial_state.history_capacity);
        preferences.apply_to_router(&mut session.router);
        session.switch_tool(self.initial_state.initial_tool);

        let mut editor_state = EditorState::from_preferences(&preferences);
        if let Some(show) = self.initial_state.show_grid {
            editor_state.show_grid = show;
        }
        editor_state.focus_level(size);

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .add_plugins(MapRenderPlugin)
            .add_plugins(EditorToolsPlugin)
            .insert_resource(editor_state)
            .insert_resource(preferences)
            .insert_resource(session)
            .add_systems(Startup, setup_editor_camera)
            .add_systems(Update, (handle_keyboard_shortcuts, process_edit_actions).chain());
    }
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// UI-side editor state
#[derive(Resource)]
pub struct EditorState {
    pub show_grid: bool,
    pub zoom: f32,
    pub camera_offset: Vec2,
    /// Edge length of one cell in world units
    pub tile_size: f32,

    pub pending_action: Option<PendingAction>,
    pub error_message: Option<String>,
    /// Last status line shown in the bottom bar
    pub status: Option<String>,

    // New level dialog
    pub show_new_level_dialog: bool,
    pub new_level_name: String,
    pub new_level_width: u32,
    pub new_level_height: u32,

    // Open/save-as dialog
    pub show_path_dialog: bool,
    pub path_dialog_mode: PathDialogMode,
    pub path_input: String,
}

/// What the path dialog does on confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathDialogMode {
    #[default]
    Open,
    SaveAs,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::from_preferences(&EditorPreferences::default())
    }
}

impl EditorState {
    pub fn from_preferences(preferences: &EditorPreferences) -> Self {
        let size = preferences.level_size();
        Self {
            show_grid: preferences.show_grid,
            zoom: 1.0,
            camera_offset: Vec2::ZERO,
            tile_size: preferences.tile_size.max(1.0),
            pending_action: None,
            error_message: None,
            status: None,
            show_new_level_dialog: false,
            new_level_name: "Untitled".to_string(),
            new_level_width: size.width,
            new_level_height: size.height,
            show_path_dialog: false,
            path_dialog_mode: PathDialogMode::Open,
            path_input: preferences
                .last_level_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    /// Center the camera over a level of the given size
    pub fn focus_level(&mut self, size: GridSize) {
        self.camera_offset = Vec2::new(
            size.width as f32 * self.tile_size / 2.0,
            size.height as f32 * self.tile_size / 2.0,
        );
    }
}
