//! Standalone RTS map editor binary
//!
//! Run with: rts_map_editor

use bevy::prelude::*;
use bevy::window::WindowResolution;
use rts_map_editor::preferences::EditorPreferences;
use rts_map_editor::project::EditorSession;
use rts_map_editor::{EditorPlugin, EditorState};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "RTS Map Editor".to_string(),
                resolution: WindowResolution::new(1600, 900),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EditorPlugin::default())
        .add_systems(Startup, auto_open_last_level)
        .run();
}

/// System to reopen the level from the previous session, if it still exists
fn auto_open_last_level(
    mut session: ResMut<EditorSession>,
    mut editor_state: ResMut<EditorState>,
    preferences: Res<EditorPreferences>,
) {
    let Some(path) = preferences.last_level_path.clone() else {
        return;
    };

    if !path.exists() {
        warn!("Last level file not found: {}", path.display());
        return;
    }

    match session.open(&path) {
        Ok(()) => {
            editor_state.focus_level(session.size());
            info!("Auto-opened last level: {}", path.display());
        }
        Err(e) => {
            warn!("Failed to auto-open level '{}': {}", path.display(), e);
        }
    }
}
