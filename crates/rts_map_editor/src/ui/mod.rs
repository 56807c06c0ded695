//! Editor UI components using bevy_egui
//!
//! Toolbar on top, tool settings on the left, a status bar at the bottom and
//! modal dialogs for level files.

mod dialogs;
mod tool_panel;
mod toolbar;

pub use dialogs::{render_dialogs, PendingAction};
pub use tool_panel::render_tool_panel;
pub use toolbar::render_toolbar;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::preferences::EditorPreferences;
use crate::project::EditorSession;
use crate::tools::ViewportInputState;
use crate::EditorState;

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// UI state for panel visibility and sizes
#[derive(Resource)]
pub struct UiState {
    pub show_tool_panel: bool,
    pub tool_panel_width: f32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_tool_panel: true,
            tool_panel_width: 220.0,
        }
    }
}

fn render_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut editor_state: ResMut<EditorState>,
    mut session: ResMut<EditorSession>,
    mut preferences: ResMut<EditorPreferences>,
    viewport: Res<ViewportInputState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    render_toolbar(ctx, &mut ui_state, &mut editor_state, &mut session);
    render_status_bar(ctx, &editor_state, &session, &viewport);

    if ui_state.show_tool_panel {
        render_tool_panel(
            ctx,
            &mut ui_state,
            &mut editor_state,
            &mut session,
            &mut preferences,
        );
    }

    render_dialogs(ctx, &mut editor_state, &mut session, &mut preferences);
}

fn render_status_bar(
    ctx: &egui::Context,
    editor_state: &EditorState,
    session: &EditorSession,
    viewport: &ViewportInputState,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let size = session.size();
            ui.label(format!(
                "{} ({}x{})",
                session.level.name(),
                size.width,
                size.height
            ));
            if session.has_uncommitted_changes() {
                ui.label(format!("*{} modified", session.level.modified_count()));
            }

            ui.separator();
            ui.label(format!("Tool: {}", session.router.active()));

            ui.separator();
            match viewport.hovered_tile {
                Some(tile) => ui.label(format!("Cell: ({}, {})", tile.x, tile.y)),
                None => ui.label("Cell: -"),
            };

            ui.separator();
            ui.label(format!("Zoom: {:.0}%", editor_state.zoom * 100.0));

            if let Some(status) = &editor_state.status {
                ui.separator();
                ui.label(status);
            }

            if let Some(path) = &session.path {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(path.display().to_string());
                });
            }
        });
    });
}
