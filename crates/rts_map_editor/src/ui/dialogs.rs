//! Dialog windows for the editor

use bevy::prelude::*;
use bevy_egui::egui;
use rts_map_core::GridSize;
use std::path::PathBuf;

use crate::preferences::{EditorPreferences, MAX_LEVEL_EDGE};
use crate::project::{EditorSession, LevelFileError};
use crate::{EditorState, PathDialogMode};

/// Actions that can be triggered from the toolbar or shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    New,
    Open,
    Save,
    SaveAs,
    /// Copy working map edits into the level data
    Commit,
    Undo,
    Redo,
}

impl PendingAction {
    /// File actions are resolved here; edit actions belong to the command system
    fn is_file_action(self) -> bool {
        matches!(
            self,
            PendingAction::New | PendingAction::Open | PendingAction::Save | PendingAction::SaveAs
        )
    }
}

/// Render all dialogs
pub fn render_dialogs(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    session: &mut EditorSession,
    preferences: &mut EditorPreferences,
) {
    render_new_level_dialog(ctx, editor_state, session);
    render_path_dialog(ctx, editor_state, session, preferences);
    render_error_dialog(ctx, editor_state);

    let Some(action) = editor_state
        .pending_action
        .filter(|action| action.is_file_action())
    else {
        return;
    };
    editor_state.pending_action = None;

    match action {
        PendingAction::New => {
            let size = session.size();
            editor_state.new_level_width = size.width;
            editor_state.new_level_height = size.height;
            editor_state.show_new_level_dialog = true;
        }
        PendingAction::Open => {
            editor_state.path_dialog_mode = PathDialogMode::Open;
            editor_state.show_path_dialog = true;
        }
        PendingAction::SaveAs => open_save_as(editor_state, session),
        PendingAction::Save => match session.save_current() {
            Ok(()) => {
                editor_state.status = Some("Level saved".to_string());
                remember_path(preferences, session.path.clone());
            }
            Err(LevelFileError::NoPath) => open_save_as(editor_state, session),
            Err(e) => {
                error!("Failed to save level: {}", e);
                editor_state.error_message = Some(format!("Failed to save: {}", e));
            }
        },
        PendingAction::Commit | PendingAction::Undo | PendingAction::Redo => {}
    }
}

fn open_save_as(editor_state: &mut EditorState, session: &EditorSession) {
    if let Some(path) = &session.path {
        editor_state.path_input = path.to_string_lossy().to_string();
    }
    editor_state.path_dialog_mode = PathDialogMode::SaveAs;
    editor_state.show_path_dialog = true;
}

fn remember_path(preferences: &mut EditorPreferences, path: Option<PathBuf>) {
    if preferences.last_level_path == path {
        return;
    }
    preferences.last_level_path = path;
    if let Err(e) = preferences.save() {
        warn!("Failed to save preferences: {}", e);
    }
}

fn render_new_level_dialog(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    session: &mut EditorSession,
) {
    if !editor_state.show_new_level_dialog {
        return;
    }

    let mut open = true;
    egui::Window::new("New Level")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut editor_state.new_level_name);
            });
            ui.horizontal(|ui| {
                ui.label("Width:");
                ui.add(
                    egui::DragValue::new(&mut editor_state.new_level_width)
                        .range(1..=MAX_LEVEL_EDGE),
                );
                ui.label("Height:");
                ui.add(
                    egui::DragValue::new(&mut editor_state.new_level_height)
                        .range(1..=MAX_LEVEL_EDGE),
                );
            });
            if session.has_uncommitted_changes() || session.router.can_undo() {
                ui.label("Unsaved edits and history will be discarded.");
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Create").clicked() {
                    let name = match editor_state.new_level_name.trim() {
                        "" => "Untitled".to_string(),
                        name => name.to_string(),
                    };
                    let size = GridSize::new(
                        editor_state.new_level_width.clamp(1, MAX_LEVEL_EDGE),
                        editor_state.new_level_height.clamp(1, MAX_LEVEL_EDGE),
                    );
                    session.new_level(name.clone(), size);
                    editor_state.focus_level(size);
                    editor_state.status = Some(format!("Created level '{}'", name));
                    editor_state.show_new_level_dialog = false;
                }
                if ui.button("Cancel").clicked() {
                    editor_state.show_new_level_dialog = false;
                }
            });
        });

    if !open {
        editor_state.show_new_level_dialog = false;
    }
}

/// Text path prompt used for both Open and Save As
fn render_path_dialog(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    session: &mut EditorSession,
    preferences: &mut EditorPreferences,
) {
    if !editor_state.show_path_dialog {
        return;
    }

    let (title, confirm) = match editor_state.path_dialog_mode {
        PathDialogMode::Open => ("Open Level", "Open"),
        PathDialogMode::SaveAs => ("Save Level As", "Save"),
    };

    let mut open = true;
    let mut confirmed = false;
    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Path:");
                let response = ui.text_edit_singleline(&mut editor_state.path_input);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button(confirm).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    editor_state.show_path_dialog = false;
                }
            });
        });

    if !open {
        editor_state.show_path_dialog = false;
    }
    if !confirmed {
        return;
    }

    let input = editor_state.path_input.trim();
    if input.is_empty() {
        editor_state.error_message = Some("Enter a file path".to_string());
        return;
    }
    let path = PathBuf::from(input);

    let result = match editor_state.path_dialog_mode {
        PathDialogMode::Open => session.open(&path).map(|_| {
            editor_state.focus_level(session.size());
            format!("Opened {}", path.display())
        }),
        PathDialogMode::SaveAs => session
            .save(&path)
            .map(|_| format!("Saved {}", path.display())),
    };

    match result {
        Ok(status) => {
            editor_state.status = Some(status);
            editor_state.show_path_dialog = false;
            remember_path(preferences, Some(path));
        }
        Err(e) => {
            error!("Level file operation failed: {}", e);
            editor_state.error_message = Some(format!("{}: {}", title, e));
        }
    }
}

fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(error_msg) = editor_state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}
