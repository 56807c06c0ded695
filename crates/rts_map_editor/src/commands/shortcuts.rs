//! Keyboard shortcut handling

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use rts_map_core::{ToolKind, ToolSignal};

use crate::project::EditorSession;
use crate::ui::PendingAction;
use crate::EditorState;

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    mut contexts: EguiContexts,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editor_state: ResMut<EditorState>,
    mut session: ResMut<EditorSession>,
) {
    // Leave keys to egui while a text field has focus
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if ctrl {
        // Ctrl+Z - Undo
        if keyboard.just_pressed(KeyCode::KeyZ) && !shift {
            editor_state.pending_action = Some(PendingAction::Undo);
        }
        // Ctrl+Shift+Z or Ctrl+Y - Redo
        if (keyboard.just_pressed(KeyCode::KeyZ) && shift) || keyboard.just_pressed(KeyCode::KeyY) {
            editor_state.pending_action = Some(PendingAction::Redo);
        }
        // Ctrl+S - Save
        if keyboard.just_pressed(KeyCode::KeyS) {
            editor_state.pending_action = Some(PendingAction::Save);
        }
        // Ctrl+O - Open
        if keyboard.just_pressed(KeyCode::KeyO) {
            editor_state.pending_action = Some(PendingAction::Open);
        }
        // Ctrl+N - New
        if keyboard.just_pressed(KeyCode::KeyN) {
            editor_state.pending_action = Some(PendingAction::New);
        }
        return;
    }

    // Escape key - drop an open stroke, otherwise fall back to the selection tool
    if keyboard.just_pressed(KeyCode::Escape) {
        if !session.router.cancel_stroke() {
            session.switch_tool(ToolKind::Selection);
        }
    }

    let tool_keys = [
        (KeyCode::Digit1, ToolKind::Paint),
        (KeyCode::Digit2, ToolKind::ObjectPlacement),
        (KeyCode::Digit3, ToolKind::StartingLocation),
    ];
    for (key, tool) in tool_keys {
        if keyboard.just_pressed(key) {
            session.switch_tool(tool);
        }
    }

    // Numpad +/- nudge the brush
    if keyboard.just_pressed(KeyCode::NumpadAdd) {
        session.custom_signal(1, ToolSignal::BrushSize);
    }
    if keyboard.just_pressed(KeyCode::NumpadSubtract) {
        session.custom_signal(-1, ToolSignal::BrushSize);
    }
}
