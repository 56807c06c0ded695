//! Toolbar UI for tool selection and history

use bevy_egui::egui;
use rts_map_core::ToolKind;

use super::{PendingAction, UiState};
use crate::project::EditorSession;
use crate::tools::{MAX_ZOOM, MIN_ZOOM};
use crate::EditorState;

/// Toolbar name and shortcut hint for each tool
fn tool_button(kind: ToolKind) -> (&'static str, &'static str) {
    match kind {
        ToolKind::Selection => ("Select", "Select (Esc)"),
        ToolKind::Paint => ("Paint", "Paint tiles (1)"),
        ToolKind::ObjectPlacement => ("Objects", "Place objects (2)"),
        ToolKind::StartingLocation => ("Start", "Starting locations (3)"),
    }
}

/// Render the toolbar
pub fn render_toolbar(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    editor_state: &mut EditorState,
    session: &mut EditorSession,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("New").on_hover_text("New level (Ctrl+N)").clicked() {
                editor_state.pending_action = Some(PendingAction::New);
            }
            if ui.button("Open").on_hover_text("Open level (Ctrl+O)").clicked() {
                editor_state.pending_action = Some(PendingAction::Open);
            }
            if ui.button("Save").on_hover_text("Save level (Ctrl+S)").clicked() {
                editor_state.pending_action = Some(PendingAction::Save);
            }
            if ui.button("Save As").clicked() {
                editor_state.pending_action = Some(PendingAction::SaveAs);
            }

            ui.separator();

            ui.label("Tools:");
            let active = session.router.active();
            for kind in ToolKind::ALL {
                let (name, hint) = tool_button(kind);
                if ui
                    .selectable_label(active == kind, name)
                    .on_hover_text(hint)
                    .clicked()
                {
                    session.switch_tool(kind);
                }
            }

            ui.separator();

            let undo_len = session.router.undo_len();
            let redo_len = session.router.redo_len();
            if ui
                .add_enabled(undo_len > 0, egui::Button::new(format!("Undo ({})", undo_len)))
                .on_hover_text("Undo (Ctrl+Z)")
                .clicked()
            {
                editor_state.pending_action = Some(PendingAction::Undo);
            }
            if ui
                .add_enabled(redo_len > 0, egui::Button::new(format!("Redo ({})", redo_len)))
                .on_hover_text("Redo (Ctrl+Y)")
                .clicked()
            {
                editor_state.pending_action = Some(PendingAction::Redo);
            }
            if ui
                .add_enabled(
                    session.has_uncommitted_changes(),
                    egui::Button::new("Commit"),
                )
                .on_hover_text("Copy edits into the level data")
                .clicked()
            {
                editor_state.pending_action = Some(PendingAction::Commit);
            }

            ui.separator();

            ui.checkbox(&mut editor_state.show_grid, "Grid");
            ui.checkbox(&mut ui_state.show_tool_panel, "Panel");

            ui.separator();

            ui.label(format!("Zoom: {:.0}%", editor_state.zoom * 100.0));
            if ui.small_button("-").clicked() {
                editor_state.zoom = (editor_state.zoom / 1.25).clamp(MIN_ZOOM, MAX_ZOOM);
            }
            if ui.small_button("+").clicked() {
                editor_state.zoom = (editor_state.zoom * 1.25).clamp(MIN_ZOOM, MAX_ZOOM);
            }
            if ui.small_button("Fit").clicked() {
                editor_state.zoom = 1.0;
                editor_state.focus_level(session.size());
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_a_distinct_button() {
        let names: Vec<&str> = ToolKind::ALL.iter().map(|k| tool_button(*k).0).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name));
        }
    }
}
