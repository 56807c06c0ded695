//! Settings panel for the active tool

use bevy::prelude::*;
use bevy_egui::egui;
use rts_map_core::{TileGrid, TileType, ToolKind, MAX_PLAYERS, VARIATION_RANGE};

use super::UiState;
use crate::preferences::{EditorPreferences, MAX_BRUSH_SIZE};
use crate::project::EditorSession;
use crate::EditorState;

/// Render the tool settings panel
pub fn render_tool_panel(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    editor_state: &mut EditorState,
    session: &mut EditorSession,
    preferences: &mut EditorPreferences,
) {
    let before = preferences.clone();

    egui::SidePanel::left("tool_panel")
        .default_width(ui_state.tool_panel_width)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading(session.router.active().label());
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match session.router.active() {
                ToolKind::Selection => render_selection_panel(ui, session),
                ToolKind::Paint => render_paint_panel(ui, session),
                ToolKind::ObjectPlacement => {
                    ui.label("Objects are not editable yet.");
                }
                ToolKind::StartingLocation => render_starting_location_panel(ui, session),
            });

            ui.separator();
            ui.label(format!(
                "History: {} / {}",
                session.router.undo_len(),
                session.router.history_capacity()
            ));
        });

    preferences.capture_from_router(&session.router);
    preferences.show_grid = editor_state.show_grid;
    if *preferences != before {
        if let Err(e) = preferences.save() {
            warn!("Failed to save preferences: {}", e);
        }
    }
}

fn render_selection_panel(ui: &mut egui::Ui, session: &EditorSession) {
    let Some(cell) = session.router.selection().selected() else {
        ui.label("Click a cell to inspect it.");
        return;
    };

    ui.label(format!("Cell ({}, {})", cell.x, cell.y));
    match session.level.get_tile(cell) {
        Ok(tile) => {
            ui.label(format!("Type: {}", tile.tile_type.name()));
            ui.label(format!("Variation: {}", tile.variation));
            if session.level.is_modified(cell) {
                ui.label("Modified since last commit");
            }
        }
        Err(e) => {
            ui.label(format!("{}", e));
        }
    }
}

fn render_paint_panel(ui: &mut egui::Ui, session: &mut EditorSession) {
    let stroking = session.router.is_stroking();
    let paint = session.router.paint_mut();

    ui.label("Tile:");
    egui::ComboBox::from_id_salt("paint_tile_type")
        .selected_text(paint.settings.tile_type.name())
        .show_ui(ui, |ui| {
            for tile_type in TileType::ALL {
                ui.selectable_value(&mut paint.settings.tile_type, tile_type, tile_type.name());
            }
        });

    ui.add_space(4.0);
    let mut brush_size = paint.brush().size();
    ui.horizontal(|ui| {
        ui.label("Brush:");
        if ui
            .add_enabled(
                !stroking,
                egui::DragValue::new(&mut brush_size).range(1..=MAX_BRUSH_SIZE),
            )
            .changed()
        {
            paint.update_brush_size(brush_size);
        }
    });

    ui.checkbox(&mut paint.settings.randomize_variation, "Random variation");
    if !paint.settings.randomize_variation {
        let mut variation = paint.settings.variation;
        ui.horizontal(|ui| {
            ui.label("Variation:");
            if ui
                .add(egui::DragValue::new(&mut variation).range(0..=VARIATION_RANGE - 1))
                .changed()
            {
                paint.settings.set_variation(variation);
            }
        });
    }

    ui.separator();
    ui.checkbox(&mut paint.settings.show_paint_reach, "Show paint reach");
    ui.checkbox(&mut paint.settings.show_stroke_bounds, "Show stroke bounds");

    if stroking {
        let tracker = paint.tracker();
        let bounds = tracker.bounds();
        ui.label(format!(
            "Stroke: {} cells in {}x{}",
            tracker.dirty_count(),
            bounds.width(),
            bounds.height()
        ));
    }
}

fn render_starting_location_panel(ui: &mut egui::Ui, session: &mut EditorSession) {
    let info = session.level.info_mut();
    ui.checkbox(&mut info.custom_game, "Custom game");
    if !info.custom_game {
        ui.label("Starting locations only apply to custom games.");
    } else {
        ui.label(format!(
            "{} / {} players",
            info.starting_locations.len(),
            MAX_PLAYERS
        ));
        ui.label("Ctrl+Click to add, drag to move, right click to remove.");

        let mut remove = None;
        for (i, location) in info.starting_locations.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(format!("P{}: ({}, {})", i + 1, location.x, location.y));
                if ui.small_button("x").clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            info.starting_locations.remove(i);
        }
    }

    ui.separator();
    ui.checkbox(
        &mut session.router.starting_location_mut().render_locations,
        "Show with other tools",
    );
}
