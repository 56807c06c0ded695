//! Viewport input - pan/zoom and pointer events for the active tool
//!
//! Turns Bevy mouse and keyboard state into `PointerEvent`s in cell
//! coordinates and feeds them to the session's tool router.

use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use rts_map_core::{
    ButtonPhase, Modifiers, PointerButton, PointerEvent, TileCoord, ToolSignal,
};

use crate::project::EditorSession;
use crate::EditorState;

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 4.0;

/// Plugin for editor tools and viewport input
pub struct EditorToolsPlugin;

impl Plugin for EditorToolsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportInputState>()
            .add_systems(Update, (handle_viewport_input, handle_scroll_input));
    }
}

/// State for viewport input handling
#[derive(Resource, Default)]
pub struct ViewportInputState {
    /// Cell under the cursor, if the cursor is over the viewport
    pub hovered_tile: Option<TileCoord>,
    /// Whether we're currently panning
    pub is_panning: bool,
    /// Last cursor position for panning
    pub pan_start_pos: Option<Vec2>,
    /// Left drag began with Alt held and pans instead of reaching the tool
    pub alt_drag: bool,
    /// Left drag is being forwarded to the active tool
    pub tool_drag: bool,
}

/// Cell containing a world position. Cell (0, 0) spans `[0, tile_size)` on both axes.
pub fn world_to_tile(world: Vec2, tile_size: f32) -> TileCoord {
    TileCoord::new(
        (world.x / tile_size).floor() as i32,
        (world.y / tile_size).floor() as i32,
    )
}

/// World-space center of a cell
pub fn tile_center(coord: TileCoord, tile_size: f32) -> Vec2 {
    Vec2::new(
        (coord.x as f32 + 0.5) * tile_size,
        (coord.y as f32 + 0.5) * tile_size,
    )
}

pub fn current_modifiers(keyboard: &ButtonInput<KeyCode>) -> Modifiers {
    Modifiers {
        ctrl: keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
        shift: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        alt: keyboard.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]),
    }
}

fn handle_viewport_input(
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut session: ResMut<EditorSession>,
    mut input_state: ResMut<ViewportInputState>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let Some(window) = windows.iter().next() else {
        return;
    };
    let Some((camera, camera_transform)) = camera_q.iter().next() else {
        return;
    };

    let modifiers = current_modifiers(&keyboard);
    let mut events = Vec::new();

    let cursor_position = window.cursor_position();
    let world_pos = cursor_position
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok());

    // Finish a drag released outside the window at the last known cell
    let Some(world_pos) = world_pos else {
        if input_state.tool_drag && !mouse_buttons.pressed(MouseButton::Left) {
            if let Some(tile) = input_state.hovered_tile {
                events.push(PointerEvent::left(ButtonPhase::Up, tile).with_modifiers(modifiers));
            }
            input_state.tool_drag = false;
        }
        input_state.is_panning = false;
        if input_state.hovered_tile.take().is_some() {
            session.on_hover(None);
        }
        if !events.is_empty() {
            dispatch(&mut session, &mut editor_state, &events);
        }
        return;
    };
    let Some(cursor_position) = cursor_position else {
        return;
    };

    let tile = world_to_tile(world_pos, editor_state.tile_size);

    // Block fresh input over egui panels, but let drags already in progress finish
    let egui_blocking = ctx.is_using_pointer() || ctx.is_pointer_over_area();
    let dragging = input_state.tool_drag || input_state.is_panning;
    if egui_blocking && !dragging {
        if input_state.hovered_tile.take().is_some() {
            session.on_hover(None);
        }
        return;
    }

    // Panning: middle mouse, or a left drag that began with Alt held
    if mouse_buttons.just_pressed(MouseButton::Left) && modifiers.alt {
        input_state.alt_drag = true;
    }
    if !mouse_buttons.pressed(MouseButton::Left) {
        input_state.alt_drag = false;
    }
    if mouse_buttons.pressed(MouseButton::Middle) || input_state.alt_drag {
        if !input_state.is_panning {
            input_state.is_panning = true;
            input_state.pan_start_pos = Some(cursor_position);
        } else if let Some(start_pos) = input_state.pan_start_pos {
            let delta = cursor_position - start_pos;
            editor_state.camera_offset.x -= delta.x / editor_state.zoom;
            editor_state.camera_offset.y += delta.y / editor_state.zoom;
            input_state.pan_start_pos = Some(cursor_position);
        }
    } else {
        input_state.is_panning = false;
        input_state.pan_start_pos = None;
    }

    let moved = input_state.hovered_tile != Some(tile);
    if moved {
        input_state.hovered_tile = Some(tile);
        session.on_hover(Some(tile));
    }

    if !input_state.alt_drag {
        if mouse_buttons.just_pressed(MouseButton::Left) {
            input_state.tool_drag = true;
            events.push(PointerEvent::left(ButtonPhase::Down, tile));
        } else if input_state.tool_drag && mouse_buttons.just_released(MouseButton::Left) {
            input_state.tool_drag = false;
            events.push(PointerEvent::left(ButtonPhase::Up, tile));
        } else if input_state.tool_drag && moved {
            events.push(PointerEvent::left(ButtonPhase::Held, tile));
        }
    }

    if mouse_buttons.just_pressed(MouseButton::Right) && !egui_blocking {
        events.push(PointerEvent::right(ButtonPhase::Down, tile));
    }

    if !events.is_empty() {
        let events: Vec<_> = events
            .into_iter()
            .map(|event| event.with_modifiers(modifiers))
            .collect();
        dispatch(&mut session, &mut editor_state, &events);
    }
}

fn dispatch(session: &mut EditorSession, editor_state: &mut EditorState, events: &[PointerEvent]) {
    for event in events {
        if let Err(e) = session.on_pointer(event) {
            error!("Tool input failed: {}", e);
            editor_state.error_message = Some(format!("Edit failed: {}", e));
            if event.button == PointerButton::Left {
                session.router.cancel_stroke();
            }
        }
    }
}

/// System to handle scroll input: Ctrl+scroll resizes the brush, plain scroll zooms
fn handle_scroll_input(
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut session: ResMut<EditorSession>,
    scroll: Res<AccumulatedMouseScroll>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / 16.0,
    };
    if lines == 0.0 || ctx.is_using_pointer() || ctx.is_pointer_over_area() {
        return;
    }

    if current_modifiers(&keyboard).ctrl {
        session.custom_signal(lines.signum() as i32, ToolSignal::BrushSize);
    } else {
        editor_state.zoom = (editor_state.zoom * (1.0 + lines * 0.1)).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_tile_floors() {
        assert_eq!(world_to_tile(Vec2::new(0.0, 0.0), 24.0), TileCoord::new(0, 0));
        assert_eq!(world_to_tile(Vec2::new(23.9, 47.9), 24.0), TileCoord::new(0, 1));
        assert_eq!(world_to_tile(Vec2::new(48.0, 24.0), 24.0), TileCoord::new(2, 1));
        // Left of / below the map stays negative instead of snapping to 0
        assert_eq!(world_to_tile(Vec2::new(-0.5, -30.0), 24.0), TileCoord::new(-1, -2));
    }

    #[test]
    fn test_tile_center_round_trips() {
        for coord in [TileCoord::new(0, 0), TileCoord::new(7, 3), TileCoord::new(-2, 5)] {
            assert_eq!(world_to_tile(tile_center(coord, 32.0), 32.0), coord);
        }
    }

    #[test]
    fn test_modifiers_from_keyboard() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::ControlRight);
        keyboard.press(KeyCode::AltLeft);
        let modifiers = current_modifiers(&keyboard);
        assert!(modifiers.ctrl);
        assert!(!modifiers.shift);
        assert!(modifiers.alt);
    }
}
