//! Map rendering for the editor viewport
//!
//! One colored sprite per cell shows the working map; tool overlays and the
//! grid are drawn with gizmos every frame.

use bevy::prelude::*;
use rts_map_core::{GridSize, OverlayKind, OverlayPainter, TileCoord, TileData, TileType};

use crate::project::EditorSession;
use crate::tools::tile_center;
use crate::EditorState;

/// Plugin for map rendering
pub struct MapRenderPlugin;

impl Plugin for MapRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderState>()
            .init_resource::<MarkerLabels>()
            .add_systems(Update, sync_level_rendering)
            .add_systems(Update, draw_grid)
            .add_systems(Update, (draw_tool_overlays, sync_marker_labels).chain())
            .add_systems(Update, update_camera_from_editor_state);
    }
}

/// Marker component for map cell sprites
#[derive(Component)]
pub struct MapCell;

/// Marker component for starting location labels
#[derive(Component)]
pub struct MarkerLabel;

/// Tracks what the cell sprites currently show
#[derive(Resource, Default)]
pub struct RenderState {
    /// Cell sprites in row-major order
    pub cells: Vec<Entity>,
    pub rendered_size: Option<GridSize>,
    pub rendered_tile_size: f32,
    /// (session generation, level revision) last drawn
    pub rendered_revision: Option<(u64, u64)>,
}

/// Marker labels collected from tool overlays this frame
#[derive(Resource, Default)]
pub struct MarkerLabels {
    pub pending: Vec<(TileCoord, String)>,
    rendered: Vec<(TileCoord, String)>,
    entities: Vec<Entity>,
}

/// Base color of each terrain kind
pub fn tile_base_color(tile_type: TileType) -> Color {
    match tile_type {
        TileType::Ground1 => Color::srgb(0.45, 0.62, 0.28),
        TileType::Ground2 => Color::srgb(0.52, 0.66, 0.32),
        TileType::Mud1 => Color::srgb(0.47, 0.36, 0.22),
        TileType::Mud2 => Color::srgb(0.40, 0.30, 0.18),
        TileType::WallBroken => Color::srgb(0.55, 0.52, 0.48),
        TileType::RockBroken => Color::srgb(0.46, 0.42, 0.38),
        TileType::TreesFelled => Color::srgb(0.38, 0.48, 0.22),
        TileType::Water => Color::srgb(0.16, 0.36, 0.66),
        TileType::Rock => Color::srgb(0.33, 0.31, 0.30),
        TileType::WallHu => Color::srgb(0.72, 0.70, 0.62),
        TileType::WallHuDamaged => Color::srgb(0.64, 0.60, 0.52),
        TileType::WallOc => Color::srgb(0.50, 0.24, 0.18),
        TileType::WallOcDamaged => Color::srgb(0.42, 0.22, 0.17),
        TileType::Trees => Color::srgb(0.10, 0.35, 0.12),
    }
}

/// Cell color with a slight brightness shift per variation
pub fn tile_color(tile: TileData) -> Color {
    let shade = 0.9 + tile.variation as f32 / 500.0;
    let base = tile_base_color(tile.tile_type).to_srgba();
    Color::srgb(
        (base.red * shade).min(1.0),
        (base.green * shade).min(1.0),
        (base.blue * shade).min(1.0),
    )
}

pub fn overlay_color(kind: OverlayKind) -> Color {
    match kind {
        OverlayKind::Hover => Color::srgba(1.0, 1.0, 1.0, 0.9),
        OverlayKind::StrokeCell => Color::srgba(1.0, 0.85, 0.2, 0.8),
        OverlayKind::PaintReach => Color::srgba(0.2, 0.8, 1.0, 0.6),
        OverlayKind::StrokeBounds => Color::srgba(1.0, 0.3, 0.3, 0.9),
        OverlayKind::Selection => Color::srgba(0.3, 0.6, 1.0, 0.9),
        OverlayKind::StartingLocation => Color::srgba(1.0, 0.2, 0.8, 1.0),
        OverlayKind::DragTarget => Color::srgba(0.2, 1.0, 0.2, 0.9),
    }
}

/// World-space center and size of the cell range `[min, max)`
pub fn cell_rect(min: TileCoord, max: TileCoord, tile_size: f32) -> (Vec2, Vec2) {
    let lo = Vec2::new(min.x as f32, min.y as f32) * tile_size;
    let hi = Vec2::new(max.x as f32, max.y as f32) * tile_size;
    ((lo + hi) / 2.0, hi - lo)
}

/// Draws tool overlays as gizmos and collects marker labels for text rendering
pub struct GizmoOverlayPainter<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    tile_size: f32,
    pub labels: Vec<(TileCoord, String)>,
}

impl<'a, 'w, 's> GizmoOverlayPainter<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, tile_size: f32) -> Self {
        Self {
            gizmos,
            tile_size,
            labels: Vec::new(),
        }
    }
}

impl OverlayPainter for GizmoOverlayPainter<'_, '_, '_> {
    fn outline_rect(&mut self, min: TileCoord, max: TileCoord, kind: OverlayKind) {
        let (center, size) = cell_rect(min, max, self.tile_size);
        self.gizmos
            .rect_2d(Isometry2d::from_translation(center), size, overlay_color(kind));
    }

    fn fill_cell(&mut self, cell: TileCoord, kind: OverlayKind) {
        let center = tile_center(cell, self.tile_size);
        let color = overlay_color(kind);
        // Gizmos have no fill; an inset square plus a diagonal reads as a filled cell
        let inset = self.tile_size * 0.7;
        self.gizmos
            .rect_2d(Isometry2d::from_translation(center), Vec2::splat(inset), color);
        let half = Vec2::splat(inset / 2.0);
        self.gizmos.line_2d(center - half, center + half, color);
    }

    fn marker(&mut self, cell: TileCoord, label: &str, kind: OverlayKind) {
        let center = tile_center(cell, self.tile_size);
        self.gizmos.circle_2d(
            Isometry2d::from_translation(center),
            self.tile_size * 0.45,
            overlay_color(kind),
        );
        self.labels.push((cell, label.to_string()));
    }
}

/// System to keep cell sprites in step with the working map
fn sync_level_rendering(
    mut commands: Commands,
    mut render_state: ResMut<RenderState>,
    editor_state: Res<EditorState>,
    session: Res<EditorSession>,
    mut sprites: Query<&mut Sprite, With<MapCell>>,
) {
    let map = session.level.working_map();
    let size = session.size();
    let tile_size = editor_state.tile_size;
    let revision = (session.generation(), session.level.revision());

    let needs_respawn = render_state.rendered_size != Some(size)
        || render_state.rendered_tile_size != tile_size;

    if needs_respawn {
        for entity in render_state.cells.drain(..) {
            let _ = commands.get_entity(entity).map(|mut e| e.despawn());
        }
        for (coord, tile) in map.iter() {
            let center = tile_center(coord, tile_size);
            let entity = commands
                .spawn((
                    Sprite::from_color(tile_color(tile), Vec2::splat(tile_size)),
                    Transform::from_xyz(center.x, center.y, 0.0),
                    MapCell,
                ))
                .id();
            render_state.cells.push(entity);
        }
        render_state.rendered_size = Some(size);
        render_state.rendered_tile_size = tile_size;
        render_state.rendered_revision = Some(revision);
        return;
    }

    if render_state.rendered_revision == Some(revision) {
        return;
    }

    for ((_, tile), entity) in map.iter().zip(render_state.cells.iter()) {
        if let Ok(mut sprite) = sprites.get_mut(*entity) {
            sprite.color = tile_color(tile);
        }
    }
    render_state.rendered_revision = Some(revision);
}

fn draw_grid(mut gizmos: Gizmos, editor_state: Res<EditorState>, session: Res<EditorSession>) {
    if !editor_state.show_grid {
        return;
    }

    let size = session.size();
    let tile_size = editor_state.tile_size;
    let grid_color = Color::srgba(0.0, 0.0, 0.0, 0.25);
    let width = size.width as f32 * tile_size;
    let height = size.height as f32 * tile_size;

    for x in 0..=size.width {
        let world_x = x as f32 * tile_size;
        gizmos.line_2d(Vec2::new(world_x, 0.0), Vec2::new(world_x, height), grid_color);
    }
    for y in 0..=size.height {
        let world_y = y as f32 * tile_size;
        gizmos.line_2d(Vec2::new(0.0, world_y), Vec2::new(width, world_y), grid_color);
    }
}

fn draw_tool_overlays(
    mut gizmos: Gizmos,
    editor_state: Res<EditorState>,
    session: Res<EditorSession>,
    mut labels: ResMut<MarkerLabels>,
) {
    let mut painter = GizmoOverlayPainter::new(&mut gizmos, editor_state.tile_size);
    session.router.render(session.level.info(), &mut painter);
    if labels.pending != painter.labels {
        labels.pending = painter.labels;
    }
}

/// System to keep text labels on starting location markers
fn sync_marker_labels(
    mut commands: Commands,
    mut labels: ResMut<MarkerLabels>,
    editor_state: Res<EditorState>,
) {
    if !labels.is_changed() || labels.pending == labels.rendered {
        return;
    }

    let labels = &mut *labels;
    for entity in labels.entities.drain(..) {
        let _ = commands.get_entity(entity).map(|mut e| e.despawn());
    }
    for (cell, text) in &labels.pending {
        let center = tile_center(*cell, editor_state.tile_size);
        let entity = commands
            .spawn((
                Text2d::new(text.clone()),
                TextFont {
                    font_size: editor_state.tile_size * 0.5,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(center.x, center.y, 50.0),
                MarkerLabel,
            ))
            .id();
        labels.entities.push(entity);
    }
    labels.rendered = labels.pending.clone();
}

fn update_camera_from_editor_state(
    editor_state: Res<EditorState>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<Camera2d>>,
) {
    for (mut transform, mut projection) in camera_query.iter_mut() {
        transform.translation.x = editor_state.camera_offset.x;
        transform.translation.y = editor_state.camera_offset.y;

        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = 1.0 / editor_state.zoom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tile_type_has_a_distinct_color() {
        let colors: Vec<Srgba> = TileType::ALL
            .iter()
            .map(|t| tile_base_color(*t).to_srgba())
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_variation_shifts_brightness() {
        let dark = tile_color(TileData::new(TileType::Water, 0)).to_srgba();
        let light = tile_color(TileData::new(TileType::Water, 99)).to_srgba();
        assert!(light.blue > dark.blue);
    }

    #[test]
    fn test_cell_rect_covers_range() {
        let (center, size) = cell_rect(TileCoord::new(4, 4), TileCoord::new(7, 7), 10.0);
        assert_eq!(center, Vec2::new(55.0, 55.0));
        assert_eq!(size, Vec2::new(30.0, 30.0));
    }
}
