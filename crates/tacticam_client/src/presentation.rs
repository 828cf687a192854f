use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tacticam_simulation::input::ControlSchemeChanged;
use tacticam_simulation::{CameraLens, ControlScheme, SelectionMarker, TacticsSet, VirtualPointer};

use crate::scene::MarkerMaterial;

/// Размер virtual pointer на экране (logical pixels)
const POINTER_SIZE: f32 = 16.0;

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_virtual_pointer)
            .add_systems(Update, sync_lens_fov.before(TacticsSet::CameraMotion))
            .add_systems(
                Update,
                (update_marker_decal, update_virtual_pointer, toggle_system_cursor).after(TacticsSet::Marker),
            );
    }
}

/// UI node virtual pointer'а (gamepad режим)
#[derive(Component)]
pub struct VirtualPointerCursor;

fn spawn_virtual_pointer(mut commands: Commands) {
    commands.spawn((
        VirtualPointerCursor,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(POINTER_SIZE),
            height: Val::Px(POINTER_SIZE),
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.9)),
        BorderRadius::MAX,
        Visibility::Hidden,
    ));
}

/// FOV реальной камеры → lens (viewport синхронизирует ядро)
fn sync_lens_fov(mut lenses: Query<(&Projection, &mut CameraLens), Changed<Projection>>) {
    for (projection, mut lens) in lenses.iter_mut() {
        if let Projection::Perspective(perspective) = projection {
            lens.fov_y = perspective.fov;
        }
    }
}

/// Opacity маркера → alpha материала decal'а
fn update_marker_decal(
    mut markers: Query<(&SelectionMarker, &MarkerMaterial, &mut Visibility), Changed<SelectionMarker>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (marker, material, mut visibility) in markers.iter_mut() {
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = material.base_color.with_alpha(marker.opacity);
        }
        *visibility = if marker.opacity > 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

fn update_virtual_pointer(
    pointer: Res<VirtualPointer>,
    mut cursors: Query<(&mut Node, &mut Visibility), With<VirtualPointerCursor>>,
) {
    if !pointer.is_changed() {
        return;
    }

    for (mut node, mut visibility) in cursors.iter_mut() {
        node.left = Val::Px(pointer.position.x - POINTER_SIZE * 0.5);
        node.top = Val::Px(pointer.position.y - POINTER_SIZE * 0.5);
        *visibility = if pointer.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Системный курсор виден только в keyboard/mouse схеме
fn toggle_system_cursor(
    mut changes: EventReader<ControlSchemeChanged>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    if let Ok(mut window) = windows.single_mut() {
        window.cursor_options.visible = change.scheme == ControlScheme::KeyboardMouse;
    }
}
