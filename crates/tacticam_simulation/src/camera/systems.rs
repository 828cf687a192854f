//! Camera rig ECS systems

use bevy::prelude::*;

use super::components::{CameraLens, CameraRig};
use crate::config::{CameraRigConfig, PickConfig};
use crate::input::{InputCommand, ScreenSize};
use crate::logger;
use crate::selection::{Selection, SelectionError};
use crate::surface::{GroundSample, PickRequest, PickResolved};

/// Позиция выбранной entity. Отсутствие — ошибка конфигурации (fail loudly).
fn selected_position(
    selection: &Selection,
    targets: &Query<&Transform, Without<CameraRig>>,
) -> Result<Vec3, SelectionError> {
    let entity = selection.entity();
    targets
        .get(entity)
        .map(|transform| transform.translation)
        .map_err(|_| SelectionError::MissingEntity(entity))
}

/// Система: шаги 1-3 (planar move, zoom, distance clamp)
///
/// # Schedule
/// - Update, TacticsSet::CameraMotion
pub fn camera_motion_system(
    command: Res<InputCommand>,
    config: Res<CameraRigConfig>,
    selection: Res<Selection>,
    time: Res<Time>,
    targets: Query<&Transform, Without<CameraRig>>,
    mut rigs: Query<(&CameraRig, &mut Transform, &GroundSample)>,
) -> Result {
    let selected = selected_position(&selection, &targets)?;
    let dt = time.delta_secs();

    for (rig, mut transform, sample) in rigs.iter_mut() {
        rig.update_motion(&mut transform, &command, selected, sample.point, &config, dt);
    }

    Ok(())
}

/// Система: select edge → PickRequest (луч через pointer)
///
/// # Schedule
/// - Update, TacticsSet::CameraMotion (после camera_motion_system)
pub fn emit_pick_requests(
    command: Res<InputCommand>,
    pick: Res<PickConfig>,
    rigs: Query<(&Transform, &CameraLens), With<CameraRig>>,
    mut requests: EventWriter<PickRequest>,
    mut resolved: EventWriter<PickResolved>,
) {
    if !command.select {
        return;
    }

    let Ok((transform, lens)) = rigs.single() else {
        logger::log_warning("Select ignored: expected exactly one camera rig");
        return;
    };

    match lens.screen_ray(transform, command.pointer) {
        Some(ray) => {
            requests.write(PickRequest {
                ray,
                max_distance: pick.max_click_distance,
                layers: pick.layers,
            });
        }
        None => {
            // Вырожденный viewport — считаем что ничего не попали
            resolved.write(PickResolved { point: None });
        }
    }
}

/// Система: шаги 4-5 (ground floor smoothing, height ceiling)
///
/// # Schedule
/// - Update, TacticsSet::CameraHeight
pub fn camera_height_system(
    config: Res<CameraRigConfig>,
    selection: Res<Selection>,
    time: Res<Time>,
    targets: Query<&Transform, Without<CameraRig>>,
    mut rigs: Query<(&mut CameraRig, &mut Transform, &GroundSample)>,
) -> Result {
    let selected = selected_position(&selection, &targets)?;
    let dt = time.delta_secs();

    for (mut rig, mut transform, sample) in rigs.iter_mut() {
        rig.update_height(&mut transform, sample.point, selected, &config, dt);
    }

    Ok(())
}

/// Система: lens viewport следует за ScreenSize
///
/// # Schedule
/// - Update, TacticsSet::Input
pub fn sync_lens_viewport(screen: Res<ScreenSize>, mut lenses: Query<&mut CameraLens>) {
    if !screen.is_changed() {
        return;
    }
    for mut lens in lenses.iter_mut() {
        lens.viewport = screen.0;
    }
}
