//! Camera domain — free-roaming tactical camera rig
//!
//! Rig двигает ТОЛЬКО translation камеры:
//! - планарное движение + zoom от InputCommand
//! - clamp дистанции/высоты относительно selection
//! - критически демпфированный подъём над землёй
//!
//! Orientation задаётся извне (scene setup) и не меняется.

pub mod components;
pub mod rig;
pub mod systems;

#[cfg(test)]
mod rig_tests;

pub use components::*;
pub use rig::{apply_planar_move, apply_zoom, clamp_planar_distance};
pub use systems::*;

use bevy::prelude::*;

use crate::input::apply_screen_resize;
use crate::TacticsSet;

/// Camera rig plugin
pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraRig>()
            .add_systems(Update, sync_lens_viewport.after(apply_screen_resize).in_set(TacticsSet::Input))
            .add_systems(
                Update,
                (camera_motion_system, emit_pick_requests)
                    .chain()
                    .in_set(TacticsSet::CameraMotion),
            )
            .add_systems(Update, camera_height_system.in_set(TacticsSet::CameraHeight));
    }
}
