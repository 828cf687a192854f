use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use tacticam_simulation::{init_logger, set_log_level, LogLevel, RapierSurfacePlugin, StraightLinePathPlugin, TacticsPlugin};

mod devices;
mod presentation;
mod scene;

use devices::DeviceAdaptersPlugin;
use presentation::PresentationPlugin;

fn main() {
    init_logger();
    set_log_level(LogLevel::Info);

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "TACTICAM - Click to move".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics: коллайдеры для ground probe / world picker
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Core (headless ECS logic) + backends
        .add_plugins((TacticsPlugin::default(), RapierSurfacePlugin, StraightLinePathPlugin))
        // Keyboard/mouse + gamepad → InputAggregator
        .add_plugins(DeviceAdaptersPlugin)
        // Marker decal, virtual pointer UI
        .add_plugins(PresentationPlugin)
        // Setup scene
        .add_systems(Startup, (scene::setup_scene, scene::install_scene_roster).chain())
        .run();
}
