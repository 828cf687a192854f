//! Camera rig invariants в полном headless кадре
//!
//! Seeded random input (ChaCha8) через настоящую input подписку.
//! Проверяем каждый кадр:
//! - планарная дистанция до selection <= max_distance
//! - высота над землёй <= max_height
//! - control_height в [min_height, max_height]
//! И отдельно: без земли под камерой floor clamp пропускается.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tacticam_simulation::math::planar_distance;
use tacticam_simulation::surface::{probe_ground, TerrainPatch, SURFACE_MASK_GROUND_PROBE};
use tacticam_simulation::*;

fn create_camera_app(terrain: TerrainSurface, camera: Transform, selected: Vec3) -> (App, Entity) {
    let mut app = create_headless_app();
    app.add_plugins((TacticsPlugin::default(), TerrainSurfacePlugin))
        .insert_resource(terrain);

    let unit = app
        .world_mut()
        .spawn((NavigationAgent::default(), Transform::from_translation(selected)))
        .id();
    install_roster(app.world_mut(), vec![unit]).expect("roster is not empty");

    let rig = app.world_mut().spawn((CameraRig::default(), camera)).id();
    (app, rig)
}

fn rig_state(app: &App, rig: Entity) -> (Vec3, CameraRig) {
    let world = app.world();
    let position = world.get::<Transform>(rig).expect("rig").translation;
    let state = *world.get::<CameraRig>(rig).expect("rig");
    (position, state)
}

#[test]
fn test_random_input_keeps_camera_in_bounds() {
    let terrain = TerrainSurface::flat(0.0)
        .with_patch(TerrainPatch::new(Vec2::new(15.0, -10.0), Vec2::new(45.0, 30.0), 8.0))
        .with_patch(TerrainPatch::new(Vec2::new(-60.0, -60.0), Vec2::new(-30.0, -20.0), 15.0));
    let selected = Vec3::new(2.0, 0.0, -1.0);
    let camera = Transform::from_xyz(0.0, 20.0, 20.0).looking_at(selected, Vec3::Y);
    let (mut app, rig) = create_camera_app(terrain.clone(), camera, selected);
    let config = app.world().resource::<CameraRigConfig>().clone();

    let keyboard = app
        .world()
        .resource::<InputAggregator>()
        .subscribe(ControlScheme::KeyboardMouse);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for frame in 0..2000 {
        if frame % 15 == 0 {
            let move_vector = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
            keyboard.dispatch(InputAction::Move, ActionPhase::Performed, ActionValue::Axis2(move_vector));

            let zoom = if rng.gen_bool(0.3) { rng.gen_range(-1.0..=1.0) } else { 0.0 };
            keyboard.dispatch(InputAction::Zoom, ActionPhase::Performed, ActionValue::Axis1(zoom));

            let held = rng.gen_bool(0.25);
            let phase = if held { ActionPhase::Performed } else { ActionPhase::Canceled };
            keyboard.dispatch(InputAction::SpeedModifier, phase, ActionValue::Button(held));
        }

        app.update();

        let (position, state) = rig_state(&app, rig);
        assert!(
            planar_distance(position, selected) <= config.max_distance + 1e-3,
            "frame {frame}: camera {position} too far"
        );
        assert!(
            state.control_height >= config.min_height && state.control_height <= config.max_height,
            "frame {frame}: control_height {}",
            state.control_height
        );
        if let Some(ground) = probe_ground(&terrain, position, config.probe_depth, SURFACE_MASK_GROUND_PROBE) {
            assert!(
                position.y - ground.y <= config.max_height + 1e-3,
                "frame {frame}: camera {position} above ceiling"
            );
        }
    }

    // Отпустили input — камера оседает в height band
    keyboard.dispatch(InputAction::Move, ActionPhase::Canceled, ActionValue::Axis2(Vec2::ZERO));
    keyboard.dispatch(InputAction::Zoom, ActionPhase::Canceled, ActionValue::Axis1(0.0));
    for _ in 0..120 {
        app.update();
    }

    let (position, _) = rig_state(&app, rig);
    let ground = probe_ground(&terrain, position, config.probe_depth, SURFACE_MASK_GROUND_PROBE)
        .expect("flat terrain everywhere");
    let height = position.y - ground.y;
    assert!(
        height >= config.min_height - 0.05 && height <= config.max_height + 1e-3,
        "settled height {height}"
    );
}

#[test]
fn test_no_ground_skips_floor_clamp() {
    // Нет земли вообще: probe всегда None
    let camera = Transform::from_xyz(0.0, 3.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y);
    let (mut app, rig) = create_camera_app(TerrainSurface::default(), camera, Vec3::ZERO);

    for _ in 0..60 {
        app.update();
    }

    let (position, state) = rig_state(&app, rig);
    // Floor (min_height = 10) не применялся, позиция не тронута
    assert_eq!(position, Vec3::new(0.0, 3.0, 10.0));
    assert_eq!(state.velocity, Vec3::ZERO);
    assert!(app.world().get::<GroundSample>(rig).expect("required").point.is_none());
}

#[test]
fn test_floor_lifts_camera_over_raised_ground() {
    // Камера у самой земли — поднимается до min_height за settle time
    let camera = Transform::from_xyz(0.0, 4.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y);
    let (mut app, rig) = create_camera_app(TerrainSurface::flat(1.0), camera, Vec3::ZERO);
    let config = app.world().resource::<CameraRigConfig>().clone();

    let mut previous = 4.0;
    for _ in 0..120 {
        app.update();
        let (position, _) = rig_state(&app, rig);
        assert!(position.y >= previous - 1e-5, "подъём без провалов");
        assert!(position.y <= 1.0 + config.min_height + 1e-4, "без overshoot");
        previous = position.y;
    }

    assert!((previous - (1.0 + config.min_height)).abs() < 0.05, "settled at {previous}");
}
