//! Tests for CameraRig update steps

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::super::components::CameraRig;
    use super::super::rig::{apply_planar_move, apply_zoom, clamp_planar_distance};
    use crate::config::CameraRigConfig;
    use crate::input::InputCommand;
    use crate::math::planar_distance;
    use crate::surface::{probe_ground, TerrainPatch, TerrainSurface, SURFACE_MASK_GROUND_PROBE};

    const DT: f32 = 1.0 / 60.0;

    /// Камера над (0, y, z), смотрит на начало координат под 45°
    fn tilted_camera(height: f32) -> Transform {
        Transform::from_xyz(0.0, height, height).looking_at(Vec3::ZERO, Vec3::Y)
    }

    fn moving(move_vector: Vec2) -> InputCommand {
        InputCommand {
            move_vector,
            ..default()
        }
    }

    #[test]
    fn test_planar_move_follows_ground_forward() {
        let config = CameraRigConfig::default();
        let camera = tilted_camera(20.0);

        let moved = apply_planar_move(camera.translation, camera.rotation, &moving(Vec2::Y), &config, 0.5);

        // 20 units/sec * 0.5 sec вдоль -Z, высота не меняется
        assert!((moved - Vec3::new(0.0, 20.0, 10.0)).length() < 1e-4, "got {moved}");
    }

    #[test]
    fn test_speed_modifier_multiplies_speed() {
        let config = CameraRigConfig::default();
        let camera = tilted_camera(20.0);
        let command = InputCommand {
            move_vector: Vec2::X,
            speed_modifier: true,
            ..default()
        };

        let moved = apply_planar_move(camera.translation, camera.rotation, &command, &config, 0.5);
        assert!((moved.x - 20.0).abs() < 1e-4);
        assert!((moved.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_top_down_camera_still_moves() {
        let config = CameraRigConfig::default();
        let rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);

        let moved = apply_planar_move(Vec3::new(0.0, 20.0, 0.0), rotation, &moving(Vec2::Y), &config, 1.0);
        assert!(moved.z < -19.0, "screen up должен двигать камеру, got {moved}");
    }

    #[test]
    fn test_zoom_stops_at_height_band() {
        let config = CameraRigConfig::default();
        let camera = tilted_camera(20.0);

        // Огромный шаг внутрь — останавливаемся ровно на min_height
        let zoomed_in = apply_zoom(camera.translation, camera.rotation, 1.0, 0.0, &config, 1.0);
        assert!((zoomed_in.y - config.min_height).abs() < 1e-3, "got {zoomed_in}");

        let zoomed_out = apply_zoom(camera.translation, camera.rotation, -1.0, 0.0, &config, 1.0);
        assert!((zoomed_out.y - config.max_height).abs() < 1e-3, "got {zoomed_out}");
    }

    #[test]
    fn test_zoom_outside_band_only_returns() {
        let config = CameraRigConfig::default();
        let camera = tilted_camera(40.0);

        let away = apply_zoom(camera.translation, camera.rotation, -1.0, 0.0, &config, 0.1);
        assert!((away - camera.translation).length() < 1e-4, "дальше от band'а нельзя");

        let toward = apply_zoom(camera.translation, camera.rotation, 1.0, 0.0, &config, 0.1);
        assert!(toward.y < camera.translation.y);
    }

    #[test]
    fn test_distance_clamp_preserves_height() {
        let clamped = clamp_planar_distance(Vec3::new(100.0, 25.0, 0.0), Vec3::ZERO, 70.0);
        assert!((clamped - Vec3::new(70.0, 25.0, 0.0)).length() < 1e-4);

        let inside = Vec3::new(10.0, 25.0, -10.0);
        assert_eq!(clamp_planar_distance(inside, Vec3::ZERO, 70.0), inside);
    }

    #[test]
    fn test_distance_clamp_is_idempotent() {
        let selected = Vec3::new(3.0, 1.0, -7.0);
        let once = clamp_planar_distance(Vec3::new(-80.0, 12.0, 55.0), selected, 70.0);
        let twice = clamp_planar_distance(once, selected, 70.0);

        assert!((once - twice).length() < 1e-4);
        assert!((planar_distance(once, selected) - 70.0).abs() < 1e-3);
    }

    #[test]
    fn test_floor_settles_without_overshoot() {
        let config = CameraRigConfig::default();
        let mut rig = CameraRig::default();
        let mut transform = Transform::from_xyz(0.0, 2.0, 0.0);
        let ground = Some(Vec3::ZERO);

        let mut previous = transform.translation.y;
        // 8 × smooth_time
        for _ in 0..120 {
            rig.update_height(&mut transform, ground, Vec3::ZERO, &config, DT);
            let y = transform.translation.y;
            assert!(y >= previous - 1e-5, "подъём монотонный");
            assert!(y <= config.min_height + 1e-4, "без overshoot");
            assert!(rig.control_height >= config.min_height && rig.control_height <= config.max_height);
            previous = y;
        }

        assert!((transform.translation.y - config.min_height).abs() < 0.05);
    }

    #[test]
    fn test_velocity_resets_above_floor() {
        let config = CameraRigConfig::default();
        let mut rig = CameraRig {
            velocity: Vec3::new(0.0, 4.0, 0.0),
            control_height: 15.0,
        };
        let mut transform = Transform::from_xyz(0.0, 15.0, 0.0);

        rig.update_height(&mut transform, Some(Vec3::ZERO), Vec3::ZERO, &config, DT);
        assert_eq!(rig.velocity, Vec3::ZERO);
        assert_eq!(transform.translation.y, 15.0);
    }

    #[test]
    fn test_no_ground_skips_floor() {
        let config = CameraRigConfig::default();
        let velocity = Vec3::new(0.0, 3.0, 0.0);
        let mut rig = CameraRig {
            velocity,
            control_height: 10.0,
        };
        let mut transform = Transform::from_xyz(4.0, -3.0, 4.0);

        rig.update_height(&mut transform, None, Vec3::ZERO, &config, DT);

        // Позиция и velocity не тронуты (ceiling не сработал)
        assert_eq!(transform.translation, Vec3::new(4.0, -3.0, 4.0));
        assert_eq!(rig.velocity, velocity);
    }

    #[test]
    fn test_ceiling_clamps_to_ground() {
        let config = CameraRigConfig::default();
        let mut rig = CameraRig::default();
        let mut transform = Transform::from_xyz(0.0, 50.0, 0.0);

        rig.update_height(&mut transform, Some(Vec3::new(0.0, 2.0, 0.0)), Vec3::ZERO, &config, DT);

        assert_eq!(transform.translation.y, 32.0);
        assert_eq!(rig.control_height, config.max_height);
    }

    #[test]
    fn test_ceiling_without_ground_uses_selection() {
        let config = CameraRigConfig::default();
        let mut rig = CameraRig::default();
        let mut transform = Transform::from_xyz(0.0, 50.0, 0.0);

        rig.update_height(&mut transform, None, Vec3::new(0.0, 5.0, 0.0), &config, DT);
        assert_eq!(transform.translation.y, 35.0);
    }

    #[test]
    fn test_random_input_keeps_invariants() {
        let config = CameraRigConfig::default();
        let terrain = TerrainSurface::flat(0.0)
            .with_patch(TerrainPatch::new(Vec2::new(10.0, 10.0), Vec2::new(40.0, 40.0), 6.0))
            .with_patch(TerrainPatch::new(Vec2::new(-50.0, -20.0), Vec2::new(-20.0, 20.0), 12.0));
        let probe = |origin: Vec3| probe_ground(&terrain, origin, config.probe_depth, SURFACE_MASK_GROUND_PROBE);

        let selected = Vec3::ZERO;
        let mut rig = CameraRig::default();
        let mut transform = tilted_camera(20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut command = InputCommand::default();
        for frame in 0..3000 {
            // Держим input несколько кадров, как живой игрок
            if frame % 20 == 0 {
                command = InputCommand {
                    move_vector: Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)),
                    zoom: if rng.gen_bool(0.3) { rng.gen_range(-1.0..=1.0) } else { 0.0 },
                    speed_modifier: rng.gen_bool(0.25),
                    ..default()
                };
            }

            rig.update(&mut transform, &command, selected, &config, DT, probe);

            let position = transform.translation;
            assert!(
                planar_distance(position, selected) <= config.max_distance + 1e-3,
                "frame {frame}: distance invariant, position {position}"
            );
            assert!(rig.control_height >= config.min_height && rig.control_height <= config.max_height);
            if let Some(ground) = probe(position) {
                assert!(position.y - ground.y <= config.max_height + 1e-3, "frame {frame}: ceiling");
            }
        }

        // После отпускания input камера оседает в band
        for _ in 0..120 {
            rig.update(&mut transform, &InputCommand::default(), selected, &config, DT, probe);
        }
        let ground = probe(transform.translation).expect("camera stays over terrain");
        let height = transform.translation.y - ground.y;
        assert!(height >= config.min_height - 0.05 && height <= config.max_height + 1e-3, "height {height}");
    }
}
