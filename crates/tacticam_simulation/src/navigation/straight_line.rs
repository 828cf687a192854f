//! Straight-line path backend + root motion stand-in
//!
//! Простейшие реализации внешних capability для headless режима и клиента:
//! - путь = прямая к destination (всегда Complete, кроме non-finite цели)
//! - "анимация" выдаёт displacement по направлению к цели со скоростью gait
//!
//! Настоящий pathfinding/animation rig сюда не входит.

use bevy::prelude::*;

use super::components::{Animator, PathAgent, PathStatus};
use super::fsm::{apply_set_goals, locomotion_feedback, motion_state_tick};
use crate::math::planar;
use crate::TacticsSet;

/// Скорость шага (run_blend = 0), units/sec
pub const WALK_SPEED: f32 = 2.0;

/// Скорость бега (run_blend = 1), units/sec
pub const RUN_SPEED: f32 = 6.0;

/// Система: pending путь → прямая до destination (в том же кадре)
pub fn resolve_straight_paths(mut agents: Query<(&Transform, &mut PathAgent)>) {
    for (transform, mut path) in agents.iter_mut() {
        if !path.path_pending {
            continue;
        }
        path.path_pending = false;

        if !path.destination.is_finite() {
            path.has_path = false;
            path.status = PathStatus::Invalid;
            continue;
        }

        path.has_path = true;
        path.status = PathStatus::Complete;
        path.remaining_distance = planar(path.destination - transform.translation).length();
    }
}

/// Система: root motion stand-in — displacement кадра по gait blend
pub fn animate_root_motion(time: Res<Time>, mut agents: Query<(&Transform, &PathAgent, &mut Animator)>) {
    let dt = time.delta_secs();

    for (transform, path, mut animator) in agents.iter_mut() {
        if !animator.is_moving {
            animator.delta_position = Vec3::ZERO;
            continue;
        }

        let direction = planar(path.destination - transform.translation).normalize_or_zero();
        let blend = animator.run_blend.clamp(0.0, 1.0);
        let speed = WALK_SPEED + (RUN_SPEED - WALK_SPEED) * blend;
        animator.delta_position = direction * speed * dt;
    }
}

/// Система: движение по прямой со скоростью `PathAgent::speed`
pub fn follow_straight_paths(time: Res<Time>, mut agents: Query<(&mut Transform, &mut PathAgent)>) {
    let dt = time.delta_secs();

    for (mut transform, mut path) in agents.iter_mut() {
        if !path.has_path {
            continue;
        }

        let offset = planar(path.destination - transform.translation);
        let distance = offset.length();

        if !path.is_stopped && distance > 0.0 {
            let step = (path.speed * dt).min(distance);
            let direction = offset / distance;
            transform.translation += direction * step;

            if path.update_rotation {
                transform.look_to(direction, Vec3::Y);
            }
            path.remaining_distance = distance - step;
        } else {
            path.remaining_distance = distance;
        }
    }
}

/// Headless path/animation backend
pub struct StraightLinePathPlugin;

impl Plugin for StraightLinePathPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                resolve_straight_paths.after(apply_set_goals).before(motion_state_tick),
                animate_root_motion.after(motion_state_tick).before(locomotion_feedback),
                follow_straight_paths.after(locomotion_feedback),
            )
                .in_set(TacticsSet::Navigation),
        );
    }
}
