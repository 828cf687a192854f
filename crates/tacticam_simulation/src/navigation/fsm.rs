//! Navigation FSM: Idle ↔ Moving поверх path-follow capability
//!
//! ```text
//! Idle ──(call && путь Complete && remaining > stopping)──→ Moving   [SetOff]
//! Moving ──(путь пропал/неполный || remaining <= stopping)──→ Idle   [Arrived]
//! ```
//!
//! Пока backend считает путь (`path_pending`) — call не сгорает,
//! Moving agent продолжает движение.

use bevy::prelude::*;

use super::components::{Animator, MotionState, NavigationAgent, NavigationConfig, PathAgent, PathStatus};
use super::events::{NavigationEvent, SetGoal};
use crate::config::RUN_BLEND_SMOOTH_TIME;
use crate::logger;
use crate::math::smooth_damp;

/// Результат одного tick'а FSM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SetOff,
    Arrived,
    Rejected,
}

/// Один tick state machine (чистая функция, без ECS).
///
/// Проекции состояния (animator.is_moving, locomotion/rotation) пишутся
/// ТОЛЬКО здесь, на переходах.
pub fn tick(agent: &mut NavigationAgent, path: &mut PathAgent, animator: &mut Animator) -> Option<Transition> {
    match agent.state {
        MotionState::Idle => {
            if !agent.call || path.path_pending {
                return None;
            }
            agent.call = false;

            if path.can_travel() {
                agent.state = MotionState::Moving;
                animator.is_moving = true;
                path.is_stopped = false;
                path.update_rotation = true;
                Some(Transition::SetOff)
            } else if path.has_path && path.status == PathStatus::Complete {
                // Уже на месте (в пределах stopping distance)
                Some(Transition::Arrived)
            } else {
                Some(Transition::Rejected)
            }
        }
        MotionState::Moving => {
            // Retarget во время движения не требует перехода
            agent.call = false;
            if path.path_pending || path.can_travel() {
                return None;
            }

            agent.state = MotionState::Idle;
            animator.is_moving = false;
            path.is_stopped = true;
            path.update_rotation = false;
            Some(Transition::Arrived)
        }
    }
}

/// Система: SetGoal events → agent.set_goal
///
/// # Schedule
/// - Update, TacticsSet::Navigation (первой)
pub fn apply_set_goals(mut goals: EventReader<SetGoal>, mut agents: Query<(&mut NavigationAgent, &mut PathAgent)>) {
    for goal in goals.read() {
        let Ok((mut agent, mut path)) = agents.get_mut(goal.entity) else {
            logger::log_warning(&format!("SetGoal for non-agent entity {:?}", goal.entity));
            continue;
        };
        agent.set_goal(&mut path, goal.point);
    }
}

/// Система: новые agents выключают root motion (displacement забирает locomotion)
///
/// Невалидный NavigationConfig — ошибка конфигурации.
pub fn init_agents(mut agents: Query<(&mut Animator, &NavigationConfig), Added<NavigationAgent>>) -> Result {
    for (mut animator, config) in agents.iter_mut() {
        config.validate()?;
        animator.apply_root_motion = false;
    }
    Ok(())
}

/// Система: state machine tick для всех agents
///
/// # Schedule
/// - Update, TacticsSet::Navigation
pub fn motion_state_tick(
    mut agents: Query<(Entity, &mut NavigationAgent, &mut PathAgent, &mut Animator)>,
    mut events: EventWriter<NavigationEvent>,
) {
    for (entity, mut agent, mut path, mut animator) in agents.iter_mut() {
        let Some(transition) = tick(&mut agent, &mut path, &mut animator) else {
            continue;
        };

        let event = match transition {
            Transition::SetOff => {
                logger::log(&format!("{:?} set off, remaining {:.2}", entity, path.remaining_distance));
                NavigationEvent::SetOff { entity }
            }
            Transition::Arrived => {
                logger::log(&format!("{:?} arrived", entity));
                NavigationEvent::Arrived { entity }
            }
            Transition::Rejected => {
                logger::log_warning(&format!("{:?} goal rejected ({:?})", entity, path.status));
                NavigationEvent::GoalRejected { entity }
            }
        };
        events.write(event);
    }
}

/// Система: locomotion speed = animated displacement / dt (только Moving)
pub fn locomotion_feedback(time: Res<Time>, mut agents: Query<(&NavigationAgent, &Animator, &mut PathAgent)>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (agent, animator, mut path) in agents.iter_mut() {
        if agent.is_moving() {
            path.speed = animator.delta_position.length() / dt;
        }
    }
}

/// Система: walk/run blend от оставшейся дистанции
pub fn gait_blend(
    time: Res<Time>,
    mut agents: Query<(&mut NavigationAgent, &PathAgent, &NavigationConfig, &mut Animator)>,
) {
    let dt = time.delta_secs();

    for (mut agent, path, config, mut animator) in agents.iter_mut() {
        if !agent.is_moving() {
            continue;
        }

        let target = if path.remaining_distance > config.run_distance { 1.0 } else { 0.0 };
        animator.run_blend = smooth_damp(
            animator.run_blend,
            target,
            &mut agent.run_blend_velocity,
            RUN_BLEND_SMOOTH_TIME,
            dt,
        );
    }
}
