//! Navigation компоненты: agent FSM + capability компоненты (path, animator)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Состояние path-follow capability (пишет backend, читает FSM)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PathStatus {
    /// Путь доходит до destination
    #[default]
    Complete,
    /// Путь обрывается раньше (destination недостижим целиком)
    Partial,
    /// Пути нет
    Invalid,
}

/// Path-follow capability (opaque pathfinding/steering backend).
///
/// FSM задаёт `destination`/`is_stopped`/`update_rotation`/`speed`,
/// backend отвечает `has_path`/`path_pending`/`status`/`remaining_distance`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PathAgent {
    pub destination: Vec3,
    pub has_path: bool,
    /// Backend ещё считает путь к новому destination
    pub path_pending: bool,
    pub status: PathStatus,
    pub remaining_distance: f32,
    pub stopping_distance: f32,
    /// Locomotion выключена
    pub is_stopped: bool,
    pub update_rotation: bool,
    /// Скорость locomotion (feedback от root motion)
    pub speed: f32,
}

impl Default for PathAgent {
    fn default() -> Self {
        Self {
            destination: Vec3::ZERO,
            has_path: false,
            path_pending: false,
            status: PathStatus::Complete,
            remaining_distance: 0.0,
            stopping_distance: 0.5,
            is_stopped: true,
            update_rotation: false,
            speed: 0.0,
        }
    }
}

impl PathAgent {
    /// Новый destination — путь пересчитывается backend'ом
    pub fn set_destination(&mut self, point: Vec3) {
        self.destination = point;
        self.path_pending = true;
    }

    /// Путь есть, полный и цель дальше stopping distance
    pub fn can_travel(&self) -> bool {
        self.has_path && self.status == PathStatus::Complete && self.remaining_distance > self.stopping_distance
    }
}

/// Animation capability (blend tree/rig — внешние)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Animator {
    pub apply_root_motion: bool,
    pub is_moving: bool,
    /// Walk (0) ↔ run (1)
    pub run_blend: f32,
    /// Root displacement, выданный анимацией в этом кадре
    pub delta_position: Vec3,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            apply_root_motion: true,
            is_moving: false,
            run_blend: 0.0,
            delta_position: Vec3::ZERO,
        }
    }
}

/// Motion state (единственный authoritative)
///
/// Animation/locomotion флаги — проекции этого состояния.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MotionState {
    #[default]
    Idle,
    Moving,
}

/// Per-entity navigation state machine
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[require(Transform, PathAgent, Animator, NavigationConfig)]
pub struct NavigationAgent {
    pub state: MotionState,
    /// One-shot "call" флаг от SetGoal
    pub call: bool,
    /// Velocity пружины run blend
    pub run_blend_velocity: f32,
}

impl NavigationAgent {
    /// SetGoal: destination + call. State не меняется.
    pub fn set_goal(&mut self, path: &mut PathAgent, point: Vec3) {
        path.set_destination(point);
        self.call = true;
    }

    pub fn is_moving(&self) -> bool {
        self.state == MotionState::Moving
    }
}

/// Per-agent параметры
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Дальше этой дистанции — бег, ближе — шаг (>= 1)
    pub run_distance: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { run_distance: 4.0 }
    }
}

impl NavigationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_distance >= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::BelowMinimum {
                field: "run_distance",
                min: 1.0,
                value: self.run_distance,
            })
        }
    }
}
