//! Navigation events

use bevy::prelude::*;

/// Новая цель для agent'а (click-to-move)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SetGoal {
    pub entity: Entity,
    pub point: Vec3,
}

/// Переходы motion state (для marker/animation/логов)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Idle → Moving
    SetOff { entity: Entity },
    /// Moving → Idle (или цель уже в пределах stopping distance)
    Arrived { entity: Entity },
    /// Путь не найден, call потреблён без перехода
    GoalRejected { entity: Entity },
}

impl NavigationEvent {
    pub fn entity(&self) -> Entity {
        match *self {
            NavigationEvent::SetOff { entity }
            | NavigationEvent::Arrived { entity }
            | NavigationEvent::GoalRejected { entity } => entity,
        }
    }
}
