//! Input systems (ECS): snapshot aggregator → InputCommand

use bevy::prelude::*;

use super::aggregator::InputAggregator;
use super::events::{ControlScheme, ControlSchemeChanged, ScreenResized};
use crate::config::InputConfig;
use crate::logger;

/// Канонический input кадра. Читается CameraRig и selection.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputCommand {
    /// Планарное движение, компоненты в [-1, 1]
    pub move_vector: Vec2,
    /// Zoom в [-1, 1]
    pub zoom: f32,
    pub speed_modifier: bool,
    /// Authoritative pointer (device space, origin top-left)
    pub pointer: Vec2,
    /// Select edge — true ровно в одном кадре на нажатие
    pub select: bool,
}

/// Размер экрана в device pixels
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize(pub Vec2);

impl Default for ScreenSize {
    fn default() -> Self {
        Self(Vec2::new(1280.0, 720.0))
    }
}

impl ScreenSize {
    pub fn center(&self) -> Vec2 {
        self.0 * 0.5
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(Vec2::ZERO, self.0.max(Vec2::ZERO))
    }
}

/// Virtual cursor для gamepad схемы
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualPointer {
    pub position: Vec2,
    /// Показывать ли pointer (только в gamepad схеме)
    pub visible: bool,
    /// Pointer хоть раз размещался (иначе центрируем при входе в gamepad)
    pub placed: bool,
}

impl VirtualPointer {
    /// Интеграция направления стика, clamp в пределах экрана
    pub fn integrate(&mut self, direction: Vec2, speed: f32, dt: f32, screen: &ScreenSize) {
        if direction == Vec2::ZERO {
            return;
        }
        self.position = screen.clamp(self.position + direction * speed * dt);
    }
}

/// Система: snapshot aggregator → InputCommand (один раз за кадр)
///
/// # Schedule
/// - Update, TacticsSet::Input
pub fn build_input_command(
    aggregator: Res<InputAggregator>,
    config: Res<InputConfig>,
    screen: Res<ScreenSize>,
    time: Res<Time>,
    mut pointer: ResMut<VirtualPointer>,
    mut command: ResMut<InputCommand>,
    mut scheme_events: EventWriter<ControlSchemeChanged>,
) {
    let snapshot = aggregator.take_snapshot();

    let gamepad = snapshot.scheme == ControlScheme::Gamepad;
    if pointer.visible != gamepad {
        pointer.visible = gamepad;
    }
    // Вход в gamepad (в т.ч. начальная схема) — центрируем неразмещённый pointer
    if gamepad && !pointer.placed {
        pointer.position = screen.center();
        pointer.placed = true;
    }

    if let Some(scheme) = snapshot.scheme_changed {
        logger::log_info(&format!("Control scheme changed: {:?}", scheme));
        scheme_events.write(ControlSchemeChanged { scheme });
    }

    let pointer_position = if gamepad {
        pointer.integrate(
            snapshot.stick_direction,
            config.gamepad_pointer_speed,
            time.delta_secs(),
            &screen,
        );
        pointer.position
    } else {
        snapshot.pointer_position
    };

    *command = InputCommand {
        move_vector: snapshot.move_vector,
        zoom: snapshot.zoom,
        speed_modifier: snapshot.speed_modifier,
        pointer: pointer_position,
        select: snapshot.select,
    };
}

/// Система: resize экрана → ScreenSize + re-clamp virtual pointer
///
/// # Schedule
/// - Update, TacticsSet::Input (до build_input_command)
pub fn apply_screen_resize(
    mut events: EventReader<ScreenResized>,
    mut screen: ResMut<ScreenSize>,
    mut pointer: ResMut<VirtualPointer>,
) {
    // Последний resize в кадре побеждает
    let Some(event) = events.read().last() else {
        return;
    };

    screen.0 = event.size;
    pointer.position = screen.clamp(pointer.position);
    logger::log(&format!("Screen resized: {:.0}x{:.0}", event.size.x, event.size.y));
}
