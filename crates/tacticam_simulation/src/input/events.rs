//! Input events и типы device actions
//!
//! Device adapters (клиент) пишут `(action, phase, value)` через
//! `InputSubscription::dispatch`. ECS события ниже — только уведомления
//! для presentation слоя.

use bevy::prelude::*;

/// Активная схема управления
///
/// Определяет какой cursor authoritative:
/// - KeyboardMouse: literal pointer position
/// - Gamepad: virtual cursor, интегрируется из стика
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum ControlScheme {
    #[default]
    KeyboardMouse,
    Gamepad,
}

/// Логические input streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Планарное движение камеры (Vec2)
    Move,
    /// Zoom (scroll / триггеры), используется `y`
    Zoom,
    /// Ускорение камеры (Shift / shoulder)
    SpeedModifier,
    /// Pointer position (KeyboardMouse producer) или направление
    /// virtual cursor (Gamepad producer). Slot выбирается по схеме producer'а.
    Cursor,
    /// Click-to-move
    Select,
}

/// Фаза device action (started → performed* → canceled)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    Started,
    Performed,
    Canceled,
}

/// Typed payload device action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionValue {
    Axis2(Vec2),
    Axis1(f32),
    Button(bool),
}

impl ActionValue {
    pub fn as_vec2(&self) -> Vec2 {
        match *self {
            ActionValue::Axis2(v) => v,
            ActionValue::Axis1(x) => Vec2::new(0.0, x),
            ActionValue::Button(pressed) => Vec2::new(0.0, if pressed { 1.0 } else { 0.0 }),
        }
    }

    pub fn as_f32(&self) -> f32 {
        match *self {
            ActionValue::Axis2(v) => v.y,
            ActionValue::Axis1(x) => x,
            ActionValue::Button(pressed) => {
                if pressed {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Ненулевой payload (стик отклонён, кнопка нажата)
    pub fn is_actuated(&self) -> bool {
        match *self {
            ActionValue::Axis2(v) => v != Vec2::ZERO,
            ActionValue::Axis1(x) => x != 0.0,
            ActionValue::Button(pressed) => pressed,
        }
    }
}

/// Event: схема управления переключилась (auto-switch по активности устройства)
///
/// Обрабатывается presentation слоем (показать/скрыть virtual pointer).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ControlSchemeChanged {
    pub scheme: ControlScheme,
}

/// Event: размер экрана изменился (device pixels)
///
/// Генерируется клиентом при resize окна; virtual pointer пере-clamp'ится.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ScreenResized {
    pub size: Vec2,
}
