//! InputAggregator — latest-value slots для всех input streams
//!
//! # Архитектура
//!
//! ```text
//! Device callbacks (любой thread)
//!     ↓ InputSubscription::dispatch (пишет ТОЛЬКО в slots)
//! Mutex<InputSlots>
//!     ↓ take_snapshot() — один раз за кадр
//! build_input_command (ECS system) → InputCommand
//! ```
//!
//! Camera/navigation state напрямую из callbacks не трогается — никаких
//! гонок между доставкой событий и чтением кадра.
//!
//! # Lifecycle подписок
//!
//! `InputSubscription` — RAII handle: Drop снимает регистрацию на любом
//! exit path (panic, early return, despawn владельца).

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use bevy::prelude::*;

use super::events::{ActionPhase, ActionValue, ControlScheme, InputAction};

#[derive(Debug, Default)]
struct InputSlots {
    move_vector: Vec2,
    zoom: f32,
    speed_modifier: bool,
    /// Literal pointer (KeyboardMouse producers)
    pointer_position: Vec2,
    /// Направление virtual cursor (Gamepad producers)
    stick_direction: Vec2,
    select_pending: bool,
    scheme: ControlScheme,
    scheme_changed: Option<ControlScheme>,
    subscribers: HashSet<u64>,
}

#[derive(Debug, Default)]
struct Shared {
    slots: Mutex<InputSlots>,
    next_id: AtomicU64,
}

impl Shared {
    fn slots(&self) -> MutexGuard<'_, InputSlots> {
        // Poisoned slots всё ещё содержат валидные latest values
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Консистентный снимок slots за кадр
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_vector: Vec2,
    pub zoom: f32,
    pub speed_modifier: bool,
    /// Последняя позиция pointing device (device space)
    pub pointer_position: Vec2,
    /// Последнее направление стика virtual cursor
    pub stick_direction: Vec2,
    /// Select edge (был Started с прошлого снимка)
    pub select: bool,
    pub scheme: ControlScheme,
    /// Новая схема, если переключение случилось с прошлого снимка
    pub scheme_changed: Option<ControlScheme>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct InputAggregator {
    shared: Arc<Shared>,
}

impl InputAggregator {
    pub fn new(initial_scheme: ControlScheme) -> Self {
        let aggregator = Self::default();
        aggregator.shared.slots().scheme = initial_scheme;
        aggregator
    }

    /// Регистрирует producer'а (device adapter) для указанной схемы
    pub fn subscribe(&self, scheme: ControlScheme) -> InputSubscription {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared.slots().subscribers.insert(id);

        InputSubscription {
            id,
            scheme,
            shared: Arc::downgrade(&self.shared),
        }
    }

    pub fn current_scheme(&self) -> ControlScheme {
        self.shared.slots().scheme
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.slots().subscribers.len()
    }

    /// Снимок slots. Select edge и scheme change потребляются.
    pub fn take_snapshot(&self) -> InputSnapshot {
        let mut slots = self.shared.slots();
        let select = std::mem::take(&mut slots.select_pending);
        let scheme_changed = slots.scheme_changed.take();

        InputSnapshot {
            move_vector: slots.move_vector,
            zoom: slots.zoom,
            speed_modifier: slots.speed_modifier,
            pointer_position: slots.pointer_position,
            stick_direction: slots.stick_direction,
            select,
            scheme: slots.scheme,
            scheme_changed,
        }
    }
}

/// Handle producer'а. Пишет в slots, Drop снимает регистрацию.
#[derive(Debug)]
pub struct InputSubscription {
    id: u64,
    scheme: ControlScheme,
    shared: Weak<Shared>,
}

impl InputSubscription {
    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }

    /// Записать device action в slots.
    ///
    /// Возвращает `false` если aggregator уже уничтожен или подписка снята.
    pub fn dispatch(&self, action: InputAction, phase: ActionPhase, value: ActionValue) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        let mut slots = shared.slots();
        if !slots.subscribers.contains(&self.id) {
            return false;
        }

        // Auto-switch: устройство другой схемы реально что-то нажало
        if phase != ActionPhase::Canceled && value.is_actuated() && slots.scheme != self.scheme {
            slots.scheme = self.scheme;
            slots.scheme_changed = Some(self.scheme);
        }

        match action {
            InputAction::Move => {
                slots.move_vector = value.as_vec2().clamp(Vec2::NEG_ONE, Vec2::ONE);
            }
            InputAction::Zoom => {
                slots.zoom = value.as_f32().clamp(-1.0, 1.0);
            }
            InputAction::SpeedModifier => {
                if phase != ActionPhase::Started {
                    slots.speed_modifier = value.as_f32() > 0.0;
                }
            }
            // Каждая схема пишет свой cursor slot: после auto-switch
            // не читаем значение чужого устройства
            InputAction::Cursor => match self.scheme {
                ControlScheme::KeyboardMouse => slots.pointer_position = value.as_vec2(),
                ControlScheme::Gamepad => slots.stick_direction = value.as_vec2(),
            },
            InputAction::Select => {
                // Edge-triggered: только переход в pressed
                if phase == ActionPhase::Started {
                    slots.select_pending = true;
                }
            }
        }

        true
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.slots().subscribers.remove(&self.id);
        }
    }
}
