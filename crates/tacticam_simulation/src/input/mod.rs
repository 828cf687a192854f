//! Input module — multi-device input fusion
//!
//! # Архитектура
//!
//! ```text
//! Device adapters (клиент: keyboard/mouse, gamepad)
//!     ↓ InputSubscription::dispatch(action, phase, value)
//! InputAggregator (latest-value slots) - aggregator.rs
//!     ↓ take_snapshot() раз в кадр
//! build_input_command (ECS) - systems.rs
//!     ↓
//! InputCommand / VirtualPointer resources
//! ```
//!
//! # Компоненты модуля
//!
//! - `events` - device action типы + ECS уведомления
//! - `aggregator` - slots + RAII подписки
//! - `systems` - ECS системы сборки InputCommand

pub mod aggregator;
pub mod events;
pub mod systems;


pub use aggregator::*;
pub use events::*;
pub use systems::*;

use bevy::prelude::*;

use crate::TacticsSet;

/// Input fusion plugin: aggregator + InputCommand сборка
pub struct InputFusionPlugin;

impl Plugin for InputFusionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputAggregator>()
            .init_resource::<InputCommand>()
            .init_resource::<VirtualPointer>()
            .init_resource::<ScreenSize>()
            .register_type::<ControlScheme>()
            .add_event::<ControlSchemeChanged>()
            .add_event::<ScreenResized>()
            .add_systems(
                Update,
                (apply_screen_resize, build_input_command)
                    .chain()
                    .in_set(TacticsSet::Input),
            );
    }
}
