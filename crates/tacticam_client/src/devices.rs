//! Device adapters: Bevy input → InputAggregator
//!
//! Каждый adapter держит свою InputSubscription в `Local` и шлёт
//! `(action, phase, value)` только на изменениях. Подписка снимается
//! вместе с системой (RAII).

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};
use tacticam_simulation::input::ScreenResized;
use tacticam_simulation::{
    ActionPhase, ActionValue, ControlScheme, InputAction, InputAggregator, InputSubscription, TacticsSet,
};

pub struct DeviceAdaptersPlugin;

impl Plugin for DeviceAdaptersPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, announce_screen_size)
            .add_systems(
                Update,
                (keyboard_mouse_adapter, gamepad_adapter, forward_window_resize).before(TacticsSet::Input),
            );
    }
}

/// Последнее отправленное значение оси (started/performed/canceled по переходам)
#[derive(Default)]
struct AxisState(Vec2);

impl AxisState {
    fn feed(&mut self, subscription: &InputSubscription, action: InputAction, value: Vec2) {
        if value == self.0 {
            return;
        }
        let phase = if value == Vec2::ZERO {
            ActionPhase::Canceled
        } else if self.0 == Vec2::ZERO {
            ActionPhase::Started
        } else {
            ActionPhase::Performed
        };
        subscription.dispatch(action, phase, ActionValue::Axis2(value));
        self.0 = value;
    }
}

fn feed_button(subscription: &InputSubscription, action: InputAction, just_pressed: bool, just_released: bool) {
    if just_pressed {
        subscription.dispatch(action, ActionPhase::Started, ActionValue::Button(true));
        subscription.dispatch(action, ActionPhase::Performed, ActionValue::Button(true));
    }
    if just_released {
        subscription.dispatch(action, ActionPhase::Canceled, ActionValue::Button(false));
    }
}

#[derive(Default)]
struct KeyboardMouseState {
    movement: AxisState,
    zoom: AxisState,
}

fn keyboard_mouse_adapter(
    aggregator: Res<InputAggregator>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut subscription: Local<Option<InputSubscription>>,
    mut state: Local<KeyboardMouseState>,
) {
    let subscription = subscription.get_or_insert_with(|| aggregator.subscribe(ControlScheme::KeyboardMouse));

    let axis = |negative: [KeyCode; 2], positive: [KeyCode; 2]| -> f32 {
        let mut value = 0.0;
        if keys.any_pressed(negative) {
            value -= 1.0;
        }
        if keys.any_pressed(positive) {
            value += 1.0;
        }
        value
    };
    let movement = Vec2::new(
        axis([KeyCode::KeyA, KeyCode::ArrowLeft], [KeyCode::KeyD, KeyCode::ArrowRight]),
        axis([KeyCode::KeyS, KeyCode::ArrowDown], [KeyCode::KeyW, KeyCode::ArrowUp]),
    );
    state.movement.feed(subscription, InputAction::Move, movement);

    // Колесо — дискретные события, в кадре без прокрутки zoom гаснет
    let scroll: f32 = wheel.read().map(|event| event.y).sum();
    state.zoom.feed(subscription, InputAction::Zoom, Vec2::new(0.0, scroll));

    feed_button(
        subscription,
        InputAction::SpeedModifier,
        keys.just_pressed(KeyCode::ShiftLeft),
        keys.just_released(KeyCode::ShiftLeft),
    );

    if let Some(moved) = cursor_moved.read().last() {
        subscription.dispatch(InputAction::Cursor, ActionPhase::Performed, ActionValue::Axis2(moved.position));
    }

    feed_button(
        subscription,
        InputAction::Select,
        mouse_buttons.just_pressed(MouseButton::Left),
        mouse_buttons.just_released(MouseButton::Left),
    );
}

#[derive(Default)]
struct GamepadState {
    movement: AxisState,
    zoom: AxisState,
    cursor: AxisState,
}

fn gamepad_adapter(
    aggregator: Res<InputAggregator>,
    gamepads: Query<&Gamepad>,
    mut subscription: Local<Option<InputSubscription>>,
    mut state: Local<GamepadState>,
) {
    let subscription = subscription.get_or_insert_with(|| aggregator.subscribe(ControlScheme::Gamepad));

    // Геймпад отключился — отпускаем все оси
    let Some(gamepad) = gamepads.iter().next() else {
        state.movement.feed(subscription, InputAction::Move, Vec2::ZERO);
        state.zoom.feed(subscription, InputAction::Zoom, Vec2::ZERO);
        state.cursor.feed(subscription, InputAction::Cursor, Vec2::ZERO);
        return;
    };

    state.movement.feed(subscription, InputAction::Move, gamepad.left_stick());
    state.cursor.feed(subscription, InputAction::Cursor, gamepad.right_stick());

    let mut zoom = 0.0;
    if gamepad.pressed(GamepadButton::RightTrigger2) {
        zoom += 1.0;
    }
    if gamepad.pressed(GamepadButton::LeftTrigger2) {
        zoom -= 1.0;
    }
    state.zoom.feed(subscription, InputAction::Zoom, Vec2::new(0.0, zoom));

    feed_button(
        subscription,
        InputAction::SpeedModifier,
        gamepad.just_pressed(GamepadButton::LeftTrigger),
        gamepad.just_released(GamepadButton::LeftTrigger),
    );
    feed_button(
        subscription,
        InputAction::Select,
        gamepad.just_pressed(GamepadButton::South),
        gamepad.just_released(GamepadButton::South),
    );
}

fn announce_screen_size(windows: Query<&Window, With<PrimaryWindow>>, mut resized: EventWriter<ScreenResized>) {
    if let Ok(window) = windows.single() {
        resized.write(ScreenResized {
            size: Vec2::new(window.width(), window.height()),
        });
    }
}

fn forward_window_resize(mut events: EventReader<WindowResized>, mut resized: EventWriter<ScreenResized>) {
    for event in events.read() {
        resized.write(ScreenResized {
            size: Vec2::new(event.width, event.height),
        });
    }
}
