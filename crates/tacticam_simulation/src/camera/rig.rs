//! CameraRig update — чистые шаги без ECS
//!
//! Порядок за кадр (фиксирован):
//!
//! 1. Планарное движение (forward спроецирован на землю + right)
//! 2. Zoom вдоль forward (с учётом height band)
//! 3. Clamp планарной дистанции до selection
//! 4. Ground clearance (критически демпфированный подъём)
//! 5. Ceiling clamp + обновление control_height
//!
//! Шаги 1-3 и 4-5 разнесены между двумя системами: между ними Surface set
//! сэмплирует землю под УЖЕ сдвинутой камерой.

use bevy::prelude::*;

use super::components::CameraRig;
use crate::config::CameraRigConfig;
use crate::input::InputCommand;
use crate::math::{planar, smooth_damp_vec3};

/// Шаг 1: планарное движение.
///
/// Forward проецируется на XZ. Для камеры, смотрящей строго вниз, вместо
/// forward берём up (экранное "вверх").
pub fn apply_planar_move(
    position: Vec3,
    rotation: Quat,
    command: &InputCommand,
    config: &CameraRigConfig,
    dt: f32,
) -> Vec3 {
    if command.move_vector == Vec2::ZERO {
        return position;
    }

    let mut forward = planar(rotation * Vec3::NEG_Z).normalize_or_zero();
    if forward == Vec3::ZERO {
        forward = planar(rotation * Vec3::Y).normalize_or_zero();
    }
    let right = planar(rotation * Vec3::X).normalize_or_zero();

    let direction = forward * command.move_vector.y + right * command.move_vector.x;
    position + direction * config.speed(command.speed_modifier) * dt
}

/// Шаг 2: zoom вдоль forward.
///
/// Шаг укорачивается так, чтобы высота над `anchor_y` не вышла из
/// `[min_height, max_height]`. Если камера уже вне band'а — zoom может
/// только возвращать её к band'у.
pub fn apply_zoom(position: Vec3, rotation: Quat, zoom: f32, anchor_y: f32, config: &CameraRigConfig, dt: f32) -> Vec3 {
    let step = zoom * config.zoom_speed * dt;
    if step == 0.0 {
        return position;
    }

    let forward = rotation * Vec3::NEG_Z;
    if forward.y.abs() < 1e-4 {
        // Горизонтальный forward высоту не меняет
        return position + forward * step;
    }

    let height = position.y - anchor_y;
    let lowest = config.min_height.min(height);
    let highest = config.max_height.max(height);
    let target_height = (height + step * forward.y).clamp(lowest, highest);

    position + forward * ((target_height - height) / forward.y)
}

/// Шаг 3: планарная дистанция до selection не больше `max_distance`.
///
/// Высота не меняется. Идемпотентно (с точностью float).
pub fn clamp_planar_distance(position: Vec3, selected: Vec3, max_distance: f32) -> Vec3 {
    let offset = planar(position - selected);
    let distance = offset.length();
    if distance <= max_distance {
        return position;
    }

    let clamped = offset * (max_distance / distance);
    Vec3::new(selected.x + clamped.x, position.y, selected.z + clamped.z)
}

impl CameraRig {
    /// Шаги 1-3. `ground_hint` — последняя известная земля под камерой
    /// (anchor для zoom band), иначе anchor = selection.
    pub fn update_motion(
        &self,
        transform: &mut Transform,
        command: &InputCommand,
        selected: Vec3,
        ground_hint: Option<Vec3>,
        config: &CameraRigConfig,
        dt: f32,
    ) {
        let anchor_y = ground_hint.map_or(selected.y, |ground| ground.y);

        let mut position = apply_planar_move(transform.translation, transform.rotation, command, config, dt);
        position = apply_zoom(position, transform.rotation, command.zoom, anchor_y, config, dt);
        position = clamp_planar_distance(position, selected, config.max_distance);

        transform.translation = position;
    }

    /// Шаги 4-5. `ground` — probe под камерой ПОСЛЕ шагов 1-3.
    ///
    /// Без земли clearance пропускается (velocity сохраняется), ceiling
    /// считается от selection.
    pub fn update_height(
        &mut self,
        transform: &mut Transform,
        ground: Option<Vec3>,
        selected: Vec3,
        config: &CameraRigConfig,
        dt: f32,
    ) {
        let mut position = transform.translation;

        if let Some(ground) = ground {
            if position.y - ground.y <= config.min_height {
                let desired = Vec3::new(position.x, ground.y + config.min_height, position.z);
                position = smooth_damp_vec3(position, desired, &mut self.velocity, config.smooth_time, dt);
            } else {
                self.velocity = Vec3::ZERO;
            }
        }

        let anchor_y = ground.map_or(selected.y, |ground| ground.y);
        if position.y - anchor_y > config.max_height {
            position.y = anchor_y + config.max_height;
        }

        self.control_height = (position.y - anchor_y).clamp(config.min_height, config.max_height);
        transform.translation = position;
    }

    /// Полный кадр (шаги 1-5) с произвольным ground probe.
    ///
    /// Используется вне ECS (тесты, offline симуляция). Probe вызывается
    /// дважды: до движения (zoom anchor) и после (clearance/ceiling).
    pub fn update(
        &mut self,
        transform: &mut Transform,
        command: &InputCommand,
        selected: Vec3,
        config: &CameraRigConfig,
        dt: f32,
        probe: impl Fn(Vec3) -> Option<Vec3>,
    ) {
        let hint = probe(transform.translation);
        self.update_motion(transform, command, selected, hint, config, dt);

        let ground = probe(transform.translation);
        self.update_height(transform, ground, selected, config, dt);
    }
}
