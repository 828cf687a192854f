//! Camera rig компоненты

use bevy::prelude::*;

use crate::surface::GroundSample;

/// Состояние camera rig (позиция — в Transform)
///
/// Orientation камеры rig НЕ трогает — только translation.
///
/// Инвариант: `min_height <= control_height <= max_height` после каждого update.
/// Поля меняет только CameraRig update (никто больше не пишет).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[require(Transform, GroundSample, CameraLens)]
pub struct CameraRig {
    /// Velocity пружины ground smoothing (живёт между кадрами)
    pub velocity: Vec3,
    /// Текущая высота над anchor (земля или selection), clamped
    pub control_height: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            control_height: 0.0,
        }
    }
}

/// Перспективная проекция для screen → ray (без renderer'а)
///
/// Клиент синхронизирует `fov_y` с реальной камерой, viewport — с ScreenSize.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CameraLens {
    /// Вертикальный field of view (радианы)
    pub fov_y: f32,
    /// Размер viewport в device pixels
    pub viewport: Vec2,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl CameraLens {
    /// Луч из камеры через точку экрана (origin top-left, Y вниз).
    ///
    /// `None` для вырожденного viewport.
    pub fn screen_ray(&self, transform: &Transform, screen: Vec2) -> Option<Ray3d> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }

        let ndc = Vec2::new(
            2.0 * screen.x / self.viewport.x - 1.0,
            1.0 - 2.0 * screen.y / self.viewport.y,
        );
        let half_height = (self.fov_y * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;

        // Camera space: смотрим вдоль -Z
        let local = Vec3::new(ndc.x * half_height * aspect, ndc.y * half_height, -1.0);
        let direction = Dir3::new(transform.rotation * local).ok()?;

        Some(Ray3d::new(transform.translation, direction))
    }
}
