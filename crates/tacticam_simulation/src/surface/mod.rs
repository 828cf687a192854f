//! Surface domain — ray queries по миру (GroundProbe + WorldPicker)
//!
//! # Архитектура
//!
//! ```text
//! CameraMotion set
//!     ↓ PickRequest (ray от камеры через pointer)
//! Surface set (backend: TerrainSurface ИЛИ Rapier)
//!     ↓ GroundSample (на каждой камере) + PickResolved
//! CameraHeight / Selection sets
//! ```
//!
//! Backend'ы взаимозаменяемы: оба реализуют [`RaySurface`], логика
//! probe/pick общая (`probe_ground`, `pick_world`).
//!
//! # Submodules
//!
//! - `layers`: битовые маски слоёв
//! - `terrain`: аналитическая поверхность (headless, тесты)
//! - `rapier`: Rapier collider backend (клиент)

pub mod layers;
pub mod rapier;
pub mod terrain;

pub use layers::*;
pub use rapier::RapierSurfacePlugin;
pub use terrain::{TerrainPatch, TerrainSurface, TerrainSurfacePlugin};

use bevy::prelude::*;

use crate::config::GROUND_PROBE_OFFSET;

/// Геометрия, по которой можно пускать лучи
pub trait RaySurface {
    /// Первая точка пересечения луча с solid геометрией из `layers`
    /// в пределах `max_distance`. Trigger/sensor объёмы игнорируются.
    fn raycast(&self, ray: Ray3d, max_distance: f32, layers: u32) -> Option<Vec3>;
}

/// Ground probe: луч вниз из точки на GROUND_PROBE_OFFSET выше `origin`.
///
/// Возвращает точку земли или `None` (камера вне карты — clamp пропускаем).
/// Без side-effects, идемпотентно.
pub fn probe_ground<S: RaySurface + ?Sized>(
    surface: &S,
    origin: Vec3,
    max_depth: f32,
    layers: u32,
) -> Option<Vec3> {
    let start = origin + Vec3::Y * GROUND_PROBE_OFFSET;
    let ray = Ray3d::new(start, Dir3::NEG_Y);
    surface.raycast(ray, max_depth + GROUND_PROBE_OFFSET, layers)
}

/// World picker: первая solid точка вдоль луча запроса
pub fn pick_world<S: RaySurface + ?Sized>(surface: &S, request: &PickRequest) -> Option<Vec3> {
    surface.raycast(request.ray, request.max_distance, request.layers)
}

/// Результат ground probe под entity (камерой), пишется backend'ом каждый кадр
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundSample {
    /// `None` = под камерой нет земли в этом кадре
    pub point: Option<Vec3>,
}

/// Запрос world pick (select edge → луч через pointer)
#[derive(Event, Debug, Clone, Copy)]
pub struct PickRequest {
    pub ray: Ray3d,
    pub max_distance: f32,
    pub layers: u32,
}

/// Ответ backend'а на PickRequest (в том же кадре)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PickResolved {
    pub point: Option<Vec3>,
}
