//! Аналитическая поверхность — горизонтальные прямоугольные патчи
//!
//! Используется в headless режиме (без Rapier) и в тестах.
//! Патч = top face на высоте `height`, лучи снизу его не видят
//! (probe из-под земли = no hit).

use bevy::prelude::*;

use super::{pick_world, probe_ground, GroundSample, PickRequest, PickResolved, RaySurface};
use super::layers::SURFACE_LAYER_TERRAIN;
use crate::config::CameraRigConfig;
use crate::TacticsSet;

/// Полуразмер "бесконечного" патча для `TerrainSurface::flat`
const FLAT_EXTENT: f32 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainPatch {
    /// Минимальный угол в XZ
    pub min: Vec2,
    /// Максимальный угол в XZ
    pub max: Vec2,
    pub height: f32,
    pub layers: u32,
    /// Trigger volume — лучи проходят насквозь
    pub is_trigger: bool,
}

impl TerrainPatch {
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Self {
        Self {
            min,
            max,
            height,
            layers: SURFACE_LAYER_TERRAIN,
            is_trigger: false,
        }
    }

    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    fn contains_xz(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.z >= self.min.y && point.z <= self.max.y
    }

    /// Distance вдоль луча до top face (только лучи сверху вниз)
    fn intersect(&self, ray: &Ray3d) -> Option<f32> {
        let dir = ray.direction.as_vec3();
        if dir.y >= 0.0 || ray.origin.y < self.height {
            return None;
        }

        let distance = (self.height - ray.origin.y) / dir.y;
        self.contains_xz(ray.get_point(distance)).then_some(distance)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TerrainSurface {
    pub patches: Vec<TerrainPatch>,
}

impl TerrainSurface {
    /// Плоская земля на высоте `height` (практически бесконечная)
    pub fn flat(height: f32) -> Self {
        Self::default().with_patch(TerrainPatch::new(
            Vec2::splat(-FLAT_EXTENT),
            Vec2::splat(FLAT_EXTENT),
            height,
        ))
    }

    pub fn with_patch(mut self, patch: TerrainPatch) -> Self {
        self.patches.push(patch);
        self
    }
}

impl RaySurface for TerrainSurface {
    fn raycast(&self, ray: Ray3d, max_distance: f32, layers: u32) -> Option<Vec3> {
        self.patches
            .iter()
            .filter(|patch| !patch.is_trigger && patch.layers & layers != 0)
            .filter_map(|patch| patch.intersect(&ray))
            .filter(|distance| *distance <= max_distance)
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| ray.get_point(distance))
    }
}

/// Система: ground probe под каждой камерой (TerrainSurface backend)
pub fn sample_ground_on_terrain(
    terrain: Res<TerrainSurface>,
    config: Res<CameraRigConfig>,
    mut samplers: Query<(&Transform, &mut GroundSample)>,
) {
    for (transform, mut sample) in samplers.iter_mut() {
        sample.point = probe_ground(&*terrain, transform.translation, config.probe_depth, config.ground_layers);
    }
}

/// Система: PickRequest → PickResolved (TerrainSurface backend)
pub fn resolve_picks_on_terrain(
    terrain: Res<TerrainSurface>,
    mut requests: EventReader<PickRequest>,
    mut resolved: EventWriter<PickResolved>,
) {
    for request in requests.read() {
        resolved.write(PickResolved {
            point: pick_world(&*terrain, request),
        });
    }
}

/// Headless surface backend
pub struct TerrainSurfacePlugin;

impl Plugin for TerrainSurfacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainSurface>().add_systems(
            Update,
            (sample_ground_on_terrain, resolve_picks_on_terrain).in_set(TacticsSet::Surface),
        );
    }
}
