//! Rapier backend — ray queries по коллайдерам сцены
//!
//! Слои маппятся на Rapier `Group`: луч пускается с memberships = ALL
//! и filter = layers, sensors исключены (trigger volumes не блокируют probe).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::{pick_world, probe_ground, GroundSample, PickRequest, PickResolved, RaySurface};
use crate::config::CameraRigConfig;
use crate::TacticsSet;

/// Collision groups для коллайдера, лежащего на `layers`
pub fn surface_groups(layers: u32) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(layers), Group::ALL)
}

impl RaySurface for RapierContext<'_> {
    fn raycast(&self, ray: Ray3d, max_distance: f32, layers: u32) -> Option<Vec3> {
        let filter = QueryFilter::new()
            .exclude_sensors()
            .groups(CollisionGroups::new(Group::ALL, Group::from_bits_truncate(layers)));

        self.cast_ray(ray.origin, ray.direction.as_vec3(), max_distance, true, filter)
            .map(|(_entity, distance)| ray.get_point(distance))
    }
}

/// Система: ground probe под каждой камерой (Rapier backend)
pub fn sample_ground_with_rapier(
    rapier: ReadRapierContext,
    config: Res<CameraRigConfig>,
    mut samplers: Query<(&Transform, &mut GroundSample)>,
) {
    // Контекст ещё не создан (первый кадр) — земли нет, clamp пропускается
    let Ok(context) = rapier.single() else {
        for (_, mut sample) in samplers.iter_mut() {
            sample.point = None;
        }
        return;
    };

    for (transform, mut sample) in samplers.iter_mut() {
        sample.point = probe_ground(&context, transform.translation, config.probe_depth, config.ground_layers);
    }
}

/// Система: PickRequest → PickResolved (Rapier backend)
pub fn resolve_picks_with_rapier(
    rapier: ReadRapierContext,
    mut requests: EventReader<PickRequest>,
    mut resolved: EventWriter<PickResolved>,
) {
    let context = rapier.single().ok();

    for request in requests.read() {
        let point = context.as_ref().and_then(|context| pick_world(context, request));
        resolved.write(PickResolved { point });
    }
}

/// Surface backend поверх Rapier (клиент добавляет RapierPhysicsPlugin сам)
pub struct RapierSurfacePlugin;

impl Plugin for RapierSurfacePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sample_ground_with_rapier, resolve_picks_with_rapier).in_set(TacticsSet::Surface),
        );
    }
}
