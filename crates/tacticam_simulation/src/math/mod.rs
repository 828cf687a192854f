//! Math helpers — settle-time smoothing и планарная геометрия

pub mod smoothing;

pub use smoothing::{smooth_damp, smooth_damp_vec3};

use bevy::prelude::*;

/// Проекция на горизонтальную плоскость (XZ), Y = 0
#[inline]
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Планарная дистанция между точками (высота игнорируется)
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a - b).length()
}
