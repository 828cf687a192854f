//! Tunable параметры камеры, picking и input
//!
//! Все параметры — числа/флаги (не файлы). Resource'ы с Default,
//! serde derive чтобы клиент мог подгрузить overrides откуда угодно.
//!
//! Инварианты проверяются через `validate()` — misconfiguration
//! должна падать громко, а не превращаться в тихий no-op.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::surface::{SURFACE_MASK_GROUND_PROBE, SURFACE_MASK_PICK};

/// Длительность fade маркера цели (секунды), фиксирована
pub const FADE_DURATION: f32 = 0.35;

/// На сколько выше точки стартует ground probe.
/// Гарантирует что луч начинается над любым правдоподобным рельефом.
pub const GROUND_PROBE_OFFSET: f32 = 100.0;

/// Settle time для run/walk blend (секунды)
pub const RUN_BLEND_SMOOTH_TIME: f32 = 0.7;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be >= {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: f32,
        value: f32,
    },

    #[error("min_height ({min_height}) must not exceed max_height ({max_height})")]
    InvertedHeightBand { min_height: f32, max_height: f32 },

    #[error("probe_depth ({probe_depth}) must cover max_height ({max_height})")]
    ProbeTooShallow { probe_depth: f32, max_height: f32 },

    #[error("{field} layer mask is empty")]
    EmptyLayerMask { field: &'static str },
}

fn at_least(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    // NaN тоже отсекаем (сравнение с NaN всегда false)
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::BelowMinimum { field, min, value })
    }
}

/// Параметры camera rig
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRigConfig {
    /// Базовая скорость планарного движения (units/sec), >= 1
    pub move_speed: f32,
    /// Множитель скорости при зажатом speed modifier, >= 2
    pub shift_speed_factor: f32,
    /// Скорость zoom вдоль forward (units/sec при zoom = 1)
    pub zoom_speed: f32,
    /// Settle time для критически демпфированного подъёма над землёй
    pub smooth_time: f32,
    /// Минимальный clearance над землёй
    pub min_height: f32,
    /// Максимальная высота над anchor (земля или selection), >= 10
    pub max_height: f32,
    /// Максимальная планарная дистанция от selection, >= 10
    pub max_distance: f32,
    /// Глубина ground probe ниже камеры (без учёта GROUND_PROBE_OFFSET)
    pub probe_depth: f32,
    /// Слои, считающиеся землёй
    pub ground_layers: u32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            move_speed: 20.0,
            shift_speed_factor: 2.0,
            zoom_speed: 100.0,
            smooth_time: 0.25,
            min_height: 10.0,
            max_height: 30.0,
            max_distance: 70.0,
            probe_depth: 200.0,
            ground_layers: SURFACE_MASK_GROUND_PROBE,
        }
    }
}

impl CameraRigConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("move_speed", self.move_speed, 1.0)?;
        at_least("shift_speed_factor", self.shift_speed_factor, 2.0)?;
        at_least("zoom_speed", self.zoom_speed, 0.0)?;
        at_least("smooth_time", self.smooth_time, 0.0)?;
        at_least("min_height", self.min_height, 0.0)?;
        at_least("max_height", self.max_height, 10.0)?;
        at_least("max_distance", self.max_distance, 10.0)?;

        if self.min_height > self.max_height {
            return Err(ConfigError::InvertedHeightBand {
                min_height: self.min_height,
                max_height: self.max_height,
            });
        }
        if self.probe_depth < self.max_height {
            return Err(ConfigError::ProbeTooShallow {
                probe_depth: self.probe_depth,
                max_height: self.max_height,
            });
        }
        if self.ground_layers == 0 {
            return Err(ConfigError::EmptyLayerMask { field: "ground_layers" });
        }
        Ok(())
    }

    /// Скорость с учётом speed modifier
    pub fn speed(&self, modifier_held: bool) -> f32 {
        if modifier_held {
            self.move_speed * self.shift_speed_factor
        } else {
            self.move_speed
        }
    }
}

/// Параметры world picking (click-to-move)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickConfig {
    pub max_click_distance: f32,
    pub layers: u32,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            max_click_distance: 100.0,
            layers: SURFACE_MASK_PICK,
        }
    }
}

impl PickConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("max_click_distance", self.max_click_distance, 0.0)?;
        if self.layers == 0 {
            return Err(ConfigError::EmptyLayerMask { field: "pick layers" });
        }
        Ok(())
    }
}

/// Параметры input aggregator
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Скорость virtual cursor в gamepad режиме (pixels/sec при полном отклонении стика)
    pub gamepad_pointer_speed: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            gamepad_pointer_speed: 600.0,
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("gamepad_pointer_speed", self.gamepad_pointer_speed, 0.0)
    }
}
