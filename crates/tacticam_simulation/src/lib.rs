//! TACTICAM Simulation Core
//!
//! Point-and-click tactical camera + navigation controller на Bevy 0.16 ECS.
//! Работает headless (без renderer'а): клиент добавляет окно, Rapier
//! и device adapters поверх.
//!
//! # Frame schedule (Update, цепочка TacticsSet)
//!
//! ```text
//! Input → CameraMotion → Surface → CameraHeight → Selection → Navigation → Marker
//! ```

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

// Публичные модули
pub mod camera;
pub mod config;
pub mod input;
pub mod logger;
pub mod marker;
pub mod math;
pub mod navigation;
pub mod selection;
pub mod surface;

// Re-export для удобства
pub use camera::{CameraLens, CameraRig, CameraRigPlugin};
pub use config::{CameraRigConfig, ConfigError, InputConfig, PickConfig};
pub use input::{
    ActionPhase, ActionValue, ControlScheme, InputAction, InputAggregator, InputCommand, InputFusionPlugin,
    InputSubscription, ScreenSize, VirtualPointer,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use marker::{MarkerPlugin, MarkerRequest, SelectionMarker};
pub use navigation::{
    Animator, MotionState, NavigationAgent, NavigationConfig, NavigationEvent, NavigationPlugin, PathAgent,
    PathStatus, SetGoal, StraightLinePathPlugin,
};
pub use selection::{install_roster, MarkerOwner, Roster, SelectEntity, Selection, SelectionError, SelectionPlugin};
pub use surface::{GroundSample, PickRequest, PickResolved, RapierSurfacePlugin, TerrainSurface, TerrainSurfacePlugin};

/// Порядок core систем внутри кадра
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TacticsSet {
    /// Snapshot input, virtual cursor, смена selection
    Input,
    /// Rig шаги 1-3 + PickRequest
    CameraMotion,
    /// Surface backend: GroundSample + PickResolved
    Surface,
    /// Rig шаги 4-5
    CameraHeight,
    /// Pick → SetGoal + marker
    Selection,
    /// FSM tick, locomotion feedback
    Navigation,
    /// Marker requests + fades
    Marker,
}

/// Главный plugin (объединяет все подсистемы).
///
/// Surface backend (Terrain/Rapier) и path backend добавляет composition root.
/// Roster/Selection ставятся через `install_roster` до первого update.
pub struct TacticsPlugin {
    pub camera: CameraRigConfig,
    pub pick: PickConfig,
    pub input: InputConfig,
}

impl Default for TacticsPlugin {
    fn default() -> Self {
        Self {
            camera: CameraRigConfig::default(),
            pick: PickConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl TacticsPlugin {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        self.pick.validate()?;
        self.input.validate()
    }
}

impl Plugin for TacticsPlugin {
    fn build(&self, app: &mut App) {
        // Misconfiguration — падаем сразу, а не тихим no-op в рантайме
        if let Err(error) = self.validate() {
            log_error(&format!("Invalid tactics configuration: {}", error));
            panic!("Invalid tactics configuration: {error}");
        }

        app.configure_sets(
            Update,
            (
                TacticsSet::Input,
                TacticsSet::CameraMotion,
                TacticsSet::Surface,
                TacticsSet::CameraHeight,
                TacticsSet::Selection,
                TacticsSet::Navigation,
                TacticsSet::Marker,
            )
                .chain(),
        )
        .insert_resource(self.camera.clone())
        .insert_resource(self.pick.clone())
        .insert_resource(self.input.clone())
        .add_event::<PickRequest>()
        .add_event::<PickResolved>()
        .add_plugins((
            InputFusionPlugin,
            CameraRigPlugin,
            SelectionPlugin,
            NavigationPlugin,
            MarkerPlugin,
        ));
    }
}

/// Fixed frame step для headless режима (60 FPS)
pub const HEADLESS_FRAME: Duration = Duration::from_nanos(16_666_667);

/// Создаёт minimal Bevy App для headless симуляции.
///
/// Время продвигается ровно на HEADLESS_FRAME за update (детерминизм).
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(HEADLESS_FRAME));

    app
}
