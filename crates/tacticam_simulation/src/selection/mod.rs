//! Selection domain — roster управляемых entities и click-to-move
//!
//! # Flow
//!
//! ```text
//! PickResolved (Surface set)
//!     ↓ resolve_goal_from_pick
//! SetGoal → NavigationAgent   +   MarkerRequest::Show / Hide
//!
//! NavigationEvent::Arrived / GoalRejected (entity, чей goal на маркере)
//!     ↓ hide_marker_on_arrival
//! MarkerRequest::Hide
//! ```
//!
//! Roster и Selection ставит composition root (`install_roster`).
//! Без них camera/selection системы падают — это ошибка конфигурации.

pub mod roster;
pub mod systems;

#[cfg(test)]
mod selection_tests;

pub use roster::*;
pub use systems::*;

use bevy::prelude::*;

use crate::marker::apply_marker_requests;
use crate::TacticsSet;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SelectEntity>()
            .init_resource::<MarkerOwner>()
            .add_systems(Update, apply_select_entity.in_set(TacticsSet::Input))
            .add_systems(Update, resolve_goal_from_pick.in_set(TacticsSet::Selection))
            .add_systems(
                Update,
                hide_marker_on_arrival
                    .in_set(TacticsSet::Marker)
                    .before(apply_marker_requests),
            );
    }
}
