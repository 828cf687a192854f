//! Navigation domain — goal → path-follow → animated locomotion
//!
//! # Архитектура
//!
//! ```text
//! SetGoal (Selection set)
//!     ↓ apply_set_goals
//! PathAgent.destination + call
//!     ↓ path backend (opaque: straight_line / внешний)
//! motion_state_tick (Idle ↔ Moving)
//!     ↓ NavigationEvent (SetOff / Arrived / GoalRejected)
//! locomotion_feedback + gait_blend (только Moving)
//! ```

pub mod components;
pub mod events;
pub mod fsm;
pub mod straight_line;


pub use components::*;
pub use events::*;
pub use fsm::{
    apply_set_goals, gait_blend, init_agents, locomotion_feedback, motion_state_tick, tick, Transition,
};
pub use straight_line::StraightLinePathPlugin;

use bevy::prelude::*;

use crate::TacticsSet;

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<NavigationAgent>()
            .register_type::<PathAgent>()
            .register_type::<Animator>()
            .add_event::<SetGoal>()
            .add_event::<NavigationEvent>()
            .add_systems(
                Update,
                (init_agents, apply_set_goals, motion_state_tick, locomotion_feedback, gait_blend)
                    .chain()
                    .in_set(TacticsSet::Navigation),
            );
    }
}
