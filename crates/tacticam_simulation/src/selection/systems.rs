//! Selection systems: pick → goal, marker show/hide

use bevy::prelude::*;

use super::roster::{Roster, SelectEntity, Selection};
use crate::logger;
use crate::marker::MarkerRequest;
use crate::navigation::{NavigationEvent, SetGoal};
use crate::surface::PickResolved;

/// Система: явная смена selection
///
/// Индекс вне roster'а — ошибка вызывающего, падаем громко.
///
/// # Schedule
/// - Update, TacticsSet::Input
pub fn apply_select_entity(
    mut events: EventReader<SelectEntity>,
    roster: Res<Roster>,
    mut selection: ResMut<Selection>,
) -> Result {
    for event in events.read() {
        if event.index == selection.index() {
            continue;
        }
        let entity = selection.select(&roster, event.index)?;
        logger::log_info(&format!("Selection changed: #{} ({:?})", event.index, entity));
    }
    Ok(())
}

/// Чей goal сейчас отмечен маркером
///
/// Маркер принадлежит entity, которой выдан goal, а не текущему selection:
/// перевыбор во время движения не оставляет маркер висеть.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerOwner(pub Option<Entity>);

/// Система: результат world pick → SetGoal выбранной entity + marker
///
/// Попали — goal + Show в точке. Промах — Hide.
///
/// # Schedule
/// - Update, TacticsSet::Selection
pub fn resolve_goal_from_pick(
    mut picks: EventReader<PickResolved>,
    selection: Res<Selection>,
    mut owner: ResMut<MarkerOwner>,
    mut goals: EventWriter<SetGoal>,
    mut marker: EventWriter<MarkerRequest>,
) {
    for pick in picks.read() {
        match pick.point {
            Some(point) => {
                let entity = selection.entity();
                goals.write(SetGoal { entity, point });
                marker.write(MarkerRequest::Show { at: point });
                owner.0 = Some(entity);
                logger::log_info(&format!("Goal: {:.2?}", point));
            }
            None => {
                marker.write(MarkerRequest::Hide);
                owner.0 = None;
                logger::log("Nothing");
            }
        }
    }
}

/// Система: владелец маркера пришёл (или goal отклонён) → Hide
///
/// # Schedule
/// - Update, TacticsSet::Marker (до apply_marker_requests)
pub fn hide_marker_on_arrival(
    mut events: EventReader<NavigationEvent>,
    mut owner: ResMut<MarkerOwner>,
    mut marker: EventWriter<MarkerRequest>,
) {
    let mut finished = false;
    for event in events.read() {
        match *event {
            NavigationEvent::Arrived { entity } | NavigationEvent::GoalRejected { entity } => {
                finished |= owner.0 == Some(entity);
            }
            NavigationEvent::SetOff { .. } => {}
        }
    }

    if finished {
        marker.write(MarkerRequest::Hide);
        owner.0 = None;
    }
}
