//! Tests for roster/selection и pick → goal flow

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::roster::{install_roster, Roster, Selection, SelectionError};
    use super::super::systems::{hide_marker_on_arrival, resolve_goal_from_pick, MarkerOwner};
    use crate::marker::MarkerRequest;
    use crate::navigation::{NavigationEvent, SetGoal};
    use crate::surface::PickResolved;

    fn entities(world: &mut World, count: usize) -> Vec<Entity> {
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    fn pick_app() -> App {
        let mut app = App::new();
        app.add_event::<PickResolved>()
            .add_event::<SetGoal>()
            .add_event::<MarkerRequest>()
            .add_event::<NavigationEvent>()
            .init_resource::<MarkerOwner>()
            .add_systems(Update, (resolve_goal_from_pick, hide_marker_on_arrival));
        app
    }

    fn marker_requests(app: &App) -> Vec<MarkerRequest> {
        app.world()
            .resource::<Events<MarkerRequest>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert_eq!(Roster::new(Vec::new()), Err(SelectionError::EmptyRoster));
    }

    #[test]
    fn test_selection_defaults_to_first() {
        let mut world = World::new();
        let units = entities(&mut world, 3);

        let selection = install_roster(&mut world, units.clone()).expect("roster is not empty");
        assert_eq!(selection.entity(), units[0]);
        assert_eq!(selection.index(), 0);
        assert_eq!(*world.resource::<Selection>(), selection);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut world = World::new();
        let units = entities(&mut world, 2);
        let roster = Roster::new(units.clone()).expect("roster is not empty");
        let mut selection = Selection::first(&roster).expect("roster is not empty");

        assert_eq!(selection.select(&roster, 1), Ok(units[1]));
        assert_eq!(
            selection.select(&roster, 5),
            Err(SelectionError::IndexOutOfRange { index: 5, len: 2 })
        );
        // Неудачный выбор не меняет selection
        assert_eq!(selection.entity(), units[1]);
    }

    #[test]
    fn test_pick_hit_sets_goal_and_shows_marker() {
        let mut app = pick_app();
        let units = entities(app.world_mut(), 2);
        install_roster(app.world_mut(), units.clone()).expect("roster is not empty");

        let point = Vec3::new(5.0, 0.0, 5.0);
        app.world_mut().send_event(PickResolved { point: Some(point) });
        app.update();

        let goals: Vec<SetGoal> = app
            .world()
            .resource::<Events<SetGoal>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(goals, vec![SetGoal { entity: units[0], point }]);
        assert_eq!(marker_requests(&app), vec![MarkerRequest::Show { at: point }]);
    }

    #[test]
    fn test_pick_miss_hides_marker() {
        let mut app = pick_app();
        let units = entities(app.world_mut(), 1);
        install_roster(app.world_mut(), units).expect("roster is not empty");

        app.world_mut().send_event(PickResolved { point: None });
        app.update();

        assert!(app.world().resource::<Events<SetGoal>>().is_empty());
        assert_eq!(marker_requests(&app), vec![MarkerRequest::Hide]);
    }

    #[test]
    fn test_only_owner_arrival_hides_marker() {
        let mut app = pick_app();
        let units = entities(app.world_mut(), 2);
        install_roster(app.world_mut(), units.clone()).expect("roster is not empty");

        // Без выданного goal'а прибытие ничего не прячет
        app.world_mut().send_event(NavigationEvent::Arrived { entity: units[0] });
        app.update();
        assert!(marker_requests(&app).is_empty());

        app.world_mut().send_event(PickResolved {
            point: Some(Vec3::new(5.0, 0.0, 5.0)),
        });
        app.update();
        assert_eq!(*app.world().resource::<MarkerOwner>(), MarkerOwner(Some(units[0])));

        // Другой юнит пришёл — маркер чужой
        app.world_mut().send_event(NavigationEvent::Arrived { entity: units[1] });
        app.update();
        assert!(marker_requests(&app).is_empty());

        app.world_mut().send_event(NavigationEvent::GoalRejected { entity: units[0] });
        app.update();
        assert_eq!(marker_requests(&app), vec![MarkerRequest::Hide]);
        assert_eq!(*app.world().resource::<MarkerOwner>(), MarkerOwner(None));
    }

    #[test]
    fn test_owner_arrival_hides_marker_after_reselect() {
        let mut app = pick_app();
        let units = entities(app.world_mut(), 2);
        install_roster(app.world_mut(), units.clone()).expect("roster is not empty");

        app.world_mut().send_event(PickResolved {
            point: Some(Vec3::new(5.0, 0.0, 5.0)),
        });
        app.update();

        // Перевыбор пока первый юнит в пути
        let roster = app.world().resource::<Roster>().clone();
        app.world_mut()
            .resource_mut::<Selection>()
            .select(&roster, 1)
            .expect("index in range");

        app.world_mut().send_event(NavigationEvent::Arrived { entity: units[0] });
        app.update();
        assert_eq!(marker_requests(&app), vec![MarkerRequest::Hide]);
    }
}
