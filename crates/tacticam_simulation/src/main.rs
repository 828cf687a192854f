//! Headless симуляция TACTICAM
//!
//! Скриптованный клик по земле: камера смотрит на точку, pointer в центре
//! экрана, select → юнит идёт к цели → marker гаснет.

use bevy::prelude::*;
use tacticam_simulation::{
    create_headless_app, install_roster, log_error, ActionPhase, ActionValue, CameraRig, ControlScheme,
    InputAction, InputAggregator, NavigationAgent, NavigationEvent, ScreenSize, SelectionMarker,
    StraightLinePathPlugin, TacticsPlugin, TerrainSurface, TerrainSurfacePlugin,
};

const GOAL: Vec3 = Vec3::new(5.0, 0.0, 5.0);

fn main() {
    println!("Starting TACTICAM headless simulation");

    let mut app = create_headless_app();
    app.add_plugins((TacticsPlugin::default(), TerrainSurfacePlugin, StraightLinePathPlugin))
        .insert_resource(TerrainSurface::flat(0.0));

    let unit = app.world_mut().spawn((NavigationAgent::default(), Transform::default())).id();
    if let Err(error) = install_roster(app.world_mut(), vec![unit]) {
        log_error(&format!("Roster setup failed: {}", error));
        return;
    }

    app.world_mut()
        .spawn((CameraRig::default(), Transform::from_xyz(5.0, 20.0, 20.0).looking_at(GOAL, Vec3::Y)));
    app.world_mut().spawn(SelectionMarker::default());

    // Mouse "клик" в центр экрана
    let aggregator = app.world().resource::<InputAggregator>().clone();
    let mouse = aggregator.subscribe(ControlScheme::KeyboardMouse);
    let center = app.world().resource::<ScreenSize>().center();
    mouse.dispatch(InputAction::Cursor, ActionPhase::Performed, ActionValue::Axis2(center));

    app.update();
    mouse.dispatch(InputAction::Select, ActionPhase::Started, ActionValue::Button(true));

    let mut arrival_reader = app.world().resource::<Events<NavigationEvent>>().get_cursor();

    for tick in 0..600 {
        app.update();

        let world = app.world();
        let arrived = arrival_reader
            .read(world.resource::<Events<NavigationEvent>>())
            .any(|event| matches!(event, NavigationEvent::Arrived { .. }));

        if tick % 60 == 0 || arrived {
            let Some(position) = world.get::<Transform>(unit).map(|transform| transform.translation) else {
                break;
            };
            println!("Tick {}: unit at {:.2?}", tick, position);
        }

        if arrived {
            println!("Unit arrived at tick {}", tick);
            break;
        }
    }

    // Дать marker'у догаснуть
    for _ in 0..30 {
        app.update();
    }
    let mut markers = app.world_mut().query::<&SelectionMarker>();
    for marker in markers.iter(app.world()) {
        println!("Marker opacity: {:.2}", marker.opacity);
    }

    println!("Simulation complete!");
}
