use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use tacticam_simulation::surface::{surface_groups, SURFACE_LAYER_ACTORS, SURFACE_LAYER_PROPS, SURFACE_LAYER_TERRAIN};
use tacticam_simulation::{install_roster, CameraRig, NavigationAgent, SelectionMarker};

/// Порядок юнита в roster'е (индекс выбора)
#[derive(Component, Debug, Clone, Copy)]
pub struct Controllable(pub usize);

/// Материал decal'а маркера (alpha = opacity)
#[derive(Component)]
pub struct MarkerMaterial(pub Handle<StandardMaterial>);

/// Spawn terrain, props, units, camera rig и маркер
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground (100x100m)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(50.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::default(),
        Collider::cuboid(50.0, 0.1, 50.0),
        surface_groups(SURFACE_LAYER_TERRAIN),
    ));

    // Холм — камера должна подняться над ним
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(16.0, 6.0, 16.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.45, 0.25))),
        Transform::from_xyz(-20.0, 3.0, -15.0),
        Collider::cuboid(8.0, 3.0, 8.0),
        surface_groups(SURFACE_LAYER_TERRAIN),
    ));

    // Prop: кликабелен, но не земля для камеры
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(2.0, 2.0, 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.55, 0.4, 0.25))),
        Transform::from_xyz(8.0, 1.0, -6.0),
        Collider::cuboid(1.0, 1.0, 1.0),
        surface_groups(SURFACE_LAYER_PROPS),
    ));

    // Trigger volume — лучи проходят насквозь
    commands.spawn((
        Transform::from_xyz(0.0, 2.0, 10.0),
        Collider::cuboid(4.0, 2.0, 4.0),
        Sensor,
        surface_groups(SURFACE_LAYER_TERRAIN),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Units (roster order = spawn order)
    let unit_mesh = meshes.add(Capsule3d::new(0.4, 1.2));
    let unit_colors = [Color::srgb(0.8, 0.2, 0.2), Color::srgb(0.2, 0.3, 0.8)];
    for (index, (position, color)) in [Vec3::new(-3.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)]
        .into_iter()
        .zip(unit_colors)
        .enumerate()
    {
        commands.spawn((
            Controllable(index),
            NavigationAgent::default(),
            Transform::from_translation(position),
            Mesh3d(unit_mesh.clone()),
            MeshMaterial3d(materials.add(color)),
            Collider::capsule_y(0.6, 0.4),
            Sensor,
            surface_groups(SURFACE_LAYER_ACTORS),
        ));
    }

    // Camera rig (orientation фиксирована, rig двигает только позицию)
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 20.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
        CameraRig::default(),
    ));

    // Marker decal (child чуть выше земли)
    let marker_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 0.85, 0.2, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands
        .spawn((
            SelectionMarker::default(),
            MarkerMaterial(marker_material.clone()),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(0.6)))),
                MeshMaterial3d(marker_material),
                Transform::from_xyz(0.0, 0.02, 0.0),
            ));
        });
}

/// Roster из Controllable юнитов (exclusive system — после apply commands)
pub fn install_scene_roster(world: &mut World) -> Result {
    let mut query = world.query::<(Entity, &Controllable)>();
    let mut units: Vec<(usize, Entity)> = query.iter(world).map(|(entity, order)| (order.0, entity)).collect();
    units.sort_by_key(|(order, _)| *order);

    install_roster(world, units.into_iter().map(|(_, entity)| entity).collect())?;
    Ok(())
}
