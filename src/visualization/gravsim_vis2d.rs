use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::PrimaryWindow;

use crate::simulation::integrator::rk4_step;
use crate::simulation::scenario::{scatter_bodies, Scenario};
use crate::simulation::states::{Body, NVec2, System};
use crate::visualization::trail::Trails;

#[derive(Component)]
struct BodyIndex(pub usize);

const SCALE: f32 = 120.0;

// Drag-to-launch tuning
const LAUNCH_GAIN: f64 = 1.5; // velocity per world unit of drag
const LAUNCH_MASS: f64 = 1.0; // mass of launched bodies
const SCATTER_COUNT: usize = 16; // bodies placed by the scatter key

/// Viewer-owned control state. The paused flag gates stepping and trail
/// recording in the driving loop, never the derivative math
#[derive(Resource, Default)]
struct SimControl {
    paused: bool,
}

/// Pristine copy of the starting system, for the reset key
#[derive(Resource)]
struct InitialSystem(System);

/// World-space anchor of an in-progress slingshot drag
#[derive(Resource, Default)]
struct DragState(Option<NVec2>);

/// Set whenever the body list changed and circles must be rebuilt
#[derive(Resource, Default)]
struct BodiesDirty(bool);

pub fn run_2d(scenario: Scenario) {
    println!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.system.bodies.len());

    let trails = Trails::new(scenario.system.bodies.len());
    let initial = InitialSystem(scenario.system.clone());

    App::new()
        .insert_resource(scenario)
        .insert_resource(trails)
        .insert_resource(initial)
        .insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.03)))
        .init_resource::<SimControl>()
        .init_resource::<DragState>()
        .init_resource::<BodiesDirty>()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (
                keyboard_control_system,
                drag_launch_system,
                physics_step_system,
                rebuild_bodies_system,
                sync_transforms_system,
                draw_trails_system,
            )
                .chain(),
        )
        .run();
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    for (i, body) in scenario.system.bodies.iter().enumerate() {
        spawn_body_circle(&mut commands, &mut meshes, &mut materials, i, body);
    }
}

fn spawn_body_circle(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    i: usize,
    body: &Body,
) {
    let radius_screen = display_radius(body.m) * SCALE;
    let x = body.x.x as f32 * SCALE;
    let y = body.x.y as f32 * SCALE;

    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
            material: materials.add(ColorMaterial::from(body_color(i))),
            transform: Transform::from_xyz(x, y, 0.0),
            ..Default::default()
        },
        BodyIndex(i),
    ));
}

/// Draw radius from mass: cube-root scaling with a visibility floor
fn display_radius(m: f64) -> f32 {
    (0.04 * m.cbrt() as f32).max(0.02)
}

/// Small fixed palette cycled by body index
fn body_color(i: usize) -> Color {
    match i % 6 {
        0 => Color::srgb(0.95, 0.85, 0.35),
        1 => Color::srgb(0.45, 0.75, 0.95),
        2 => Color::srgb(0.95, 0.45, 0.45),
        3 => Color::srgb(0.55, 0.90, 0.55),
        4 => Color::srgb(0.80, 0.55, 0.95),
        _ => Color::srgb(0.90, 0.90, 0.90),
    }
}

/// Space toggles pause, R resets to the initial bodies, C clears every
/// body, S replaces the bodies with a fresh random scatter
fn keyboard_control_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut control: ResMut<SimControl>,
    mut scenario: ResMut<Scenario>,
    mut trails: ResMut<Trails>,
    mut dirty: ResMut<BodiesDirty>,
    initial: Res<InitialSystem>,
) {
    if keys.just_pressed(KeyCode::Space) {
        control.paused = !control.paused;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        scenario.system = initial.0.clone();
        trails.reset(scenario.system.bodies.len());
        dirty.0 = true;
    }
    if keys.just_pressed(KeyCode::KeyC) {
        // Stepping over the empty list is a no-op, so the sim keeps
        // running and new bodies can be launched into the blank world
        scenario.system.bodies.clear();
        scenario.system.t = 0.0;
        trails.clear();
        dirty.0 = true;
    }
    if keys.just_pressed(KeyCode::KeyS) {
        let seed = fastrand::u64(..);
        scenario.system = System {
            bodies: scatter_bodies(SCATTER_COUNT, seed),
            t: 0.0,
        };
        trails.reset(scenario.system.bodies.len());
        dirty.0 = true;
    }
}

/// Left-drag slingshot: press anchors a new body, the aim line follows
/// the cursor, release launches opposite the drag
fn drag_launch_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut drag: ResMut<DragState>,
    mut scenario: ResMut<Scenario>,
    mut trails: ResMut<Trails>,
    mut dirty: ResMut<BodiesDirty>,
    mut gizmos: Gizmos,
) {
    let cursor = cursor_world_pos(&windows, &cameras);

    if buttons.just_pressed(MouseButton::Left) {
        drag.0 = cursor;
    }

    let Some(anchor) = drag.0 else {
        return;
    };

    if buttons.pressed(MouseButton::Left) {
        if let Some(cur) = cursor {
            let a = Vec2::new(anchor.x as f32, anchor.y as f32) * SCALE;
            let b = Vec2::new(cur.x as f32, cur.y as f32) * SCALE;
            gizmos.line_2d(a, b, Color::srgb(0.9, 0.9, 0.5));
            gizmos.circle_2d(a, display_radius(LAUNCH_MASS) * SCALE, Color::srgb(0.9, 0.9, 0.5));
        }
        return;
    }

    if buttons.just_released(MouseButton::Left) {
        let v = match cursor {
            Some(cur) => (anchor - cur) * LAUNCH_GAIN,
            None => NVec2::zeros(),
        };
        scenario.system.bodies.push(Body {
            x: anchor,
            v,
            m: LAUNCH_MASS,
        });
        trails.push_body();
        dirty.0 = true;
        drag.0 = None;
    }
}

/// Cursor position in simulation (world) units, if inside the window
fn cursor_world_pos(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform)>,
) -> Option<NVec2> {
    let window = windows.get_single().ok()?;
    let (camera, cam_transform) = cameras.get_single().ok()?;
    let screen = window.cursor_position()?;
    let world = camera.viewport_to_world_2d(cam_transform, screen)?;
    Some(NVec2::new((world.x / SCALE) as f64, (world.y / SCALE) as f64))
}

/// Several fixed RK4 sub-steps per frame, each followed by a trail
/// point; never one larger merged step
fn physics_step_system(mut scenario: ResMut<Scenario>, mut trails: ResMut<Trails>, control: Res<SimControl>) {
    if control.paused {
        return;
    }

    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario {
        system,
        parameters,
        forces,
    } = &mut *scenario;

    for _ in 0..parameters.steps_per_frame {
        rk4_step(system, forces, parameters);
        trails.record(system);
    }
}

/// Despawn and respawn the body circles after any body-list edit.
/// N stays in the tens here, so a full rebuild is fine
fn rebuild_bodies_system(
    mut commands: Commands,
    mut dirty: ResMut<BodiesDirty>,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    query: Query<Entity, With<BodyIndex>>,
) {
    if !dirty.0 {
        return;
    }
    for entity in &query {
        commands.entity(entity).despawn();
    }
    for (i, body) in scenario.system.bodies.iter().enumerate() {
        spawn_body_circle(&mut commands, &mut meshes, &mut materials, i, body);
    }
    dirty.0 = false;
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.system.bodies.get(*i) {
            transform.translation.x = (b.x.x as f32) * SCALE;
            transform.translation.y = (b.x.y as f32) * SCALE;
        }
    }
}

fn draw_trails_system(trails: Res<Trails>, mut gizmos: Gizmos) {
    for (i, trail) in trails.iter().enumerate() {
        if trail.len() < 2 {
            continue;
        }
        let color = body_color(i).with_alpha(0.4);
        gizmos.linestrip_2d(
            trail.iter().map(|p| Vec2::new(p.x as f32, p.y as f32) * SCALE),
            color,
        );
    }
}
