//! Bevy playback of recorded trajectories
//!
//! The universe is run to completion first; this viewer only reads the
//! finished trajectories and replays them, looping at the end. A recorded
//! step lasts `step` seconds of wall clock, clamped so short steps still
//! move and long runs finish within `MAX_REPLAY_SECONDS`

use bevy::prelude::*;
use bevy::math::primitives::{Sphere, Cuboid};

use crate::error::Result;
use crate::simulation::engine::NewtonianUniverse;
use crate::simulation::states::NVec3;

/// Component tagging each sphere with its body index
#[derive(Component)]
struct BodyIndex3(pub usize);

/// Recorded positions in screen units plus playback cursor
#[derive(Resource)]
struct Playback {
    trajectories: Vec<Vec<Vec3>>,
    colors: Vec<Color>,
    frame: usize,
    frames: usize,
    timer: Timer,
}

/// Half-width of the cube the whole run is scaled into
const VIEW_EXTENT: f32 = 500.0;

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 1500.0;

const SPHERE_RADIUS: f32 = 10.0;

/// Fastest per-step rate for short runs, so tiny steps still show motion
const MIN_FRAME_SECONDS: f32 = 1.0 / 120.0;

/// Slowest playback rate for a single recorded step
const MAX_FRAME_SECONDS: f32 = 1.0;

/// Upper bound on one full pass through the recording
const MAX_REPLAY_SECONDS: f32 = 20.0;

/// Open a window replaying every trajectory of a completed run
pub fn run_3d(universe: &NewtonianUniverse) -> Result<()> {
    let trajectories = universe.trajectories()?;
    let scale = view_scale(&trajectories);

    let screen: Vec<Vec<Vec3>> = trajectories
        .iter()
        .map(|traj| traj.iter().map(|p| to_screen(p, scale)).collect())
        .collect();
    let frames = screen.iter().map(Vec::len).min().unwrap_or(0);
    let colors = universe.bodies().iter().map(|b| label_color(&b.label)).collect();

    let frame_seconds = frame_seconds(universe.step(), frames);

    log::info!(
        "run_3d: replaying {} bodies over {} frames at {:.3}s/frame (scale {:.3e})",
        screen.len(),
        frames,
        frame_seconds,
        scale
    );

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.0, 0.0, 0.0)))
        .insert_resource(Playback {
            trajectories: screen,
            colors,
            frame: 0,
            frames,
            timer: Timer::from_seconds(frame_seconds, TimerMode::Repeating),
        })
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (advance_playback, sync_transforms_3d, draw_trails).chain())
        .run();

    Ok(())
}

/// Wall-clock seconds per recorded step
fn frame_seconds(step: f64, frames: usize) -> f32 {
    let per_step = (step as f32).clamp(MIN_FRAME_SECONDS, MAX_FRAME_SECONDS);
    if frames == 0 {
        return per_step;
    }
    // may drop below MIN_FRAME_SECONDS; the timer then advances several frames per tick
    per_step.min(MAX_REPLAY_SECONDS / frames as f32)
}

/// World units -> screen units so the largest coordinate lands on VIEW_EXTENT
fn view_scale(trajectories: &[&[NVec3]]) -> f32 {
    let max_abs = trajectories
        .iter()
        .flat_map(|t| t.iter())
        .map(|p| p.amax())
        .fold(0.0_f64, f64::max);

    if max_abs > 0.0 {
        (VIEW_EXTENT as f64 / max_abs) as f32
    } else {
        1.0
    }
}

fn to_screen(p: &NVec3, scale: f32) -> Vec3 {
    Vec3::new(p.x as f32 * scale, p.y as f32 * scale, p.z as f32 * scale)
}

/// matplotlib single-letter colours; black is drawn grey on the black background
fn label_color(label: &str) -> Color {
    match label {
        "r" => Color::srgb(1.0, 0.2, 0.2),
        "g" => Color::srgb(0.2, 1.0, 0.2),
        "b" => Color::srgb(0.3, 0.5, 1.0),
        "c" => Color::srgb(0.0, 1.0, 1.0),
        "m" => Color::srgb(1.0, 0.0, 1.0),
        "y" => Color::srgb(1.0, 1.0, 0.0),
        "k" => Color::srgb(0.6, 0.6, 0.6),
        _ => Color::srgb(1.0, 1.0, 1.0),
    }
}

/// Startup system: spawn camera, light, axes and one sphere per body
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    playback: Res<Playback>,
) {
    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(200.0, 150.0, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 1000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(100.0, 100.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    for (i, traj) in playback.trajectories.iter().enumerate() {
        let start = traj.first().copied().unwrap_or(Vec3::ZERO);

        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(SPHERE_RADIUS).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: playback.colors[i],
                    unlit: true,
                    ..Default::default()
                }),
                transform: Transform::from_translation(start),
                ..Default::default()
            },
            BodyIndex3(i),
        ));
    }
}

fn advance_playback(time: Res<Time>, mut playback: ResMut<Playback>) {
    if playback.frames == 0 {
        return;
    }
    playback.timer.tick(time.delta());
    let ticks = playback.timer.times_finished_this_tick() as usize;
    playback.frame = (playback.frame + ticks) % playback.frames;
}

fn sync_transforms_3d(playback: Res<Playback>, mut query: Query<(&BodyIndex3, &mut Transform)>) {
    for (BodyIndex3(i), mut transform) in &mut query {
        if let Some(p) = playback.trajectories.get(*i).and_then(|t| t.get(playback.frame)) {
            transform.translation = *p;
        }
    }
}

fn draw_trails(playback: Res<Playback>, mut gizmos: Gizmos) {
    for (traj, color) in playback.trajectories.iter().zip(playback.colors.iter()) {
        gizmos.linestrip(traj.iter().take(playback.frame + 1).copied(), *color);
    }
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 2.0 * VIEW_EXTENT;
    let axis_thickness = 0.5;

    let axes = [
        (Vec3::new(axis_len, axis_thickness, axis_thickness), Color::srgb(1.0, 0.0, 0.0)), // x
        (Vec3::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.0, 1.0, 0.0)), // y
        (Vec3::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.0, 0.0, 1.0)), // z
    ];

    // Cuboids are centred on their transform, so each crosses the origin
    for (size, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(size.x, size.y, size.z).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }
}
