//! Static scene: camera, lights, floor, and the desktop controller.

use bevy::prelude::*;
use kubevr_bevy::{Classes, ViveCursor};

use crate::config::AppConfig;

const FLOOR_SIZE: f32 = 50.0;

/// The controller entity driven by the mouse on desktop.
#[derive(Component, Debug, Default)]
pub struct DesktopController;

/// Spawns the static scene.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_camera, spawn_floor, spawn_controller));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 14.0, 38.0).looking_at(Vec3::new(0.0, 4.0, 0.0), Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 30.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// 50x50 static floor at the origin.
fn spawn_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("floor"),
        Classes::new(["floor"]),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.35, 0.38),
            metallic: 0.8,
            perceptual_roughness: 0.6,
            ..default()
        })),
        Transform::default(),
    ));
}

fn spawn_controller(mut commands: Commands, config: Res<AppConfig>) {
    commands.spawn((
        Name::new("controller"),
        DesktopController,
        ViveCursor::default()
            .with_color(config.cursor_color)
            .with_objects(config.cursor_objects.clone()),
        Transform::default(),
        Visibility::default(),
    ));
}
