//! Desktop input — the mouse stands in for a tracked controller.
//!
//! The controller sits just below the camera and aims at whatever is under
//! the mouse. Left button is the trigger, right button is the grip.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use kubevr_bevy::cursor::process_cursor_input;
use kubevr_bevy::events::{CursorInput, CursorInputKind};

use crate::scene::DesktopController;

/// Controller offset from the camera, so the beam is visible.
const CONTROLLER_OFFSET: Vec3 = Vec3::new(0.4, -0.6, 0.0);
/// Distance along the mouse ray the controller aims at.
const AIM_DISTANCE: f32 = 40.0;

/// Registers desktop controller systems.
pub struct DesktopInputPlugin;

impl Plugin for DesktopInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (aim_controller, map_mouse_buttons).before(process_cursor_input),
        );
    }
}

/// Point the controller at the world position under the mouse.
fn aim_controller(
    window: Single<&Window, With<PrimaryWindow>>,
    camera: Single<(&Camera, &GlobalTransform)>,
    mut controllers: Query<&mut Transform, With<DesktopController>>,
) {
    let Some(position) = window.cursor_position() else {
        return;
    };
    let (camera, camera_transform) = *camera;
    let Ok(ray) = camera.viewport_to_world(camera_transform, position) else {
        return;
    };

    let origin = camera_transform.transform_point(CONTROLLER_OFFSET);
    let aim = ray.get_point(AIM_DISTANCE);
    for mut transform in &mut controllers {
        *transform = Transform::from_translation(origin).looking_at(aim, Vec3::Y);
    }
}

/// Translate mouse buttons into trigger and grip input.
fn map_mouse_buttons(
    buttons: Res<ButtonInput<MouseButton>>,
    controllers: Query<Entity, With<DesktopController>>,
    mut input: MessageWriter<CursorInput>,
) {
    let mut pending = Vec::new();
    if buttons.just_pressed(MouseButton::Left) {
        pending.push(CursorInputKind::TriggerDown);
    }
    if buttons.just_released(MouseButton::Left) {
        pending.push(CursorInputKind::TriggerUp);
    }
    if buttons.just_pressed(MouseButton::Right) {
        pending.push(CursorInputKind::GripDown);
    }
    if buttons.just_released(MouseButton::Right) {
        pending.push(CursorInputKind::GripUp);
    }
    if pending.is_empty() {
        return;
    }

    for controller in &controllers {
        for kind in &pending {
            input.write(CursorInput::new(controller, kind.clone()));
        }
    }
}
