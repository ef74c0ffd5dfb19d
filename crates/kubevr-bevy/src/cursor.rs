//! Vive cursor — a laser-pointer cursor for tracked controllers.
//!
//! Inserting [`ViveCursor`] on a controller entity attaches a thin beam mesh,
//! narrows the controller's [`Raycaster`] so the beam and controller model are
//! not hit, and starts turning [`CursorInput`] into cursor entity events
//! (`CursorEnter`, `CursorClick`, ...) triggered on both the controller and
//! the entity under the beam.
//!
//! Insert [`CursorPaused`] to stop reacting to input; remove it to resume.
//! Removing `ViveCursor` undoes the attach.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use kubevr_core::{CursorColor, CursorEventKind, CursorMachine, Emission, ObjectFilter};

use crate::events::{CursorInput, CursorInputKind, RenderSurfaceReady, trigger_cursor_event};
use crate::raycast::{Raycaster, RaycasterHits};

/// Minimum ray distance, so the beam never intersects itself.
const DEFAULT_NEAR: f32 = 0.03;
const DEFAULT_RADIUS: f32 = 0.001;
const DEFAULT_BEAM_LENGTH: f32 = 1000.0;

/// Cursor configuration. Read once when the cursor attaches.
#[derive(Component, Debug, Clone)]
pub struct ViveCursor {
    pub color: CursorColor,
    pub radius: f32,
    /// Object filter, e.g. `".pod"`. Empty targets everything.
    pub objects: String,
    pub beam_length: f32,
    pub near: f32,
}

impl Default for ViveCursor {
    fn default() -> Self {
        Self {
            color: CursorColor::DEFAULT,
            radius: DEFAULT_RADIUS,
            objects: String::new(),
            beam_length: DEFAULT_BEAM_LENGTH,
            near: DEFAULT_NEAR,
        }
    }
}

impl ViveCursor {
    pub fn with_objects(mut self, objects: impl Into<String>) -> Self {
        self.objects = objects.into();
        self
    }

    pub fn with_color(mut self, color: CursorColor) -> Self {
        self.color = color;
        self
    }

    fn raycaster(&self) -> Raycaster {
        let filter = ObjectFilter::parse(&self.objects).unwrap_or_else(|e| {
            tracing::warn!("Cursor object filter rejected, targeting everything: {e}");
            ObjectFilter::any()
        });
        Raycaster {
            near: self.near,
            far: self.beam_length,
            filter,
        }
    }
}

/// Interaction state of an attached cursor.
#[derive(Component, Debug, Default)]
pub struct CursorState {
    machine: CursorMachine<Entity>,
    beam: Option<Entity>,
}

impl CursorState {
    /// Entity currently under the beam.
    pub fn intersected(&self) -> Option<Entity> {
        self.machine.intersected()
    }

    /// Entity that was under the beam at the last trigger press.
    pub fn mouse_down(&self) -> Option<Entity> {
        self.machine.mouse_down()
    }

    pub fn beam(&self) -> Option<Entity> {
        self.beam
    }
}

/// Cursor ignores input while present.
#[derive(Component, Debug, Default)]
pub struct CursorPaused;

/// State tag: this controller's cursor is over something.
#[derive(Component, Debug, Default)]
pub struct Hovering;

/// State tag: one or more cursors are over this entity.
///
/// Removed when the last of them leaves.
#[derive(Component, Debug, Default)]
pub struct Hovered(Vec<Entity>);

impl Hovered {
    /// Cursors currently over this entity.
    pub fn cursors(&self) -> &[Entity] {
        &self.0
    }
}

/// Add `cursor` to the target's [`Hovered`] set.
fn hover(cursor: Entity) -> impl FnOnce(EntityWorldMut) + Send + 'static {
    move |mut target: EntityWorldMut| match target.get_mut::<Hovered>() {
        Some(mut hovered) => {
            if !hovered.0.contains(&cursor) {
                hovered.0.push(cursor);
            }
        }
        None => {
            target.insert(Hovered(vec![cursor]));
        }
    }
}

/// Drop `cursor` from the target's [`Hovered`] set.
fn unhover(cursor: Entity) -> impl FnOnce(EntityWorldMut) + Send + 'static {
    move |mut target: EntityWorldMut| {
        let now_empty = match target.get_mut::<Hovered>() {
            Some(mut hovered) => {
                hovered.0.retain(|c| *c != cursor);
                hovered.0.is_empty()
            }
            None => false,
        };
        if now_empty {
            target.remove::<Hovered>();
        }
    }
}

/// The beam mesh child of a cursor.
#[derive(Component, Debug, Default)]
pub struct CursorBeam;

/// Cursor attached before mesh storage existed; waits for [`RenderSurfaceReady`].
#[derive(Component, Debug, Default)]
pub struct AwaitingSurface;

/// Registers the vive cursor component, its messages, and input processing.
pub struct CursorPlugin;

impl Plugin for CursorPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CursorInput>()
            .add_message::<RenderSurfaceReady>()
            .add_observer(on_cursor_added)
            .add_observer(on_cursor_removed)
            .add_systems(
                Update,
                (
                    announce_render_surface,
                    attach_awaiting_cursors,
                    process_cursor_input,
                )
                    .chain(),
            );
    }
}

fn on_cursor_added(
    add: On<Add, ViveCursor>,
    cursors: Query<&ViveCursor>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut commands: Commands,
) {
    let entity = add.entity;
    let Ok(cursor) = cursors.get(entity) else {
        return;
    };

    let mut state = CursorState::default();
    match (meshes, materials) {
        (Some(mut meshes), Some(mut materials)) => {
            state.beam = Some(spawn_beam(
                &mut commands,
                entity,
                cursor,
                &mut meshes,
                &mut materials,
            ));
        }
        _ => {
            tracing::debug!("Cursor {entity} attached before render surface, deferring beam");
            commands.entity(entity).insert(AwaitingSurface);
        }
    }

    commands.entity(entity).insert((state, cursor.raycaster()));
    tracing::info!("Vive cursor attached to {entity} (objects: {:?})", cursor.objects);
}

fn on_cursor_removed(
    remove: On<Remove, ViveCursor>,
    states: Query<&CursorState>,
    mut commands: Commands,
) {
    let entity = remove.entity;
    if let Ok(state) = states.get(entity) {
        if let Some(beam) = state.beam
            && let Ok(mut beam) = commands.get_entity(beam)
        {
            beam.try_despawn();
        }
        if let Some(target) = state.intersected() {
            dispatch(
                &mut commands,
                entity,
                Emission {
                    kind: CursorEventKind::Leave,
                    target: Some(target),
                },
            );
        }
    }
    if let Ok(mut cursor) = commands.get_entity(entity) {
        cursor.try_remove::<(
            CursorState,
            Raycaster,
            RaycasterHits,
            Hovering,
            AwaitingSurface,
        )>();
    }
    tracing::info!("Vive cursor detached from {entity}");
}

/// Beam: a long thin cylinder starting at the controller tip and pointing
/// along its forward (-Z) axis.
fn spawn_beam(
    commands: &mut Commands,
    parent: Entity,
    cursor: &ViveCursor,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let CursorColor { r, g, b } = cursor.color;
    let mesh = meshes.add(Cylinder::new(cursor.radius, cursor.beam_length));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        unlit: true,
        ..default()
    });
    commands
        .spawn((
            CursorBeam,
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, 0.0, -cursor.beam_length / 2.0)
                .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            ChildOf(parent),
        ))
        .id()
}

/// Fire [`RenderSurfaceReady`] the first frame mesh and material storage exist.
fn announce_render_surface(
    meshes: Option<Res<Assets<Mesh>>>,
    materials: Option<Res<Assets<StandardMaterial>>>,
    mut announced: Local<bool>,
    mut ready: MessageWriter<RenderSurfaceReady>,
) {
    if *announced || meshes.is_none() || materials.is_none() {
        return;
    }
    *announced = true;
    ready.write(RenderSurfaceReady);
}

fn attach_awaiting_cursors(
    mut ready: MessageReader<RenderSurfaceReady>,
    mut awaiting: Query<(Entity, &ViveCursor, &mut CursorState), With<AwaitingSurface>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut commands: Commands,
) {
    if ready.is_empty() {
        return;
    }
    ready.clear();

    let (Some(mut meshes), Some(mut materials)) = (meshes, materials) else {
        return;
    };
    for (entity, cursor, mut state) in &mut awaiting {
        if state.beam.is_none() {
            state.beam = Some(spawn_beam(
                &mut commands,
                entity,
                cursor,
                &mut meshes,
                &mut materials,
            ));
        }
        commands.entity(entity).remove::<AwaitingSurface>();
        tracing::debug!("Cursor {entity} beam attached after render surface became ready");
    }
}

/// Run cursor input through each cursor's state machine and dispatch the
/// resulting events. Paused cursors drop their input.
pub fn process_cursor_input(
    mut inputs: MessageReader<CursorInput>,
    mut cursors: Query<&mut CursorState, Without<CursorPaused>>,
    mut commands: Commands,
) {
    for input in inputs.read() {
        let Ok(mut state) = cursors.get_mut(input.cursor) else {
            continue;
        };
        let machine = &mut state.machine;
        let emissions = match &input.kind {
            CursorInputKind::Intersection(candidates) => machine.intersection(candidates),
            CursorInputKind::IntersectionCleared(target) => machine.intersection_cleared(*target),
            CursorInputKind::TriggerDown => machine.trigger_down(),
            CursorInputKind::TriggerUp => machine.trigger_up(),
            CursorInputKind::GripDown => machine.grip_pressed(),
            CursorInputKind::GripUp => machine.grip_released(),
        };
        for emission in emissions {
            dispatch(&mut commands, input.cursor, emission);
        }
    }
}

/// Update state tags, then emit on the controller and the target.
fn dispatch(commands: &mut Commands, cursor: Entity, emission: Emission<Entity>) {
    let Emission { kind, target } = emission;
    let live_target = target.filter(|t| commands.get_entity(*t).is_ok());

    match kind {
        CursorEventKind::Enter => {
            commands.entity(cursor).try_insert(Hovering);
            if let Some(t) = live_target {
                commands.entity(t).queue_silenced(hover(cursor));
            }
        }
        CursorEventKind::Leave => {
            commands.entity(cursor).try_remove::<Hovering>();
            if let Some(t) = live_target {
                commands.entity(t).queue_silenced(unhover(cursor));
            }
        }
        _ => {}
    }
    tracing::debug!("cursor {cursor}: {kind:?} target={target:?}");

    trigger_cursor_event(commands, kind, cursor, cursor, target);
    if let Some(t) = live_target {
        trigger_cursor_event(commands, kind, t, cursor, target);
    }
}
