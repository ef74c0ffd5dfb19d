//! Headless tests for the controller raycaster against real cuboid meshes.
//!
//! No transform propagation or visibility systems run here, so every target
//! is spawned with its `GlobalTransform`, `Aabb` and `InheritedVisibility`
//! already filled in, plus a never-set (hidden) `ViewVisibility`, which the
//! mesh ray cast query requires to be present.

use bevy::camera::primitives::Aabb;
use bevy::camera::visibility::{InheritedVisibility, ViewVisibility};
use bevy::prelude::*;
use kubevr_bevy::cursor::CursorBeam;
use kubevr_bevy::events::{CursorClick, CursorInput, CursorInputKind};
use kubevr_bevy::kubevr_core::ObjectFilter;
use kubevr_bevy::{
    Classes, ControllerRaycastPlugin, CursorPaused, CursorPlugin, CursorState, Hovered, Raycaster,
    RaycasterHits, ViveCursor,
};

#[derive(Resource, Default)]
struct Recorded(Vec<CursorInput>);

fn record_inputs(mut inputs: MessageReader<CursorInput>, mut recorded: ResMut<Recorded>) {
    recorded.0.extend(inputs.read().cloned());
}

struct Harness {
    app: App,
    cube: Handle<Mesh>,
}

impl Harness {
    fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Recorded>()
            .add_plugins(ControllerRaycastPlugin)
            .add_systems(Update, record_inputs);
        let cube = app
            .world_mut()
            .resource_mut::<Assets<Mesh>>()
            .add(Cuboid::new(1.0, 1.0, 1.0));
        Self { app, cube }
    }

    /// A raycaster at the origin looking down -Z.
    fn caster(&mut self, raycaster: Raycaster) -> Entity {
        self.app
            .world_mut()
            .spawn((raycaster, GlobalTransform::IDENTITY))
            .id()
    }

    /// A unit cube centred on the ray at depth `z`; its front face is at `z + 0.5`.
    fn cube_at(&mut self, z: f32, extra: impl Bundle) -> Entity {
        self.app
            .world_mut()
            .spawn((
                Mesh3d(self.cube.clone()),
                GlobalTransform::from_xyz(0.0, 0.0, z),
                Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5)),
                InheritedVisibility::VISIBLE,
                ViewVisibility::default(),
                extra,
            ))
            .id()
    }

    fn move_off_ray(&mut self, entity: Entity) {
        self.app
            .world_mut()
            .entity_mut(entity)
            .insert(GlobalTransform::from_xyz(20.0, 0.0, -5.0));
    }

    /// Run one frame and return the inputs it produced.
    fn step(&mut self) -> Vec<CursorInputKind> {
        self.app.update();
        std::mem::take(&mut self.app.world_mut().resource_mut::<Recorded>().0)
            .into_iter()
            .map(|input| input.kind)
            .collect()
    }
}

fn filtered(filter: &str) -> Raycaster {
    Raycaster {
        filter: ObjectFilter::parse(filter).unwrap(),
        ..Raycaster::default()
    }
}

#[test]
fn test_hits_are_reported_nearest_first() {
    let mut h = Harness::new();
    let caster = h.caster(Raycaster::default());
    let far = h.cube_at(-8.0, ());
    let near = h.cube_at(-4.0, ());

    assert_eq!(h.step(), [CursorInputKind::Intersection(vec![near, far])]);
    assert_eq!(
        h.app.world().get::<RaycasterHits>(caster).unwrap().entities(),
        [near, far]
    );

    // Nothing changed, nothing reported.
    assert!(h.step().is_empty());
}

#[test]
fn test_near_and_far_bound_the_hits() {
    let mut h = Harness::new();
    h.caster(Raycaster {
        near: 5.0,
        far: 9.0,
        ..Raycaster::default()
    });
    let _too_close = h.cube_at(-5.0, ());
    let inside = h.cube_at(-8.0, ());
    let _too_far = h.cube_at(-12.0, ());

    assert_eq!(h.step(), [CursorInputKind::Intersection(vec![inside])]);
}

#[test]
fn test_beams_are_never_hit() {
    let mut h = Harness::new();
    h.caster(Raycaster::default());
    let _beam = h.cube_at(-2.0, CursorBeam);
    let target = h.cube_at(-6.0, ());

    assert_eq!(h.step(), [CursorInputKind::Intersection(vec![target])]);
}

#[test]
fn test_filter_matches_classes_and_names() {
    let mut h = Harness::new();
    h.caster(filtered(".pod, #floor"));
    let _plain = h.cube_at(-2.0, ());
    let pod = h.cube_at(-4.0, Classes::new(["pod"]));
    let _other_class = h.cube_at(-6.0, Classes::new(["wall"]));
    let floor = h.cube_at(-8.0, Name::new("floor"));

    assert_eq!(h.step(), [CursorInputKind::Intersection(vec![pod, floor])]);
}

#[test]
fn test_clears_come_before_new_intersection() {
    let mut h = Harness::new();
    h.caster(Raycaster::default());
    let a = h.cube_at(-4.0, ());
    h.step();

    h.move_off_ray(a);
    let b = h.cube_at(-6.0, ());

    assert_eq!(
        h.step(),
        [
            CursorInputKind::IntersectionCleared(a),
            CursorInputKind::Intersection(vec![b]),
        ]
    );
}

#[test]
fn test_losing_every_hit_only_clears() {
    let mut h = Harness::new();
    h.caster(Raycaster::default());
    let a = h.cube_at(-4.0, ());
    h.step();

    h.move_off_ray(a);
    assert_eq!(h.step(), [CursorInputKind::IntersectionCleared(a)]);
}

#[test]
fn test_paused_raycaster_reports_changes_after_resume() {
    let mut h = Harness::new();
    let caster = h.caster(Raycaster::default());
    let a = h.cube_at(-4.0, ());
    h.step();

    h.app.world_mut().entity_mut(caster).insert(CursorPaused);
    h.move_off_ray(a);
    assert!(h.step().is_empty());
    assert_eq!(
        h.app.world().get::<RaycasterHits>(caster).unwrap().entities(),
        [a]
    );

    h.app.world_mut().entity_mut(caster).remove::<CursorPaused>();
    assert_eq!(h.step(), [CursorInputKind::IntersectionCleared(a)]);
}

#[derive(Resource, Default)]
struct Clicks(Vec<Entity>);

#[test]
fn test_pause_while_hovering_does_not_leave_stale_hover() {
    let mut h = Harness::new();
    h.app
        .init_resource::<Assets<StandardMaterial>>()
        .init_resource::<Clicks>()
        .add_plugins(CursorPlugin)
        .add_observer(|click: On<CursorClick>, mut clicks: ResMut<Clicks>| {
            clicks.0.push(click.entity);
        });
    let cursor = h
        .app
        .world_mut()
        .spawn((ViveCursor::default().with_objects(".pod"), GlobalTransform::IDENTITY))
        .id();
    let a = h.cube_at(-5.0, Classes::new(["pod"]));
    h.step();
    assert!(h.app.world().entity(a).contains::<Hovered>());

    // Beam swings off the pod while the cursor is paused.
    h.app.world_mut().entity_mut(cursor).insert(CursorPaused);
    h.move_off_ray(a);
    h.step();
    h.app.world_mut().entity_mut(cursor).remove::<CursorPaused>();
    h.step();

    let state = h.app.world().get::<CursorState>(cursor).unwrap();
    assert_eq!(state.intersected(), None);
    assert!(!h.app.world().entity(a).contains::<Hovered>());

    // Pressing at empty space must not click the old pod.
    h.app
        .world_mut()
        .write_message(CursorInput::new(cursor, CursorInputKind::TriggerDown));
    h.app
        .world_mut()
        .write_message(CursorInput::new(cursor, CursorInputKind::TriggerUp));
    h.step();
    assert!(!h.app.world().resource::<Clicks>().0.contains(&a));
}
