//! Controller raycaster built on Bevy mesh ray casting.
//!
//! Every frame each [`Raycaster`] casts along its entity's forward axis and
//! reports changes to its hit set as [`CursorInput`] messages: one
//! `IntersectionCleared` per entity that dropped out, then a single
//! `Intersection` (nearest first) when something new appeared or the nearest
//! hit changed.

use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use kubevr_core::ObjectFilter;

use crate::cursor::{CursorBeam, CursorPaused};
use crate::events::{CursorInput, CursorInputKind};

/// Class names used by object filters (`.pod` matches `Classes(["pod"])`).
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Classes(pub Vec<String>);

impl Classes {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(classes.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }
}

/// Ray cast settings for one entity. The cursor inserts this on attach.
#[derive(Component, Debug, Clone)]
#[require(RaycasterHits)]
pub struct Raycaster {
    /// Hits closer than this are ignored (keeps the controller model out).
    pub near: f32,
    pub far: f32,
    pub filter: ObjectFilter,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: 1000.0,
            filter: ObjectFilter::any(),
        }
    }
}

/// Hits from the previous frame, nearest first.
#[derive(Component, Debug, Clone, Default)]
pub struct RaycasterHits {
    entities: Vec<Entity>,
}

impl RaycasterHits {
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

/// Registers the controller raycast system.
///
/// Needs mesh assets, so add it only to apps that render.
pub struct ControllerRaycastPlugin;

impl Plugin for ControllerRaycastPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CursorInput>()
            .add_systems(PreUpdate, cast_controller_rays);
    }
}

/// Compare two nearest-first hit lists.
///
/// Returns the entities that dropped out, and whether an `Intersection`
/// should be reported for `current`.
pub fn diff_hits(previous: &[Entity], current: &[Entity]) -> (Vec<Entity>, bool) {
    let cleared = previous
        .iter()
        .filter(|e| !current.contains(e))
        .copied()
        .collect();
    let gained = current.iter().any(|e| !previous.contains(e));
    let nearest_changed = !current.is_empty() && current.first() != previous.first();
    (cleared, gained || nearest_changed)
}

/// Cast one ray per [`Raycaster`] and report hit changes.
///
/// Paused cursors are skipped, so their hit set stays at what the cursor last
/// saw and the first frame after resuming reports everything that changed.
pub fn cast_controller_rays(
    mut ray_cast: MeshRayCast,
    mut raycasters: Query<
        (Entity, &GlobalTransform, &Raycaster, &mut RaycasterHits),
        Without<CursorPaused>,
    >,
    candidates: Query<(Option<&Classes>, Option<&Name>)>,
    beams: Query<(), With<CursorBeam>>,
    mut input: MessageWriter<CursorInput>,
) {
    for (entity, transform, raycaster, mut hits) in &mut raycasters {
        let eligible = |candidate: Entity| {
            if candidate == entity || beams.contains(candidate) {
                return false;
            }
            if raycaster.filter.matches_everything() {
                return true;
            }
            candidates.get(candidate).is_ok_and(|(classes, name)| {
                let classes = classes.map(|c| c.0.as_slice()).unwrap_or_default();
                raycaster
                    .filter
                    .matches(classes, name.map(|n| n.as_str()))
            })
        };
        let settings = MeshRayCastSettings::default()
            .with_filter(&eligible)
            .with_visibility(RayCastVisibility::Visible)
            .never_early_exit();

        let ray = Ray3d::new(transform.translation(), transform.forward());
        let current: Vec<Entity> = ray_cast
            .cast_ray(ray, &settings)
            .iter()
            .filter(|(_, hit)| hit.distance >= raycaster.near && hit.distance <= raycaster.far)
            .map(|(e, _)| *e)
            .collect();

        let (cleared, report) = diff_hits(&hits.entities, &current);
        for gone in cleared {
            input.write(CursorInput::new(
                entity,
                CursorInputKind::IntersectionCleared(gone),
            ));
        }
        if report {
            tracing::trace!("raycaster {entity}: {} hits", current.len());
            input.write(CursorInput::new(
                entity,
                CursorInputKind::Intersection(current.clone()),
            ));
        }
        if hits.entities != current {
            hits.entities = current;
        }
    }
}
