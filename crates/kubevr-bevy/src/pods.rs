//! Pod layout — keeps one box entity per pod in the client-side list.
//!
//! The event channel is drained every frame into [`PodLayoutState`]; when the
//! list changes, pod entities under the [`PodHolder`] are reconciled by name.
//! Until the first snapshot arrives a single placeholder pod is shown.

use std::collections::HashMap;

use bevy::prelude::*;
use kubevr_core::{Pod, PodLayout};

use crate::cursor::Hovered;
use crate::events::DestroyPod;
use crate::raycast::Classes;
use crate::resources::{PodChannel, PodLayoutSettings, PodLayoutState, PodVisuals, SpawnRng};

/// Class added to every mounted pod; cursors filter on `.pod`.
pub const POD_CLASS: &str = "pod";
/// Name of the pod shown while waiting for the first snapshot.
pub const PLACEHOLDER_NAME: &str = "test";

const POD_COLOR: Color = Color::srgb(0x37 as f32 / 255.0, 0x74 as f32 / 255.0, 0xE0 as f32 / 255.0);
const PLACEHOLDER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Parent of all pod entities.
#[derive(Component, Debug, Default)]
pub struct PodHolder;

/// The pod record a box entity is showing.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PodInfo(pub Pod);

impl PodInfo {
    pub fn name(&self) -> &str {
        &self.0.name
    }
}

/// Marks the stand-in pod shown before the list is loaded.
#[derive(Component, Debug, Default)]
pub struct PodPlaceholder;

/// Registers pod layout resources, the channel systems, and pod observers.
pub struct PodLayoutPlugin;

impl Plugin for PodLayoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PodLayoutState>()
            .init_resource::<PodLayoutSettings>()
            .init_resource::<SpawnRng>()
            .add_systems(
                Startup,
                (spawn_pod_holder, init_pod_visuals, request_snapshot),
            )
            .add_systems(
                Update,
                (
                    poll_pod_channel,
                    reconcile_pod_entities.run_if(resource_changed::<PodLayoutState>),
                )
                    .chain(),
            )
            .add_observer(on_pod_mounted)
            .add_observer(on_pod_unmounted)
            .add_observer(on_pod_hovered)
            .add_observer(on_pod_unhovered)
            .add_observer(on_destroy_pod);
    }
}

fn spawn_pod_holder(mut commands: Commands) {
    commands.spawn((
        PodHolder,
        Name::new("podHolder"),
        Transform::default(),
        Visibility::default(),
    ));
}

fn init_pod_visuals(
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
    mut commands: Commands,
) {
    let (Some(mut meshes), Some(mut materials)) = (meshes, materials) else {
        tracing::debug!("No mesh storage, pods will spawn without visuals");
        return;
    };
    let pod_material = |color: Color| StandardMaterial {
        base_color: color,
        metallic: 0.3,
        perceptual_roughness: 0.0,
        ..default()
    };
    commands.insert_resource(PodVisuals {
        mesh: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        material: materials.add(pod_material(POD_COLOR)),
        hovered_material: materials.add(StandardMaterial {
            emissive: LinearRgba::rgb(0.1, 0.25, 0.6),
            ..pod_material(POD_COLOR)
        }),
        placeholder_material: materials.add(pod_material(PLACEHOLDER_COLOR)),
    });
}

/// Ask the server for the full pod list. Fire-and-forget.
fn request_snapshot(channel: Option<ResMut<PodChannel>>) {
    match channel {
        Some(mut channel) => {
            channel.send(PodLayout::snapshot_request());
            tracing::info!("Requested pod snapshot");
        }
        None => tracing::warn!("No event channel configured, pod list will stay empty"),
    }
}

/// Drain the event channel into the pod list.
pub fn poll_pod_channel(
    channel: Option<ResMut<PodChannel>>,
    mut state: ResMut<PodLayoutState>,
) {
    let Some(mut channel) = channel else {
        return;
    };
    while let Some(event) = channel.poll() {
        tracing::debug!("Pod event: {event:?}");
        state.layout.apply(event);
    }
}

/// Spawn, update, and despawn pod entities to match the pod list.
#[allow(clippy::too_many_arguments)]
pub fn reconcile_pod_entities(
    state: Res<PodLayoutState>,
    settings: Res<PodLayoutSettings>,
    mut rng: ResMut<SpawnRng>,
    visuals: Option<Res<PodVisuals>>,
    holder: Query<Entity, With<PodHolder>>,
    mut pods: Query<(Entity, &mut PodInfo), Without<PodPlaceholder>>,
    placeholders: Query<Entity, With<PodPlaceholder>>,
    mut commands: Commands,
) {
    let holder = holder.iter().next();
    let layout = &state.layout;

    if !layout.is_loaded() {
        if placeholders.is_empty() {
            let position = settings.0.random_position(&mut rng.0);
            let entity = spawn_pod(
                &mut commands,
                Pod::named(PLACEHOLDER_NAME),
                position,
                holder,
                visuals.as_deref().map(|v| v.placeholder_material.clone()),
                visuals.as_deref(),
            );
            commands.entity(entity).insert(PodPlaceholder);
        }
        return;
    }

    for placeholder in &placeholders {
        commands.entity(placeholder).despawn();
    }

    let mut existing: HashMap<String, Entity> = HashMap::new();
    for (entity, mut info) in &mut pods {
        match layout.get(info.name()) {
            Some(pod) if existing.contains_key(&pod.name) => {
                // Two entities for one name; keep the first.
                commands.entity(entity).despawn();
            }
            Some(pod) => {
                if info.0 != *pod {
                    info.0 = pod.clone();
                }
                existing.insert(pod.name.clone(), entity);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for pod in layout.pods() {
        if existing.contains_key(&pod.name) {
            continue;
        }
        let position = settings.0.random_position(&mut rng.0);
        spawn_pod(
            &mut commands,
            pod.clone(),
            position,
            holder,
            visuals.as_deref().map(|v| v.material.clone()),
            visuals.as_deref(),
        );
    }
}

fn spawn_pod(
    commands: &mut Commands,
    pod: Pod,
    position: Vec3,
    holder: Option<Entity>,
    material: Option<Handle<StandardMaterial>>,
    visuals: Option<&PodVisuals>,
) -> Entity {
    let mut entity = commands.spawn((
        Name::new(pod.name.clone()),
        PodInfo(pod),
        Transform::from_translation(position),
        Visibility::default(),
    ));
    if let Some(holder) = holder {
        entity.insert(ChildOf(holder));
    }
    if let (Some(visuals), Some(material)) = (visuals, material) {
        entity.insert((Mesh3d(visuals.mesh.clone()), MeshMaterial3d(material)));
    }
    entity.id()
}

/// A pod entity was spawned: make it targetable by `.pod` cursors.
fn on_pod_mounted(add: On<Add, PodInfo>, infos: Query<&PodInfo>, mut commands: Commands) {
    let entity = add.entity;
    if let Ok(info) = infos.get(entity) {
        tracing::debug!("Mounted pod {} as {entity}", info.name());
    }
    commands.entity(entity).try_insert(Classes::new([POD_CLASS]));
}

fn on_pod_unmounted(remove: On<Remove, PodInfo>, infos: Query<&PodInfo>) {
    if let Ok(info) = infos.get(remove.entity) {
        tracing::info!("Removing: {}", info.name());
    }
}

fn on_pod_hovered(
    add: On<Add, Hovered>,
    visuals: Option<Res<PodVisuals>>,
    mut pods: Query<
        &mut MeshMaterial3d<StandardMaterial>,
        (With<PodInfo>, Without<PodPlaceholder>),
    >,
) {
    let Some(visuals) = visuals else { return };
    if let Ok(mut material) = pods.get_mut(add.entity) {
        material.0 = visuals.hovered_material.clone();
    }
}

fn on_pod_unhovered(
    remove: On<Remove, Hovered>,
    visuals: Option<Res<PodVisuals>>,
    mut pods: Query<(&mut MeshMaterial3d<StandardMaterial>, Has<PodPlaceholder>), With<PodInfo>>,
) {
    let Some(visuals) = visuals else { return };
    if let Ok((mut material, placeholder)) = pods.get_mut(remove.entity) {
        material.0 = if placeholder {
            visuals.placeholder_material.clone()
        } else {
            visuals.material.clone()
        };
    }
}

/// Forward a destroy request for the pod's name. The list is left alone.
fn on_destroy_pod(
    destroy: On<DestroyPod>,
    pods: Query<&PodInfo, Without<PodPlaceholder>>,
    channel: Option<ResMut<PodChannel>>,
) {
    let Ok(info) = pods.get(destroy.entity) else {
        tracing::debug!("Destroy requested for {} which is not a pod", destroy.entity);
        return;
    };
    let Some(mut channel) = channel else {
        tracing::warn!("No event channel, cannot destroy pod {}", info.name());
        return;
    };
    tracing::info!("Requesting destroy of pod {}", info.name());
    channel.send(PodLayout::destroy_request(info.name()));
}
