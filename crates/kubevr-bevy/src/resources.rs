//! Bevy resources for the pod layout.

use bevy::prelude::*;
use kubevr_core::{ClientEvent, EventChannel, PodLayout, PodLayoutConfig, ServerEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The client-side pod list. Single source of truth for which pods are shown;
/// pod entities are reconciled against it whenever it changes.
#[derive(Resource, Debug, Default)]
pub struct PodLayoutState {
    pub layout: PodLayout,
}

/// Spawn bounds for new pods.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PodLayoutSettings(pub PodLayoutConfig);

/// Random source for spawn positions.
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

impl Default for SpawnRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl SpawnRng {
    /// Deterministic positions, for tests and recordings.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// The injected event channel to the cluster event server.
///
/// Absent in a purely local scene; every system touching it treats it as
/// optional.
#[derive(Resource)]
pub struct PodChannel {
    inner: Box<dyn EventChannel>,
}

impl PodChannel {
    pub fn new(channel: impl EventChannel + 'static) -> Self {
        Self {
            inner: Box::new(channel),
        }
    }

    /// Publish an event, logging instead of failing when the channel is down.
    pub fn send(&mut self, event: ClientEvent) {
        if let Err(e) = self.inner.publish(event) {
            tracing::error!("Failed to publish to event channel: {e}");
        }
    }

    /// Next inbound event, if any.
    pub fn poll(&mut self) -> Option<ServerEvent> {
        self.inner.poll()
    }
}

/// Shared mesh and material handles for pod entities.
#[derive(Resource, Clone)]
pub struct PodVisuals {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub hovered_material: Handle<StandardMaterial>,
    pub placeholder_material: Handle<StandardMaterial>,
}
