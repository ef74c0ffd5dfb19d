//! KubeVR Bevy plugins — the vive cursor and the pod layout inside Bevy's ECS.
//!
//! `KubeVrPlugin` registers everything; the pieces are also usable alone:
//! - [`CursorPlugin`]: laser-pointer cursor, hover state tags, cursor events
//! - [`ControllerRaycastPlugin`]: per-entity mesh raycaster feeding the cursor
//! - [`PodLayoutPlugin`]: channel polling and pod entity reconciliation

pub mod cursor;
pub mod events;
pub mod pods;
pub mod raycast;
pub mod resources;

use bevy::prelude::*;

pub use cursor::{CursorPaused, CursorPlugin, CursorState, Hovered, Hovering, ViveCursor};
pub use pods::{PodHolder, PodInfo, PodLayoutPlugin, PodPlaceholder};
pub use raycast::{Classes, ControllerRaycastPlugin, Raycaster, RaycasterHits};
pub use resources::{PodChannel, PodLayoutSettings, PodLayoutState, SpawnRng};

// Re-export for downstream crates.
pub use kubevr_core;

/// Registers the cursor, the controller raycaster, and the pod layout.
pub struct KubeVrPlugin;

impl Plugin for KubeVrPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CursorPlugin, ControllerRaycastPlugin, PodLayoutPlugin));
    }
}
