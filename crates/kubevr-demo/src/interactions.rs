//! What the demo does with cursor events on pods.

use bevy::prelude::*;
use kubevr_bevy::PodInfo;
use kubevr_bevy::events::{CursorClick, CursorEnter, DestroyPod};

/// Wires cursor events on pods to pod inspection and destruction.
pub struct PodInteractionPlugin;

impl Plugin for PodInteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(inspect_hovered_pod)
            .add_observer(destroy_clicked_pod);
    }
}

fn inspect_hovered_pod(enter: On<CursorEnter>, pods: Query<&PodInfo>) {
    let Ok(PodInfo(pod)) = pods.get(enter.entity) else {
        return;
    };
    tracing::info!(
        "{} ({}) ip={} namespace={} started={}",
        pod.name,
        pod.kind.as_deref().unwrap_or("unknown"),
        pod.ip.as_deref().unwrap_or("-"),
        pod.namespace.as_deref().unwrap_or("-"),
        pod.start.as_deref().unwrap_or("-"),
    );
}

/// Clicking a pod asks the cluster to delete it.
fn destroy_clicked_pod(click: On<CursorClick>, pods: Query<(), With<PodInfo>>, mut commands: Commands) {
    if pods.contains(click.entity) {
        commands.trigger(DestroyPod {
            entity: click.entity,
        });
    }
}
