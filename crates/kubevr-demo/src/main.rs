//! KubeVR Demo — cluster pods as boxes you can point at.
//!
//! Connects to the cluster event server over WebSocket, shows one box per
//! pod, and drives a vive cursor from the mouse. Clicking a pod requests its
//! deletion.

mod config;
mod input;
mod interactions;
mod scene;
mod ws_bridge;

use bevy::prelude::*;
use kubevr_bevy::{KubeVrPlugin, PodChannel};

use crate::config::AppConfig;

fn main() {
    let config = AppConfig::default();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "KubeVR".into(),
            ..default()
        }),
        ..default()
    }));

    match ws_bridge::spawn_ws_client(&config.server_url, config.reconnect_delay) {
        Ok(channel) => {
            app.insert_resource(PodChannel::new(channel));
        }
        Err(e) => tracing::error!("Failed to start event server bridge: {e}"),
    }

    app.insert_resource(config)
        .add_plugins((
            KubeVrPlugin,
            scene::ScenePlugin,
            input::DesktopInputPlugin,
            interactions::PodInteractionPlugin,
        ))
        .run();
}
