//! Application configuration for the demo.

use std::time::Duration;

use bevy::prelude::*;
use kubevr_core::CursorColor;

/// Default cluster event server.
const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:9003";
/// Default wait between reconnect attempts.
const DEFAULT_RECONNECT_MS: u64 = 2000;
/// Cursors only target pods unless told otherwise.
const DEFAULT_CURSOR_OBJECTS: &str = ".pod";

/// Runtime configuration for the KubeVR demo application.
#[derive(Resource, Clone, Debug)]
pub struct AppConfig {
    /// WebSocket URL of the cluster event server.
    pub server_url: String,
    /// Wait between reconnect attempts to the event server.
    pub reconnect_delay: Duration,
    /// Laser beam color.
    pub cursor_color: CursorColor,
    /// Object filter for the controller cursor.
    pub cursor_objects: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: std::env::var("KUBEVR_SERVER_URL")
                .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string()),
            reconnect_delay: Duration::from_millis(
                std::env::var("KUBEVR_RECONNECT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_RECONNECT_MS),
            ),
            cursor_color: std::env::var("KUBEVR_CURSOR_COLOR")
                .ok()
                .and_then(|s| {
                    s.parse()
                        .map_err(|e| tracing::warn!("Ignoring KUBEVR_CURSOR_COLOR: {e}"))
                        .ok()
                })
                .unwrap_or_default(),
            cursor_objects: std::env::var("KUBEVR_CURSOR_OBJECTS")
                .unwrap_or_else(|_| DEFAULT_CURSOR_OBJECTS.to_string()),
        }
    }
}
