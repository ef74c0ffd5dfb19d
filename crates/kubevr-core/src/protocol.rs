//! Wire contracts between the visualization and the cluster event server.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`,
//! using the adjacently tagged `#[serde(tag, content)]` pattern. Event
//! names match the server's existing socket vocabulary.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::pod::PodRecord;

/// Messages from the visualization to the event server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Ask for a full snapshot of the current pods.
    #[serde(rename = "sniffPods")]
    RequestSnapshot,

    /// Ask the cluster to delete a pod.
    #[serde(rename = "k8sDestroyPod")]
    DestroyPod {
        /// Pod name.
        name: String,
    },
}

/// Messages from the event server to the visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Full pod list, replacing whatever the client holds.
    #[serde(rename = "initPod")]
    Snapshot {
        #[serde(rename = "podList", default)]
        pod_list: Vec<PodRecord>,
    },

    /// A pod started.
    #[serde(rename = "newPod")]
    PodAdded(PodRecord),

    /// A pod went away. Only `name` is meaningful.
    #[serde(rename = "removePod")]
    PodRemoved(PodRecord),
}

impl ClientEvent {
    /// Serialize to a text frame.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ServerEvent {
    /// Parse a text frame.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_request_frame() {
        let json = ClientEvent::RequestSnapshot.encode().unwrap();
        assert_eq!(json, r#"{"event":"sniffPods"}"#);
    }

    #[test]
    fn test_destroy_frame_carries_name() {
        let json = ClientEvent::DestroyPod { name: "b".into() }.encode().unwrap();
        assert_eq!(json, r#"{"event":"k8sDestroyPod","data":{"name":"b"}}"#);
    }

    #[test]
    fn test_decode_init_frame() {
        let event =
            ServerEvent::decode(r#"{"event":"initPod","data":{"podList":[{"name":"a"},{"name":"b"}]}}"#)
                .unwrap();
        let ServerEvent::Snapshot { pod_list } = event else {
            panic!("expected snapshot, got {event:?}");
        };
        let names: Vec<_> = pod_list.iter().filter_map(|p| p.name.as_deref()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_decode_add_without_name_still_parses() {
        let event = ServerEvent::decode(r#"{"event":"newPod","data":{"ip":"10.0.0.9"}}"#).unwrap();
        assert_eq!(
            event,
            ServerEvent::PodAdded(PodRecord {
                ip: Some("10.0.0.9".into()),
                ..PodRecord::default()
            })
        );
    }

    #[test]
    fn test_decode_rejects_unknown_event() {
        assert!(ServerEvent::decode(r#"{"event":"scalePods","data":{}}"#).is_err());
        assert!(ServerEvent::decode("not json").is_err());
    }
}
