//! Pod records as reported by the cluster event server.

use serde::{Deserialize, Serialize};

/// Wire shape of a pod. The server is not trusted to fill every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodRecord {
    pub name: Option<String>,
    pub ip: Option<String>,
    pub namespace: Option<String>,
    /// Start time as reported by the server (RFC 3339 in practice).
    pub start: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl PodRecord {
    /// A record carrying only a name, as used by remove/destroy payloads.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A validated pod: a record whose name is present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    pub ip: Option<String>,
    pub namespace: Option<String>,
    pub start: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Pod {
    /// Pod with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: None,
            namespace: None,
            start: None,
            kind: None,
        }
    }

    /// Validate a wire record. Returns `None` when the name is missing or empty.
    pub fn from_record(record: PodRecord) -> Option<Self> {
        let name = record.name.filter(|n| !n.is_empty())?;
        Some(Self {
            name,
            ip: record.ip,
            namespace: record.namespace,
            start: record.start,
            kind: record.kind,
        })
    }
}

impl From<Pod> for PodRecord {
    fn from(pod: Pod) -> Self {
        Self {
            name: Some(pod.name),
            ip: pod.ip,
            namespace: pod.namespace,
            start: pod.start,
            kind: pod.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_name_is_rejected() {
        let record = PodRecord {
            ip: Some("10.0.0.1".into()),
            ..PodRecord::default()
        };
        assert!(Pod::from_record(record).is_none());
        assert!(Pod::from_record(PodRecord::named("")).is_none());
    }

    #[test]
    fn test_record_type_field_maps_to_kind() {
        let record: PodRecord = serde_json::from_str(
            r#"{"name":"web-1","ip":"10.0.0.1","namespace":"default","start":"2024-01-01T00:00:00Z","type":"Deployment"}"#,
        )
        .unwrap();
        let pod = Pod::from_record(record).unwrap();
        assert_eq!(pod.name, "web-1");
        assert_eq!(pod.kind.as_deref(), Some("Deployment"));
        assert_eq!(pod.namespace.as_deref(), Some("default"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record: PodRecord =
            serde_json::from_str(r#"{"name":"a","labels":{"app":"x"}}"#).unwrap();
        assert_eq!(record.name.as_deref(), Some("a"));
    }
}
