//! Client-side pod list, reconciled from server push events.
//!
//! The list is the only store of pods; scene entities are views of it.
//! Names are unique: re-adding a known name replaces the record in place.

use crate::pod::{Pod, PodRecord};
use crate::protocol::{ClientEvent, ServerEvent};

/// What happened to the list when a pod-added event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// New name, appended to the end.
    Appended,
    /// Known name, record replaced at its existing index.
    Replaced(usize),
    /// Record had no name and was dropped.
    Rejected,
}

/// Visible pod list plus the "has the first snapshot arrived" flag.
#[derive(Debug, Clone, Default)]
pub struct PodLayout {
    pods: Vec<Pod>,
    loaded: bool,
}

impl PodLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pods in display order.
    pub fn pods(&self) -> &[Pod] {
        &self.pods
    }

    /// Whether a snapshot has been received. Until then a placeholder is shown.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Pod> {
        self.pods.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The request sent once at startup.
    pub fn snapshot_request() -> ClientEvent {
        ClientEvent::RequestSnapshot
    }

    /// Build the outbound destroy request for `name`.
    ///
    /// The list is not touched: the pod disappears when the server confirms
    /// with a remove event.
    pub fn destroy_request(name: &str) -> ClientEvent {
        ClientEvent::DestroyPod {
            name: name.to_string(),
        }
    }

    /// Replace the whole list and mark it loaded.
    ///
    /// Unnamed records are dropped; a repeated name keeps its first slot and
    /// the last record's data.
    pub fn apply_snapshot(&mut self, records: Vec<PodRecord>) {
        let total = records.len();
        self.pods.clear();
        for record in records {
            if let Some(pod) = Pod::from_record(record) {
                self.upsert(pod);
            }
        }
        if self.pods.len() != total {
            tracing::warn!(
                "Snapshot had {} records, kept {} (unnamed or duplicate entries dropped)",
                total,
                self.pods.len()
            );
        }
        self.loaded = true;
    }

    /// Insert a pod, replacing any existing entry with the same name.
    pub fn apply_added(&mut self, record: PodRecord) -> AddOutcome {
        match Pod::from_record(record.clone()) {
            Some(pod) => self.upsert(pod),
            None => {
                tracing::warn!("Unknown pod data received: {record:?}");
                AddOutcome::Rejected
            }
        }
    }

    /// Remove every pod named `name`. Returns how many were removed.
    pub fn apply_removed(&mut self, name: &str) -> usize {
        let before = self.pods.len();
        self.pods.retain(|p| p.name != name);
        before - self.pods.len()
    }

    /// Dispatch one inbound server event.
    pub fn apply(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Snapshot { pod_list } => self.apply_snapshot(pod_list),
            ServerEvent::PodAdded(record) => {
                self.apply_added(record);
            }
            ServerEvent::PodRemoved(record) => match record.name {
                Some(name) => {
                    let removed = self.apply_removed(&name);
                    tracing::debug!("removePod {name}: {removed} entries removed");
                }
                None => tracing::warn!("removePod without a name, dropped"),
            },
        }
    }

    fn upsert(&mut self, pod: Pod) -> AddOutcome {
        match self.pods.iter().position(|p| p.name == pod.name) {
            Some(index) => {
                self.pods[index] = pod;
                AddOutcome::Replaced(index)
            }
            None => {
                self.pods.push(pod);
                AddOutcome::Appended
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(layout: &PodLayout) -> Vec<&str> {
        layout.pods().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_snapshot_add_remove_scenario() {
        let mut layout = PodLayout::new();
        assert!(!layout.is_loaded());

        layout.apply(ServerEvent::Snapshot {
            pod_list: vec![PodRecord::named("a"), PodRecord::named("b")],
        });
        assert!(layout.is_loaded());
        assert_eq!(names(&layout), ["a", "b"]);

        layout.apply(ServerEvent::PodAdded(PodRecord::named("c")));
        assert_eq!(names(&layout), ["a", "b", "c"]);

        layout.apply(ServerEvent::PodRemoved(PodRecord::named("a")));
        assert_eq!(names(&layout), ["b", "c"]);
    }

    #[test]
    fn test_add_with_name_appends_one() {
        let mut layout = PodLayout::new();
        layout.apply_snapshot(vec![PodRecord::named("a")]);

        let outcome = layout.apply_added(PodRecord {
            name: Some("p1".into()),
            ip: Some("10.0.0.1".into()),
            namespace: Some("default".into()),
            ..PodRecord::default()
        });

        assert_eq!(outcome, AddOutcome::Appended);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get("p1").and_then(|p| p.ip.as_deref()), Some("10.0.0.1"));
    }

    #[test]
    fn test_add_without_name_is_dropped() {
        let mut layout = PodLayout::new();
        layout.apply_snapshot(vec![PodRecord::named("a")]);

        let outcome = layout.apply_added(PodRecord {
            ip: Some("10.0.0.1".into()),
            ..PodRecord::default()
        });

        assert_eq!(outcome, AddOutcome::Rejected);
        assert_eq!(names(&layout), ["a"]);
    }

    #[test]
    fn test_readd_replaces_in_place() {
        let mut layout = PodLayout::new();
        layout.apply_snapshot(vec![PodRecord::named("a"), PodRecord::named("b")]);

        let outcome = layout.apply_added(PodRecord {
            name: Some("a".into()),
            ip: Some("10.1.1.1".into()),
            ..PodRecord::default()
        });

        assert_eq!(outcome, AddOutcome::Replaced(0));
        assert_eq!(names(&layout), ["a", "b"]);
        assert_eq!(layout.pods()[0].ip.as_deref(), Some("10.1.1.1"));
    }

    #[test]
    fn test_remove_missing_name_is_noop() {
        let mut layout = PodLayout::new();
        layout.apply_snapshot(vec![PodRecord::named("a")]);
        assert_eq!(layout.apply_removed("x"), 0);
        assert_eq!(names(&layout), ["a"]);
    }

    #[test]
    fn test_snapshot_collapses_duplicates_and_drops_unnamed() {
        let mut layout = PodLayout::new();
        layout.apply_snapshot(vec![
            PodRecord::named("a"),
            PodRecord::default(),
            PodRecord {
                name: Some("a".into()),
                kind: Some("Job".into()),
                ..PodRecord::default()
            },
            PodRecord::named("b"),
        ]);
        assert_eq!(names(&layout), ["a", "b"]);
        assert_eq!(layout.pods()[0].kind.as_deref(), Some("Job"));
    }

    #[test]
    fn test_snapshot_replaces_previous_list() {
        let mut layout = PodLayout::new();
        layout.apply_snapshot(vec![PodRecord::named("a"), PodRecord::named("b")]);
        layout.apply_snapshot(vec![PodRecord::named("z")]);
        assert_eq!(names(&layout), ["z"]);
    }

    #[test]
    fn test_destroy_request_leaves_list_alone() {
        let mut layout = PodLayout::new();
        layout.apply_snapshot(vec![PodRecord::named("b")]);
        let request = PodLayout::destroy_request("b");
        assert_eq!(request, ClientEvent::DestroyPod { name: "b".into() });
        assert!(layout.contains("b"));
    }
}
