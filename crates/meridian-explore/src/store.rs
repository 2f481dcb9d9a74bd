//! The accumulating, de-duplicated client-side graph.
//!
//! Nodes and edges live in insertion-ordered vectors with id indexes on the
//! side, so snapshots are deterministic and upserts are O(1). De-duplication
//! is purely identity-based: the store never compares labels or endpoints.

use std::collections::HashMap;

use meridian_core::{Edge, EntityId, GraphSnapshot, LabelPolicy, Node, RelationId};

/// The de-duplicated node/edge collection a session accumulates into.
///
/// Grows monotonically under upserts; only [`clear`](GraphStore::clear)
/// shrinks it. Idempotent under repeated upserts of the same id regardless
/// of call count or order.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    node_index: HashMap<EntityId, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<RelationId, usize>,
    label_policy: LabelPolicy,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_policy(label_policy: LabelPolicy) -> Self {
        Self {
            label_policy,
            ..Self::default()
        }
    }

    /// Insert a node if its id is new. Returns whether the node set grew.
    ///
    /// An existing id is a no-op under `FirstWins` (label retained) and a
    /// label rewrite under `LastWins`. Empty ids are rejected: no node is
    /// created.
    pub fn upsert_node(&mut self, id: &str, label: &str) -> bool {
        if id.is_empty() {
            tracing::debug!("rejected node record with empty id");
            return false;
        }

        let id = EntityId::new(id);
        match self.node_index.get(&id) {
            Some(&position) => {
                if self.label_policy == LabelPolicy::LastWins {
                    self.nodes[position].label = label.to_string();
                }
                false
            }
            None => {
                self.node_index.insert(id.clone(), self.nodes.len());
                self.nodes.push(Node {
                    id,
                    label: label.to_string(),
                });
                true
            }
        }
    }

    /// Insert an edge if its id is new. Returns whether the edge set grew.
    ///
    /// Edge identity is solely the id: a known id is a no-op even when the
    /// endpoints or label differ, because relation ids are server-minted and
    /// assumed canonical. Endpoints are recorded as given; the store does
    /// not require them to exist as nodes.
    pub fn upsert_edge(&mut self, id: &str, source: &str, target: &str, label: &str) -> bool {
        if id.is_empty() {
            tracing::debug!("rejected edge record with empty id");
            return false;
        }

        let id = RelationId::new(id);
        if self.edge_index.contains_key(&id) {
            return false;
        }

        self.edge_index.insert(id.clone(), self.edges.len());
        self.edges.push(Edge {
            id,
            source: EntityId::new(source),
            target: EntityId::new(target),
            label: label.to_string(),
        });
        true
    }

    /// Empty both collections.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_index.clear();
        self.edges.clear();
        self.edge_index.clear();
    }

    /// Insertion-ordered immutable view for rendering.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_node_dedups_by_id() {
        let mut store = GraphStore::new();
        assert!(store.upsert_node("http://ns#K", "K"));
        assert!(!store.upsert_node("http://ns#K", "K"));
        assert!(!store.upsert_node("http://ns#K", "different"));
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn first_wins_keeps_original_label() {
        let mut store = GraphStore::new();
        store.upsert_node("http://ns#K", "original");
        store.upsert_node("http://ns#K", "replacement");
        assert_eq!(store.snapshot().nodes[0].label, "original");
    }

    #[test]
    fn last_wins_rewrites_label_without_growing() {
        let mut store = GraphStore::with_label_policy(LabelPolicy::LastWins);
        store.upsert_node("http://ns#K", "original");
        store.upsert_node("http://ns#K", "replacement");
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.snapshot().nodes[0].label, "replacement");
    }

    #[test]
    fn empty_node_id_is_rejected() {
        let mut store = GraphStore::new();
        assert!(!store.upsert_node("", "ghost"));
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn edge_identity_is_solely_the_id() {
        let mut store = GraphStore::new();
        assert!(store.upsert_edge("r1", "a", "b", "knows"));
        // Same id with different endpoints and label: still a no-op.
        assert!(!store.upsert_edge("r1", "x", "y", "other"));
        assert_eq!(store.edge_count(), 1);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.edges[0].source.as_str(), "a");
        assert_eq!(snapshot.edges[0].label, "knows");
    }

    #[test]
    fn dangling_edges_are_stored() {
        let mut store = GraphStore::new();
        store.upsert_edge("r1", "never_seen", "also_never_seen", "ghost");
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let mut store = GraphStore::new();
        for id in ["c", "a", "b"] {
            store.upsert_node(id, id);
        }
        // Re-upserting must not reorder.
        store.upsert_node("a", "a");

        let snapshot = store.snapshot();
        let ids: Vec<&str> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn uniqueness_holds_for_arbitrary_upsert_sequences() {
        let mut store = GraphStore::new();
        let sequence = ["a", "b", "a", "c", "b", "a", "c", "c"];
        for id in sequence {
            store.upsert_node(id, id);
            store.upsert_edge(id, id, id, id);
        }

        let snapshot = store.snapshot();
        let mut node_ids: Vec<_> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
        node_ids.sort_unstable();
        node_ids.dedup();
        assert_eq!(node_ids.len(), snapshot.nodes.len());
        assert_eq!(snapshot.nodes.len(), 3);
        assert_eq!(snapshot.edges.len(), 3);
    }

    #[test]
    fn clear_empties_everything() {
        let mut store = GraphStore::new();
        store.upsert_node("a", "a");
        store.upsert_edge("r1", "a", "b", "knows");
        store.clear();

        assert!(store.snapshot().is_empty());
        // The store is usable again after clearing.
        assert!(store.upsert_node("a", "a"));
    }
}
