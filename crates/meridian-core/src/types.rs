//! Core domain types for the Meridian client-side graph.
//!
//! These are the types the assembled graph is made of. The remote store keys
//! entities and relations by IRI, so identity here is an opaque string, not
//! a generated value.

use serde::{Deserialize, Serialize};

// ── Identity ──────────────────────────────────────────────────────

/// Unique identifier for an entity (node) in the knowledge graph.
///
/// Typically a full IRI such as `http://example.org/ns#Karan`, but treated
/// as opaque: two references with the same string are the same entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a relation (edge) instance.
///
/// Distinct from the endpoint pair: the same two entities may be connected
/// by several relation instances, each with its own id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RelationId(pub String);

impl RelationId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Graph Elements ────────────────────────────────────────────────

/// A node in the assembled graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub id: EntityId,
    pub label: String,
}

/// A directed, labeled edge in the assembled graph.
///
/// `source` and `target` are recorded as given at merge time; an edge whose
/// endpoint was never observed as a node is kept and rendered as a dangling
/// reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub id: RelationId,
    pub source: EntityId,
    pub target: EntityId,
    pub label: String,
}

/// Immutable, insertion-ordered view of the assembled graph.
///
/// This is the sole input to the external rendering widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

// ── Policies ──────────────────────────────────────────────────────

/// What happens to a node's label when the same id is observed again.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// The label recorded at first insertion is kept.
    #[default]
    FirstWins,
    /// Later observations overwrite the label; the node set still grows
    /// by at most one per distinct id.
    LastWins,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_equality_is_by_string() {
        let a = EntityId::new("http://ns#K");
        let b = EntityId::new("http://ns#K");
        let c = EntityId::new("http://ns#NL");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn snapshot_serialization_roundtrip() {
        let snapshot = GraphSnapshot {
            nodes: vec![Node {
                id: EntityId::new("http://ns#K"),
                label: "K".to_string(),
            }],
            edges: vec![Edge {
                id: RelationId::new("r1"),
                source: EntityId::new("http://ns#K"),
                target: EntityId::new("http://ns#NL"),
                label: "enrolledCourse".to_string(),
            }],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: GraphSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deserialized);
    }

    #[test]
    fn label_policy_serializes_snake_case() {
        let json = serde_json::to_string(&LabelPolicy::FirstWins).unwrap();
        assert_eq!(json, "\"first_wins\"");
    }
}
