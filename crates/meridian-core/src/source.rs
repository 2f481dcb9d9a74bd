//! Collaborator-boundary contracts.
//!
//! The merge engine never talks to the network itself; it consumes raw
//! records produced by a [`NeighborhoodSource`]. Records are intentionally
//! loose — labels are optional and ids are plain strings — because the
//! engine normalizes and de-duplicates everything on merge.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// A raw node record as returned by a neighborhood fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: String,
    /// Absent label means "derive from the id".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A raw edge record as returned by a neighborhood fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The immediate neighborhood of one entity: incident nodes and edges.
///
/// May overlap arbitrarily with previously fetched neighborhoods; the merge
/// engine converges regardless.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Neighborhood {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl Neighborhood {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Anything that can fetch an entity's immediate neighborhood.
///
/// Implemented by the SPARQL accessor in production and by in-memory fakes
/// in tests.
pub trait NeighborhoodSource {
    fn fetch_neighborhood(
        &self,
        entity: &str,
    ) -> impl Future<Output = Result<Neighborhood, FetchError>> + Send;
}

/// Response from the natural-language query service.
///
/// `results` rows are transient: rendered by the formatter and discarded,
/// never merged into the graph. A populated `error` alongside a successful
/// transport call is surfaced to the user, not raised.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparql_query: Option<String>,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_deserializes_with_optional_labels() {
        let json = r#"{
            "nodes": [{"id": "http://ns#K", "label": "K"}, {"id": "http://ns#NL"}],
            "edges": [{"id": "r1", "source": "http://ns#K", "target": "http://ns#NL"}]
        }"#;

        let hood: Neighborhood = serde_json::from_str(json).unwrap();
        assert_eq!(hood.nodes.len(), 2);
        assert_eq!(hood.nodes[0].label.as_deref(), Some("K"));
        assert_eq!(hood.nodes[1].label, None);
        assert_eq!(hood.edges[0].label, None);
    }

    #[test]
    fn neighborhood_defaults_to_empty() {
        let hood: Neighborhood = serde_json::from_str("{}").unwrap();
        assert!(hood.is_empty());
    }

    #[test]
    fn ask_response_tolerates_missing_fields() {
        let resp: AskResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(resp.sparql_query.is_none());
        assert!(resp.error.is_none());
        assert!(resp.results.is_empty());
    }
}
