//! Read operations against the SPARQL store.
//!
//! The neighborhood query mirrors what the exploration UI needs: every IRI
//! object one hop out from the center entity, minus ontology vocabulary.
//! Edge ids are minted deterministically from `(subject, predicate, object)`
//! so re-fetching the same neighborhood yields identical records.

use meridian_core::identity::local_name;
use meridian_core::{EdgeRecord, FetchError, Neighborhood, NeighborhoodSource, NodeRecord};

use crate::client::{Binding, SparqlClient};

/// Vocabulary IRI fragments never shown as graph nodes.
const VOCABULARY_MARKERS: [&str; 3] = ["owl#", "rdf-syntax", "XMLSchema"];

impl SparqlClient {
    // ── Neighborhood ─────────────────────────────────────────────

    /// Fetch the immediate neighborhood of `uri`.
    ///
    /// The ontology root itself has no meaningful neighborhood and yields an
    /// empty result.
    pub async fn neighborhood(&self, uri: &str) -> Result<Neighborhood, FetchError> {
        if uri.is_empty() {
            return Err(FetchError::InvalidInput(
                "entity reference is empty".to_string(),
            ));
        }
        if self.is_ontology_root(uri) {
            return Ok(Neighborhood::default());
        }

        let query = format!(
            "PREFIX owl: <http://www.w3.org/2002/07/owl#>
             PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
             SELECT ?p ?o WHERE {{
               <{uri}> ?p ?o .
               FILTER(isIRI(?o))
               FILTER(?o != owl:Ontology)
               FILTER(?p != rdf:type)
             }}"
        );

        let bindings = self.select(&query).await?;
        let hood = assemble_neighborhood(uri, &bindings);
        tracing::debug!(
            entity = %uri,
            nodes = hood.nodes.len(),
            edges = hood.edges.len(),
            "neighborhood fetched"
        );
        Ok(hood)
    }

    fn is_ontology_root(&self, uri: &str) -> bool {
        let root = self.config().namespace.trim_end_matches(['#', '/']);
        !root.is_empty() && uri == root
    }

    // ── Vocabulary Listings ──────────────────────────────────────

    /// List all OWL classes.
    pub async fn classes(&self) -> Result<Vec<String>, FetchError> {
        let query = "PREFIX owl: <http://www.w3.org/2002/07/owl#>
             SELECT ?c WHERE { ?c a owl:Class }";
        let bindings = self.select(query).await?;
        Ok(var_values(&bindings, "c"))
    }

    /// List all object properties.
    pub async fn object_properties(&self) -> Result<Vec<String>, FetchError> {
        let query = "PREFIX owl: <http://www.w3.org/2002/07/owl#>
             SELECT ?p WHERE { ?p a owl:ObjectProperty }";
        let bindings = self.select(query).await?;
        Ok(var_values(&bindings, "p"))
    }

    /// List all individuals: typed subjects that are not themselves part of
    /// the ontology vocabulary.
    pub async fn individuals(&self) -> Result<Vec<String>, FetchError> {
        let query = "PREFIX owl: <http://www.w3.org/2002/07/owl#>
             PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
             SELECT DISTINCT ?i WHERE {
               ?i rdf:type ?c .
               FILTER(?c != owl:Class)
               FILTER(?c != owl:ObjectProperty)
               FILTER(?c != owl:Ontology)
             }";
        let bindings = self.select(query).await?;
        Ok(var_values(&bindings, "i"))
    }
}

impl NeighborhoodSource for SparqlClient {
    async fn fetch_neighborhood(&self, entity: &str) -> Result<Neighborhood, FetchError> {
        self.neighborhood(entity).await
    }
}

/// Build neighborhood records from raw `?p ?o` bindings.
///
/// The center entity is always the first node. Duplicate objects collapse to
/// a single node record; the client-side store would de-duplicate anyway,
/// but the wire format stays minimal this way.
fn assemble_neighborhood(uri: &str, bindings: &[Binding]) -> Neighborhood {
    let mut nodes = vec![NodeRecord {
        id: uri.to_string(),
        label: Some(local_name(uri).to_string()),
    }];
    let mut seen = std::collections::HashSet::new();
    seen.insert(uri.to_string());

    let mut edges = Vec::new();

    for row in bindings {
        let (Some(p), Some(o)) = (row.get("p"), row.get("o")) else {
            continue;
        };
        let (predicate, object) = (p.value.as_str(), o.value.as_str());

        if VOCABULARY_MARKERS.iter().any(|m| object.contains(m)) {
            continue;
        }

        if seen.insert(object.to_string()) {
            nodes.push(NodeRecord {
                id: object.to_string(),
                label: Some(local_name(object).to_string()),
            });
        }

        edges.push(EdgeRecord {
            id: format!("{uri}_{predicate}_{object}"),
            source: uri.to_string(),
            target: object.to_string(),
            label: Some(local_name(predicate).to_string()),
        });
    }

    Neighborhood { nodes, edges }
}

/// Extract the values bound to `var` across all rows.
fn var_values(bindings: &[Binding], var: &str) -> Vec<String> {
    bindings
        .iter()
        .filter_map(|row| row.get(var).map(|term| term.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SparqlTerm;

    fn binding(pairs: &[(&str, &str)]) -> Binding {
        pairs
            .iter()
            .map(|(var, value)| {
                (
                    var.to_string(),
                    SparqlTerm {
                        value: value.to_string(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn assemble_builds_center_plus_objects() {
        let bindings = vec![
            binding(&[("p", "http://ns#enrolledCourse"), ("o", "http://ns#NL")]),
            binding(&[("p", "http://ns#friendOf"), ("o", "http://ns#Jane")]),
        ];

        let hood = assemble_neighborhood("http://ns#Karan", &bindings);

        assert_eq!(hood.nodes.len(), 3);
        assert_eq!(hood.nodes[0].id, "http://ns#Karan");
        assert_eq!(hood.nodes[0].label.as_deref(), Some("Karan"));
        assert_eq!(hood.edges.len(), 2);
        assert_eq!(
            hood.edges[0].id,
            "http://ns#Karan_http://ns#enrolledCourse_http://ns#NL"
        );
        assert_eq!(hood.edges[0].label.as_deref(), Some("enrolledCourse"));
    }

    #[test]
    fn assemble_skips_vocabulary_objects() {
        let bindings = vec![
            binding(&[
                ("p", "http://ns#subClassOf"),
                ("o", "http://www.w3.org/2002/07/owl#Thing"),
            ]),
            binding(&[
                ("p", "http://ns#age"),
                ("o", "http://www.w3.org/2001/XMLSchema#integer"),
            ]),
            binding(&[("p", "http://ns#enrolledCourse"), ("o", "http://ns#NL")]),
        ];

        let hood = assemble_neighborhood("http://ns#Karan", &bindings);

        assert_eq!(hood.nodes.len(), 2);
        assert_eq!(hood.edges.len(), 1);
        assert_eq!(hood.edges[0].target, "http://ns#NL");
    }

    #[test]
    fn assemble_collapses_duplicate_objects_but_keeps_distinct_edges() {
        let bindings = vec![
            binding(&[("p", "http://ns#teaches"), ("o", "http://ns#NL")]),
            binding(&[("p", "http://ns#coordinates"), ("o", "http://ns#NL")]),
        ];

        let hood = assemble_neighborhood("http://ns#Smith", &bindings);

        // One node for NL, but two distinct relation instances.
        assert_eq!(hood.nodes.len(), 2);
        assert_eq!(hood.edges.len(), 2);
        assert_ne!(hood.edges[0].id, hood.edges[1].id);
    }

    #[test]
    fn assemble_with_no_bindings_is_center_only() {
        let hood = assemble_neighborhood("http://ns#Lonely", &[]);
        assert_eq!(hood.nodes.len(), 1);
        assert!(hood.edges.is_empty());
    }

    #[test]
    fn var_values_skips_rows_missing_the_variable() {
        let bindings = vec![
            binding(&[("c", "http://ns#Student")]),
            binding(&[("x", "http://ns#other")]),
        ];
        assert_eq!(var_values(&bindings, "c"), vec!["http://ns#Student"]);
    }
}
