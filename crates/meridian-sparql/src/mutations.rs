//! Write operations against the SPARQL store.
//!
//! Individual creation is guarded by `FILTER NOT EXISTS`, so re-submitting
//! the same name is a server-side no-op. Relation creation is a plain
//! `INSERT DATA`; the store keys relation instances by their full triple.

use meridian_core::{EntityId, FetchError};

use crate::client::SparqlClient;

impl SparqlClient {
    /// Create a new individual of `class_uri` under the configured
    /// namespace.
    ///
    /// Returns the minted entity id so the caller can expand it into the
    /// visible graph.
    pub async fn create_individual(
        &self,
        class_uri: &str,
        name: &str,
    ) -> Result<EntityId, FetchError> {
        let local = mint_local(name);
        if local.is_empty() || class_uri.is_empty() {
            return Err(FetchError::InvalidInput(
                "class and name are both required".to_string(),
            ));
        }

        let namespace = &self.config().namespace;
        let query = format!(
            "PREFIX : <{namespace}>
             INSERT {{
               :{local} a <{class_uri}> .
             }}
             WHERE {{
               FILTER NOT EXISTS {{ :{local} a ?existing }}
             }}"
        );
        self.update(&query).await?;

        let minted = EntityId::new(format!("{namespace}{local}"));
        tracing::info!(entity = %minted, class = %class_uri, "individual created");
        Ok(minted)
    }

    /// Assert a relation triple between two existing individuals.
    pub async fn create_relation(
        &self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<(), FetchError> {
        if subject.is_empty() || predicate.is_empty() || object.is_empty() {
            return Err(FetchError::InvalidInput(
                "subject, predicate, and object are all required".to_string(),
            ));
        }

        let query = format!(
            "INSERT DATA {{
               <{subject}> <{predicate}> <{object}> .
             }}"
        );
        self.update(&query).await?;

        tracing::info!(%subject, %predicate, %object, "relation created");
        Ok(())
    }
}

/// Turn a display name into a local name: trimmed, inner whitespace runs
/// collapsed to single underscores.
fn mint_local(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}
