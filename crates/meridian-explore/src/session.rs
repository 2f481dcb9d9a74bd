//! The exploration session: merge engine + expansion tracker.
//!
//! A session owns one [`GraphStore`] and grows it by expanding entities:
//! fetch the neighborhood, normalize the records, apply idempotent upserts,
//! mark the entity expanded. Because the upserts are idempotent and merges
//! never remove anything, the final graph state after any sequence of
//! successful expansions depends only on the *set* of entities expanded —
//! not on the order or repetition of the calls.
//!
//! Merges apply only after a complete fetch, so a failed or timed-out fetch
//! leaves the store exactly as it was.

use std::collections::HashSet;
use std::time::Duration;

use meridian_core::identity::local_name;
use meridian_core::{
    EntityId, FetchError, GraphSnapshot, LabelPolicy, Neighborhood, NeighborhoodSource,
};

use crate::error::{ExploreError, Result};
use crate::store::GraphStore;

/// Stamp tying an in-flight expansion to the session state it started from.
///
/// `clear()` advances the session's generation; a merge completion carrying
/// an older stamp is discarded rather than resurrecting pre-clear state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// What happened to one merge application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The neighborhood was merged. Counts are the *new* entries only;
    /// both are zero when everything was already present.
    Applied {
        nodes_added: usize,
        edges_added: usize,
    },
    /// The session was cleared while the fetch was in flight; the result
    /// was discarded and the store left untouched.
    Stale,
}

impl MergeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Session-scoped exploration state: the accumulated graph, the set of
/// already-expanded entities, and the clear-generation counter.
///
/// Created empty at session start; reset as one unit by [`clear`]. All
/// mutation goes through `&mut self`, so each merge application is a single
/// uninterrupted step even when fetches run concurrently through the
/// split-phase API.
///
/// [`clear`]: ExploreSession::clear
#[derive(Debug, Default)]
pub struct ExploreSession {
    store: GraphStore,
    expanded: HashSet<EntityId>,
    generation: u64,
}

impl ExploreSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_policy(label_policy: LabelPolicy) -> Self {
        Self {
            store: GraphStore::with_label_policy(label_policy),
            ..Self::default()
        }
    }

    /// Expand one entity: fetch its neighborhood, bounded by `timeout`, and
    /// merge it into the session graph.
    ///
    /// Expanding an already-expanded entity is permitted and converges to
    /// the same state — callers wanting to avoid the redundant fetch can
    /// consult [`is_expanded`](Self::is_expanded) first.
    pub async fn expand<S: NeighborhoodSource>(
        &mut self,
        source: &S,
        entity: &str,
        timeout: Duration,
    ) -> Result<MergeOutcome> {
        if entity.is_empty() {
            return Err(ExploreError::InvalidInput(
                "entity reference is empty".to_string(),
            ));
        }

        let generation = self.begin_expansion();
        let fetched = tokio::time::timeout(timeout, source.fetch_neighborhood(entity))
            .await
            .map_err(|_| FetchError::Timeout(timeout))?;
        let neighborhood = fetched?;

        Ok(self.apply_neighborhood(generation, entity, &neighborhood))
    }

    /// Capture the current generation before starting an independent fetch.
    ///
    /// Pair with [`apply_neighborhood`](Self::apply_neighborhood) when the
    /// caller drives its own fetch concurrency.
    pub fn begin_expansion(&self) -> Generation {
        Generation(self.generation)
    }

    /// Apply one fetched neighborhood as a single merge step.
    ///
    /// Discards the result when `generation` predates the latest
    /// [`clear`](Self::clear). On success the records are normalized
    /// (absent labels derived from the id, empty-id records dropped),
    /// upserted, and `entity` is marked expanded.
    pub fn apply_neighborhood(
        &mut self,
        generation: Generation,
        entity: &str,
        neighborhood: &Neighborhood,
    ) -> MergeOutcome {
        if generation.0 != self.generation {
            tracing::debug!(
                entity,
                stale = generation.0,
                current = self.generation,
                "discarding merge from a cleared generation"
            );
            return MergeOutcome::Stale;
        }

        let mut nodes_added = 0;
        for record in &neighborhood.nodes {
            let label = record
                .label
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| local_name(&record.id));
            if self.store.upsert_node(&record.id, label) {
                nodes_added += 1;
            }
        }

        let mut edges_added = 0;
        for record in &neighborhood.edges {
            let label = record
                .label
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| local_name(&record.id));
            if self
                .store
                .upsert_edge(&record.id, &record.source, &record.target, label)
            {
                edges_added += 1;
            }
        }

        self.expanded.insert(EntityId::new(entity));
        tracing::debug!(entity, nodes_added, edges_added, "neighborhood merged");

        MergeOutcome::Applied {
            nodes_added,
            edges_added,
        }
    }

    /// Reset the session to its start-of-life state: empty store, empty
    /// expansion tracker, and a new generation so in-flight expansions are
    /// discarded on arrival.
    pub fn clear(&mut self) {
        self.store.clear();
        self.expanded.clear();
        self.generation += 1;
        tracing::info!(generation = self.generation, "session cleared");
    }

    /// Whether `entity` has been the subject of a successful expansion.
    pub fn is_expanded(&self, entity: &str) -> bool {
        self.expanded.contains(&EntityId::new(entity))
    }

    /// The entities expanded so far, in no particular order.
    pub fn expanded(&self) -> impl Iterator<Item = &EntityId> {
        self.expanded.iter()
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.store.snapshot()
    }
}
