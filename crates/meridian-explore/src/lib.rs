//! meridian-explore: Incremental graph assembly for the Meridian knowledge
//! graph.
//!
//! Accumulates a de-duplicated client-side subgraph by merging successive,
//! possibly-overlapping neighborhood fetches. The merge is idempotent and
//! commutative: the assembled graph depends only on which entities were
//! expanded, never on the order or repetition of the expansions. Also
//! renders natural-language query results as readable triples.

pub mod error;
pub mod format;
pub mod session;
pub mod store;

pub use error::ExploreError;
pub use session::{ExploreSession, Generation, MergeOutcome};
pub use store::GraphStore;
