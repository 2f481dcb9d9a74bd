//! meridian-core: Shared types and boundary contracts for Meridian.
//!
//! This crate provides the foundational pieces used across all Meridian
//! components:
//! - Graph domain types (`EntityId`, `Node`, `Edge`, `GraphSnapshot`)
//! - Raw record types crossing the remote-accessor boundary
//! - The `NeighborhoodSource` trait the merge engine fetches through
//! - Identity normalization for IRI-style identifiers
//! - The `FetchError` boundary error

pub mod error;
pub mod identity;
pub mod source;
pub mod types;

pub use error::FetchError;
pub use source::{AskResponse, EdgeRecord, Neighborhood, NeighborhoodSource, NodeRecord};
pub use types::{Edge, EntityId, GraphSnapshot, LabelPolicy, Node, RelationId};
