//! Meridian SPARQL — HTTP accessor for the remote knowledge graph.
//!
//! This crate is the single point of remote access. All reads (neighborhood
//! and vocabulary queries), writes (individual and relation creation), and
//! natural-language questions flow through here so that endpoint handling,
//! timeouts, and error mapping stay consistent.

pub mod client;
pub mod mutations;
pub mod nlq;
pub mod queries;

pub use client::{SparqlClient, SparqlConfig};
pub use nlq::NlqClient;
