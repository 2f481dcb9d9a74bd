//! Endpoint configuration and shared SPARQL protocol plumbing.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use meridian_core::FetchError;

/// Configuration for the remote SPARQL store and its companion API.
///
/// Loaded from `meridian.toml` `[sparql]` section or `MERIDIAN__SPARQL__`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlConfig {
    /// SPARQL query endpoint (SELECT).
    #[serde(default = "default_query_endpoint")]
    pub query_endpoint: String,

    /// SPARQL update endpoint (INSERT).
    #[serde(default = "default_update_endpoint")]
    pub update_endpoint: String,

    /// Base URL of the companion API hosting the natural-language query
    /// service.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Namespace new individuals are minted under. Must end in `#` or `/`.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_query_endpoint() -> String {
    "http://localhost:3030/kg/sparql".to_string()
}

fn default_update_endpoint() -> String {
    "http://localhost:3030/kg/update".to_string()
}

fn default_api_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_namespace() -> String {
    "http://example.org/kg#".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            query_endpoint: default_query_endpoint(),
            update_endpoint: default_update_endpoint(),
            api_endpoint: default_api_endpoint(),
            namespace: default_namespace(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// One term of a SPARQL SELECT binding. Only the value is retained.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlTerm {
    pub value: String,
}

/// One result row: variable name → bound term.
pub type Binding = HashMap<String, SparqlTerm>;

#[derive(Debug, Deserialize)]
struct SelectDocument {
    results: SelectBindings,
}

#[derive(Debug, Deserialize)]
struct SelectBindings {
    bindings: Vec<Binding>,
}

/// HTTP client for the SPARQL protocol.
///
/// Clone is cheap (the inner reqwest client is an Arc).
#[derive(Debug, Clone)]
pub struct SparqlClient {
    http: reqwest::Client,
    config: SparqlConfig,
}

impl SparqlClient {
    /// Build a client from the given configuration.
    pub fn new(config: SparqlConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SparqlConfig {
        &self.config
    }

    /// Execute a SELECT query and return its result rows.
    pub async fn select(&self, query: &str) -> Result<Vec<Binding>, FetchError> {
        tracing::debug!(endpoint = %self.config.query_endpoint, "SPARQL SELECT");

        let response = self
            .http
            .get(&self.config.query_endpoint)
            .query(&[("query", query)])
            .header("Accept", "application/sparql-results+json")
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let response = check_status(response).await?;
        let doc: SelectDocument = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("invalid SELECT result document: {e}")))?;

        Ok(doc.results.bindings)
    }

    /// Execute an UPDATE query (INSERT).
    pub async fn update(&self, query: &str) -> Result<(), FetchError> {
        tracing::debug!(endpoint = %self.config.update_endpoint, "SPARQL UPDATE");

        let response = self
            .http
            .post(&self.config.update_endpoint)
            .header("Content-Type", "application/sparql-update")
            .body(query.to_string())
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        check_status(response).await?;
        Ok(())
    }

    fn map_transport(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(Duration::from_secs(self.config.timeout_secs))
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Turn a non-2xx response into `FetchError::Remote`, keeping the body.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(FetchError::Remote {
        status: status.as_u16(),
        body,
    })
}
