//! Client for the natural-language query service.
//!
//! The service translates a question into SPARQL, runs it, and returns the
//! generated query plus structured result rows. Translation failures arrive
//! as a populated `error` field on a successful transport call — surfaced to
//! the caller for display, never raised as an `Err`.

use std::time::Duration;

use meridian_core::{AskResponse, FetchError};

use crate::client::{check_status, SparqlConfig};

/// HTTP client for the `/query` endpoint of the companion API.
#[derive(Debug, Clone)]
pub struct NlqClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl NlqClient {
    /// Build a client from the shared configuration.
    pub fn new(config: &SparqlConfig) -> Result<Self, FetchError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{}/query", config.api_endpoint.trim_end_matches('/')),
            timeout,
        })
    }

    /// Ask a natural-language question about the graph.
    pub async fn ask(&self, question: &str) -> Result<AskResponse, FetchError> {
        if question.trim().is_empty() {
            return Err(FetchError::InvalidInput("question is empty".to_string()));
        }

        tracing::debug!(endpoint = %self.endpoint, "asking NL query service");

        // The service expects the question as a query parameter, not a body.
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("question", question)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.timeout)
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        let response = check_status(response).await?;
        let answer: AskResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("invalid query response: {e}")))?;

        if let Some(err) = &answer.error {
            tracing::warn!(error = %err, "NL query service reported an error");
        }
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_derived_from_api_base() {
        let config = SparqlConfig {
            api_endpoint: "http://localhost:8000/".to_string(),
            ..Default::default()
        };
        let client = NlqClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "http://localhost:8000/query");
    }

    #[tokio::test]
    async fn empty_question_is_rejected_before_any_call() {
        let client = NlqClient::new(&SparqlConfig::default()).unwrap();
        let err = client.ask("   ").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidInput(_)));
    }
}
