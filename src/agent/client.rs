//! Analytics API Client
//!
//! HTTP client for the natural-language query endpoint.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::{QueryBackend, QueryRequest, QueryResponse};
use crate::config::AgentConfig;

/// HTTP client for the analytics API
pub struct AgentClient {
    client: Client,
    config: AgentConfig,
}

impl AgentClient {
    /// Create a new client with the given configuration
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl QueryBackend for AgentClient {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, AgentError> {
        tracing::info!(
            endpoint = %self.config.endpoint,
            history = request.history.len(),
            "Sending question to analytics API"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout
                } else if e.is_connect() {
                    AgentError::Unavailable
                } else {
                    AgentError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Analytics API returned an error status");
            return Err(AgentError::Status {
                status: status.as_u16(),
            });
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Decode(e.to_string()))?;

        tracing::debug!(
            visualizations = body.visualizations.as_ref().map_or(0, Vec::len),
            has_sql = body.sql_query.is_some(),
            has_table = body.table_data.is_some(),
            "Received answer"
        );

        Ok(body)
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the analytics API
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Error: {status}")]
    Status { status: u16 },

    #[error("Analytics API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(String),
}
