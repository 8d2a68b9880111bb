//! Analytics API
//!
//! The single remote call this client makes: POST a question plus the
//! conversation so far, get back text, SQL, charts and a result table.
//!
//! - **QueryBackend**: the seam the transcript controller talks to
//! - **AgentClient**: the HTTP implementation over `reqwest`

mod client;
mod dto;

pub use client::{AgentClient, AgentError};
pub use dto::{QueryRequest, QueryResponse};

use async_trait::async_trait;

/// Something that can answer a question in the context of a conversation
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Issue exactly one request. Implementations must not retry.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, AgentError>;
}
