//! HTTP API Client
//!
//! The one call this app makes: POST a question with the conversation so far.

use gloo_net::http::Request;

use crate::state::model::{Message, QueryResponse};

/// Default query endpoint
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/query";

/// Local storage key overriding the endpoint
const API_URL_KEY: &str = "data_agent_api_url";

/// Get the query endpoint from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

#[derive(serde::Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    history: &'a [Message],
}

/// Ask a question. Errors come back as display-ready strings.
pub async fn send_query(query: &str, history: &[Message]) -> Result<QueryResponse, String> {
    let response = Request::post(&get_api_base())
        .json(&QueryRequest { query, history })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
