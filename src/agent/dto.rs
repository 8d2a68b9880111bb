//! Request and response bodies for the analytics API.

use serde::{Deserialize, Serialize};

use crate::table::TableResult;
use crate::transcript::Message;
use crate::viz::VisualizationSpec;

/// POST body: the new question plus everything said so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub history: Vec<Message>,
}

/// Answer body. Every field is optional; `null` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub visualizations: Option<Vec<VisualizationSpec>>,
    #[serde(default)]
    pub sql_query: Option<String>,
    #[serde(default)]
    pub table_data: Option<TableResult>,
}
