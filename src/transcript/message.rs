//! Transcript entries

use serde::{Deserialize, Serialize};

use crate::agent::QueryResponse;
use crate::table::TableResult;
use crate::viz::VisualizationSpec;

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Assistant,
    Error,
}

/// A single conversation entry.
///
/// Serialized with the same field names the analytics API uses, so the
/// transcript can be sent back verbatim as `history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visualizations: Vec<VisualizationSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableResult>,
}

impl Message {
    /// A question typed by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::User,
            content: content.into(),
            visualizations: Vec::new(),
            sql_query: None,
            table_data: None,
        }
    }

    /// An answer built from the API response body
    pub fn assistant(response: QueryResponse) -> Self {
        Self {
            kind: MessageKind::Assistant,
            content: response.text.unwrap_or_default(),
            visualizations: response.visualizations.unwrap_or_default(),
            sql_query: response.sql_query,
            table_data: response.table_data,
        }
    }

    /// A failed request, carrying the failure reason
    pub fn error(reason: impl std::fmt::Display) -> Self {
        Self {
            kind: MessageKind::Error,
            content: format!("Failed to get a response. {}", reason),
            visualizations: Vec::new(),
            sql_query: None,
            table_data: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    /// Generated SQL, if the answer carried a non-empty one
    pub fn sql(&self) -> Option<&str> {
        self.sql_query.as_deref().filter(|sql| !sql.trim().is_empty())
    }

    /// Result table, if the answer carried one worth showing
    pub fn result_table(&self) -> Option<&TableResult> {
        self.table_data.as_ref().filter(|table| table.is_renderable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_wire_shape() {
        let value = serde_json::to_value(Message::user("How many orders?")).unwrap();
        assert_eq!(value, json!({ "type": "user", "content": "How many orders?" }));
    }

    #[test]
    fn test_assistant_from_response() {
        let response: QueryResponse = serde_json::from_value(json!({
            "text": "Revenue grew 12%.",
            "sqlQuery": "SELECT 1",
            "tableData": { "columns": ["x"], "rows": [{ "x": 1 }] }
        }))
        .unwrap();

        let message = Message::assistant(response);
        assert_eq!(message.kind, MessageKind::Assistant);
        assert_eq!(message.content, "Revenue grew 12%.");
        assert_eq!(message.sql(), Some("SELECT 1"));
        assert!(message.visualizations.is_empty());
        assert!(message.result_table().is_some());
    }

    #[test]
    fn test_assistant_tolerates_nulls() {
        let response: QueryResponse = serde_json::from_value(json!({
            "text": null,
            "visualizations": null,
            "tableData": null
        }))
        .unwrap();

        let message = Message::assistant(response);
        assert_eq!(message.content, "");
        assert!(message.visualizations.is_empty());
        assert!(message.table_data.is_none());
    }

    #[test]
    fn test_error_message_content() {
        let message = Message::error("Error: 502");
        assert!(message.is_error());
        assert_eq!(message.content, "Failed to get a response. Error: 502");
    }

    #[test]
    fn test_blank_sql_is_hidden() {
        let mut message = Message::user("q");
        message.sql_query = Some("   ".to_string());
        assert_eq!(message.sql(), None);
    }

    #[test]
    fn test_visualizations_echo_back_unchanged() {
        let chart = json!({
            "type": "pie",
            "title": "Share",
            "valueKey": "v",
            "nameKey": "n",
            "innerRadius": 40,
            "colors": ["#ff0000", null],
            "data": [{ "n": "A", "v": 1 }]
        });
        let response: QueryResponse =
            serde_json::from_value(json!({ "text": "ok", "visualizations": [chart.clone()] }))
                .unwrap();

        let message = Message::assistant(response);
        assert!(message.visualizations[0].chart().is_some());

        let sent = serde_json::to_value(&message).unwrap();
        assert_eq!(sent["visualizations"], json!([chart]));
    }
}
