//! Transcript controller
//!
//! Owns the transcript plus the input and busy/error state of one
//! conversation, and turns a submission into exactly one API call.

use super::{Message, Transcript};
use crate::agent::{QueryBackend, QueryRequest};
use crate::table::TableResult;

/// Drives a conversation against a [`QueryBackend`]
pub struct TranscriptController<B> {
    backend: B,
    transcript: Transcript,
    input: String,
    busy: bool,
    last_error: Option<String>,
}

impl<B: QueryBackend> TranscriptController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            transcript: Transcript::new(),
            input: String::new(),
            busy: false,
            last_error: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.entries()
    }

    /// True while a request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Text of the most recent failure, cleared when the next submission starts
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Most recent result table worth showing
    pub fn latest_table(&self) -> Option<&TableResult> {
        self.transcript.iter().rev().find_map(Message::result_table)
    }

    /// Submit the current input.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the question is
    /// appended, sent along with the prior transcript, and the answer (or
    /// the error) is appended and returned. The input is cleared and the
    /// busy flag dropped whatever the outcome.
    pub async fn submit(&mut self) -> Option<&Message> {
        if self.input.trim().is_empty() {
            return None;
        }

        let request = QueryRequest {
            query: self.input.clone(),
            history: self.transcript.entries().to_vec(),
        };

        self.transcript.append(Message::user(self.input.clone()));
        self.busy = true;
        self.last_error = None;

        tracing::debug!(history = request.history.len(), "Submitting question");

        let reply = match self.backend.query(&request).await {
            Ok(response) => Message::assistant(response),
            Err(e) => {
                tracing::warn!(error = %e, "Query failed");
                self.last_error = Some(e.to_string());
                Message::error(&e)
            }
        };

        self.transcript.append(reply);
        self.busy = false;
        self.input.clear();

        self.transcript.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentError, QueryResponse};
    use crate::transcript::MessageKind;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Backend that replays canned outcomes and records what it was sent
    #[derive(Default)]
    struct ScriptedBackend {
        outcomes: Mutex<VecDeque<Result<QueryResponse, AgentError>>>,
        requests: Mutex<Vec<QueryRequest>>,
    }

    impl ScriptedBackend {
        fn with(outcomes: Vec<Result<QueryResponse, AgentError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<QueryRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueryBackend for ScriptedBackend {
        async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, AgentError> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(AgentError::Unavailable))
        }
    }

    fn answer(text: &str) -> Result<QueryResponse, AgentError> {
        Ok(QueryResponse {
            text: Some(text.to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_submit_appends_question_and_answer() {
        let mut controller = TranscriptController::new(ScriptedBackend::with(vec![answer("42")]));
        controller.set_input("How many customers churned?");

        let reply = controller.submit().await.cloned().unwrap();

        assert_eq!(reply.kind, MessageKind::Assistant);
        assert_eq!(reply.content, "42");

        let messages = controller.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::user("How many customers churned?"));
        assert_eq!(messages[1], reply);
        assert!(!controller.is_busy());
        assert_eq!(controller.input(), "");
        assert_eq!(controller.last_error(), None);
    }

    #[tokio::test]
    async fn test_blank_input_is_noop() {
        let mut controller = TranscriptController::new(ScriptedBackend::default());

        for blank in ["", "   ", "\n\t"] {
            controller.set_input(blank);
            assert!(controller.submit().await.is_none());
        }

        assert!(controller.messages().is_empty());
        assert!(controller.backend().requests().is_empty());
    }

    #[tokio::test]
    async fn test_failure_appends_error_and_keeps_history() {
        let mut controller = TranscriptController::new(ScriptedBackend::with(vec![
            answer("first answer"),
            Err(AgentError::Status { status: 500 }),
        ]));

        controller.set_input("first");
        controller.submit().await;
        let before: Vec<Message> = controller.messages().to_vec();

        controller.set_input("second");
        let reply = controller.submit().await.cloned().unwrap();

        assert!(reply.is_error());
        assert!(reply.content.contains("Error: 500"));
        assert_eq!(controller.last_error(), Some("Error: 500"));

        let messages = controller.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(&messages[..2], &before[..]);
        assert_eq!(messages[2], Message::user("second"));
        assert!(!controller.is_busy());
        assert_eq!(controller.input(), "");
    }

    #[tokio::test]
    async fn test_error_is_cleared_by_next_submission() {
        let mut controller = TranscriptController::new(ScriptedBackend::with(vec![
            Err(AgentError::Timeout),
            answer("ok"),
        ]));

        controller.set_input("one");
        controller.submit().await;
        assert!(controller.last_error().is_some());

        controller.set_input("two");
        controller.submit().await;
        assert_eq!(controller.last_error(), None);
    }

    #[tokio::test]
    async fn test_history_excludes_current_question() {
        let mut controller = TranscriptController::new(ScriptedBackend::with(vec![
            answer("a1"),
            answer("a2"),
        ]));

        controller.set_input("q1");
        controller.submit().await;
        controller.set_input("  q2  ");
        controller.submit().await;

        let requests = controller.backend().requests();
        assert_eq!(requests.len(), 2);

        assert_eq!(requests[0].query, "q1");
        assert!(requests[0].history.is_empty());

        assert_eq!(requests[1].query, "  q2  ");
        assert_eq!(requests[1].history.len(), 2);
        assert_eq!(requests[1].history[0].content, "q1");
        assert_eq!(requests[1].history[1].content, "a1");
    }

    #[tokio::test]
    async fn test_latest_table_skips_empty_tables() {
        let with_table: QueryResponse = serde_json::from_value(json!({
            "text": "here",
            "tableData": { "columns": ["region"], "rows": [{ "region": "West" }] }
        }))
        .unwrap();
        let empty_table: QueryResponse = serde_json::from_value(json!({
            "text": "nothing",
            "tableData": { "columns": ["region"], "rows": [] }
        }))
        .unwrap();

        let mut controller = TranscriptController::new(ScriptedBackend::with(vec![
            Ok(with_table),
            Ok(empty_table),
        ]));
        assert!(controller.latest_table().is_none());

        controller.set_input("q1");
        controller.submit().await;
        controller.set_input("q2");
        controller.submit().await;

        let table = controller.latest_table().unwrap();
        assert_eq!(table.rows[0]["region"], "West");
    }
}
