//! Conversation State
//!
//! Reactive transcript and request state using Leptos signals.

use leptos::*;

use super::model::Message;
use crate::api;

/// Conversation state provided to all components
#[derive(Clone, Copy)]
pub struct ChatState {
    /// Transcript, oldest first; only ever appended to
    pub messages: RwSignal<Vec<Message>>,
    /// Text in the question box
    pub input: RwSignal<String>,
    /// A request is in flight
    pub loading: RwSignal<bool>,
    /// Reason for the last failed request
    pub error: RwSignal<Option<String>>,
    /// Connection indicator in the header
    pub connected: RwSignal<bool>,
}

/// Provide chat state to the component tree
pub fn provide_chat_state() {
    provide_context(ChatState::new());
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: create_rw_signal(Vec::new()),
            input: create_rw_signal(String::new()),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
            connected: create_rw_signal(true),
        }
    }

    /// Send the current input with the transcript so far.
    ///
    /// Blank input does nothing. Loading is cleared and the input emptied
    /// once the request settles, whether it succeeded or not.
    pub fn submit(&self) {
        let query = self.input.get_untracked();
        if query.trim().is_empty() {
            return;
        }

        let history = self.messages.get_untracked();
        self.messages.update(|m| m.push(Message::user(&query)));
        self.loading.set(true);
        self.error.set(None);

        let state = *self;
        spawn_local(async move {
            match api::send_query(&query, &history).await {
                Ok(response) => {
                    state.messages.update(|m| m.push(Message::assistant(response)));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Error: {}", e).into());
                    state.messages.update(|m| m.push(Message::error(&e)));
                    state.error.set(Some(e));
                }
            }
            state.loading.set(false);
            state.input.set(String::new());
        });
    }

    pub fn toggle_connected(&self) {
        self.connected.update(|c| *c = !*c);
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible rows for the question box: one per line, capped at four
pub fn textarea_rows(input: &str) -> usize {
    input.split('\n').count().clamp(1, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textarea_rows() {
        assert_eq!(textarea_rows(""), 1);
        assert_eq!(textarea_rows("one line"), 1);
        assert_eq!(textarea_rows("a\nb\nc"), 3);
        assert_eq!(textarea_rows("a\nb\nc\nd\ne\nf"), 4);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let runtime = create_runtime();

        let state = ChatState::new();
        state.input.set("   \n ".to_string());
        state.submit();

        assert!(state.messages.get_untracked().is_empty());
        assert!(!state.loading.get_untracked());
        assert_eq!(state.input.get_untracked(), "   \n ");

        runtime.dispose();
    }

    #[test]
    fn test_toggle_connected() {
        let runtime = create_runtime();

        let state = ChatState::new();
        assert!(state.connected.get_untracked());
        state.toggle_connected();
        assert!(!state.connected.get_untracked());

        runtime.dispose();
    }
}
