//! Conversation Transcript
//!
//! The ordered record of a conversation with the analytics agent, and the
//! controller that drives it.
//!
//! ## Invariants
//!
//! - Entries are only ever appended; nothing reorders or edits them.
//! - Every accepted submission adds exactly two entries: the user's
//!   question, then an assistant answer or an error.

mod controller;
mod message;

pub use controller::TranscriptController;
pub use message::{Message, MessageKind};

use serde::{Deserialize, Serialize};

/// Append-only, chronologically ordered list of messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end
    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
