//! State Management
//!
//! Conversation state and the wire types it holds.

pub mod chat;
pub mod model;

pub use chat::{provide_chat_state, ChatState};
