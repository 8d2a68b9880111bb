//! UI Components
//!
//! Reusable Leptos components for the chat view.

pub mod chart;
pub mod error_banner;
pub mod header;
pub mod loading;
pub mod message;
pub mod results_table;

pub use error_banner::ErrorBanner;
pub use header::Header;
pub use loading::{AnswerSkeleton, InlineLoading};
pub use message::MessageBubble;
