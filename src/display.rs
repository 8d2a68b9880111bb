//! Terminal rendering of transcript entries.

use rand::Rng;

use crate::chat::EXAMPLE_QUESTIONS;
use crate::transcript::{Message, MessageKind, Transcript};
use crate::viz::render_visualization;

/// Greeting shown while the transcript is empty
pub fn welcome() -> String {
    let mut out = String::from(
        "Welcome to AI Data Agent\n\
         Ask complex business questions about your data and get instant insights.\n\
         \n\
         Try asking:\n",
    );
    for (idx, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", idx + 1, question));
    }
    out
}

/// Render one transcript entry with everything attached to it
pub fn render_message<R: Rng + ?Sized>(message: &Message, rng: &mut R) -> String {
    let label = match message.kind {
        MessageKind::User => "you",
        MessageKind::Assistant => "agent",
        MessageKind::Error => "error",
    };

    let mut out = prefixed(&format!("{} › ", label), &message.content);

    if let Some(sql) = message.sql() {
        out.push_str("\nGenerated SQL:\n");
        for line in sql.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }

    for chart in message
        .visualizations
        .iter()
        .filter_map(|spec| render_visualization(spec, rng))
    {
        out.push('\n');
        out.push_str(&chart.to_string());
    }

    if let Some(lines) = message.table_data.as_ref().and_then(|t| t.render_lines()) {
        out.push_str("\nQuery Results\n");
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("(use /export to save as CSV)\n");
    }

    out
}

/// Render every entry, separated by blank lines
pub fn render_transcript<R: Rng + ?Sized>(transcript: &Transcript, rng: &mut R) -> String {
    transcript
        .iter()
        .map(|message| render_message(message, rng))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First line after `prefix`, continuation lines indented to match
fn prefixed(prefix: &str, text: &str) -> String {
    let indent = " ".repeat(prefix.chars().count());
    let mut out = String::new();
    let mut lines = text.lines();

    out.push_str(prefix);
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    out.push('\n');
    for line in lines {
        out.push_str(&indent);
        out.push_str(line);
        out.push('\n');
    }
    out
}
