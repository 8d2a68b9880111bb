//! Interactive chat input
//!
//! Suggested questions and the slash commands understood by the terminal
//! chat session.

use std::path::PathBuf;

/// Questions offered on the welcome screen
pub const EXAMPLE_QUESTIONS: [&str; 5] = [
    "What were our top-performing products last quarter by revenue?",
    "Show me the trend of customer acquisition costs by channel over the past year",
    "Which sales regions had the highest growth rate compared to the same period last year?",
    "Analyze customer churn rates by demographic segment",
    "What's the correlation between marketing spend and revenue across different product categories?",
];

/// Look up a suggested question by its 1-based number
pub fn example_question(number: usize) -> Option<&'static str> {
    number.checked_sub(1).and_then(|idx| EXAMPLE_QUESTIONS.get(idx).copied())
}

/// One line of chat input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Plain text: a question for the agent (possibly blank)
    Ask(String),
    /// `/examples`
    Examples,
    /// `/example <n>`
    Example(usize),
    /// `/export [path]`
    Export(Option<PathBuf>),
    /// `/save [path]`
    Save(Option<PathBuf>),
    /// `/history`
    History,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// Anything else starting with `/`
    Unknown(String),
}

impl ChatCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return ChatCommand::Ask(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };

        match name {
            "examples" => ChatCommand::Examples,
            "example" => match arg.and_then(|a| a.parse().ok()) {
                Some(n) => ChatCommand::Example(n),
                None => ChatCommand::Unknown(trimmed.to_string()),
            },
            "export" => ChatCommand::Export(arg.map(PathBuf::from)),
            "save" => ChatCommand::Save(arg.map(PathBuf::from)),
            "history" => ChatCommand::History,
            "help" | "?" => ChatCommand::Help,
            "quit" | "exit" | "q" => ChatCommand::Quit,
            _ => ChatCommand::Unknown(trimmed.to_string()),
        }
    }
}

/// Help text for the chat session
pub fn help_text() -> &'static str {
    "Type a business question and press Enter. End a line with \\ to continue on the next one.\n\
     \n\
     Commands:\n  \
       /examples        list suggested questions\n  \
       /example <n>     ask suggested question n\n  \
       /export [path]   write the latest result table as CSV\n  \
       /save [path]     write the conversation as JSON\n  \
       /history         show the conversation so far\n  \
       /help            show this help\n  \
       /quit            leave"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            ChatCommand::parse("Which region grew fastest?"),
            ChatCommand::Ask("Which region grew fastest?".to_string())
        );
        assert_eq!(ChatCommand::parse("   "), ChatCommand::Ask("   ".to_string()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(ChatCommand::parse("/examples"), ChatCommand::Examples);
        assert_eq!(ChatCommand::parse("/example 3"), ChatCommand::Example(3));
        assert_eq!(ChatCommand::parse("/export"), ChatCommand::Export(None));
        assert_eq!(
            ChatCommand::parse("/export out/results.csv"),
            ChatCommand::Export(Some(PathBuf::from("out/results.csv")))
        );
        assert_eq!(ChatCommand::parse("/save  "), ChatCommand::Save(None));
        assert_eq!(ChatCommand::parse("  /quit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/exit"), ChatCommand::Quit);
    }

    #[test]
    fn test_bad_commands() {
        assert_eq!(
            ChatCommand::parse("/example two"),
            ChatCommand::Unknown("/example two".to_string())
        );
        assert_eq!(
            ChatCommand::parse("/frobnicate"),
            ChatCommand::Unknown("/frobnicate".to_string())
        );
    }

    #[test]
    fn test_example_lookup_is_one_based() {
        assert_eq!(example_question(1), Some(EXAMPLE_QUESTIONS[0]));
        assert_eq!(example_question(5), Some(EXAMPLE_QUESTIONS[4]));
        assert_eq!(example_question(0), None);
        assert_eq!(example_question(6), None);
    }
}
