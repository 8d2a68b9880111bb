//! Data Agent CLI
//!
//! Ask business questions about your data from the terminal:
//! - Chat interactively (default)
//! - Ask a single question
//! - List suggested questions
//! - Generate a config file

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use data_agent::chat::{example_question, help_text, ChatCommand, EXAMPLE_QUESTIONS};
use data_agent::display::{render_message, render_transcript, welcome};
use data_agent::config::Discovered;
use data_agent::{AgentClient, Config, LoggingConfig, Message, TranscriptController};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "data-agent")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ask business questions about your data in plain language")]
#[command(long_about = "AI Data Agent sends your questions to an analytics API and shows the answer,\nthe generated SQL, charts and the result table.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Analytics API query endpoint (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file (default: <config dir>/data-agent/config.toml or ./data-agent.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for answers
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Chat,

    /// Ask one question and print the answer
    Ask {
        /// The question
        #[arg(required = true)]
        question: Vec<String>,
        /// Write the result table as CSV to this path
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// List suggested questions
    Examples,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Rendered text with charts and tables
    Text,
    /// The transcript entry as JSON
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let discovered = match &cli.config {
        Some(path) => Discovered {
            config: Config::load_with_env(path)?,
            source: Some(path.clone()),
            failures: Vec::new(),
        },
        None => Config::discover(),
    };

    // Skipped config files are reported once the subscriber exists
    init_logging(&discovered.config.logging);
    discovered.log();

    let mut config = discovered.config;
    config.override_endpoint(cli.endpoint.clone());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&config, cli.format).await?,

        Commands::Ask { question, export } => {
            run_ask(&config, cli.format, question.join(" "), export).await?
        }

        Commands::Examples => {
            for (idx, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
                println!("{}. {}", idx + 1, question);
            }
        }

        Commands::Config { output } => {
            let content = data_agent::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with rendered answers
fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("data_agent={}", config.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_ask(
    config: &Config,
    format: OutputFormat,
    question: String,
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = AgentClient::new(config.agent.clone())?;
    let mut controller = TranscriptController::new(client);

    controller.set_input(question);
    let Some(reply) = controller.submit().await.cloned() else {
        anyhow::bail!("Question is empty");
    };

    print_message(&reply, format)?;
    if reply.is_error() {
        std::process::exit(1);
    }

    if let Some(path) = export {
        match controller.latest_table() {
            Some(table) => {
                table.export_csv(&path)?;
                eprintln!("Exported to {:?}", path);
            }
            None => eprintln!("No result table to export"),
        }
    }

    Ok(())
}

async fn run_chat(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let client = AgentClient::new(config.agent.clone())?;

    println!("{}", welcome());
    println!("Connected to {}. Type /help for commands.", client.endpoint());
    println!();

    let mut controller = TranscriptController::new(client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = String::new();

    loop {
        prompt(if pending.is_empty() { "› " } else { "… " })?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        // Trailing backslash continues the question on the next line
        if let Some(head) = line.strip_suffix('\\') {
            pending.push_str(head);
            pending.push('\n');
            continue;
        }
        pending.push_str(&line);
        let input = std::mem::take(&mut pending);

        match ChatCommand::parse(&input) {
            ChatCommand::Ask(question) => ask(&mut controller, question, format).await?,

            ChatCommand::Examples => {
                for (idx, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
                    println!("  {}. {}", idx + 1, question);
                }
            }

            ChatCommand::Example(number) => match example_question(number) {
                Some(question) => {
                    println!("you › {}", question);
                    ask(&mut controller, question.to_string(), format).await?;
                }
                None => eprintln!(
                    "No suggested question {} (choose 1-{})",
                    number,
                    EXAMPLE_QUESTIONS.len()
                ),
            },

            ChatCommand::Export(path) => {
                let path = path.unwrap_or_else(|| config.export.csv_path());
                match controller.latest_table() {
                    Some(table) => match table.export_csv(&path) {
                        Ok(()) => println!("Exported to {}", path.display()),
                        Err(e) => eprintln!("Export failed: {}", e),
                    },
                    None => println!("No result table to export yet."),
                }
            }

            ChatCommand::Save(path) => {
                let path = path.unwrap_or_else(|| {
                    config.export.path_for(&format!(
                        "transcript_{}.json",
                        Utc::now().format("%Y%m%d_%H%M%S")
                    ))
                });
                match save_transcript(&controller, &path) {
                    Ok(()) => println!("Conversation saved to {}", path.display()),
                    Err(e) => eprintln!("Save failed: {}", e),
                }
            }

            ChatCommand::History => {
                if controller.transcript().is_empty() {
                    println!("No messages yet.");
                } else {
                    print!(
                        "{}",
                        render_transcript(controller.transcript(), &mut rand::thread_rng())
                    );
                }
            }

            ChatCommand::Help => println!("{}", help_text()),

            ChatCommand::Quit => break,

            ChatCommand::Unknown(command) => {
                eprintln!("Unknown command: {} (try /help)", command)
            }
        }
    }

    Ok(())
}

async fn ask(
    controller: &mut TranscriptController<AgentClient>,
    question: String,
    format: OutputFormat,
) -> anyhow::Result<()> {
    controller.set_input(question);
    if !controller.input().trim().is_empty() {
        eprintln!("Thinking...");
    }

    if let Some(reply) = controller.submit().await {
        print_message(reply, format)?;
    }
    println!();

    Ok(())
}

fn print_message(message: &Message, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_message(message, &mut rand::thread_rng())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(message)?),
    }
    Ok(())
}

fn save_transcript(
    controller: &TranscriptController<AgentClient>,
    path: &Path,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(controller.transcript())?)?;
    tracing::info!(path = ?path, entries = controller.transcript().len(), "Saved conversation");
    Ok(())
}

fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", text)?;
    stdout.flush()
}
