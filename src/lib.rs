//! # Data Agent
//!
//! Conversational client for a natural-language analytics API. Ask a
//! business question, get back a written answer, the SQL that produced it,
//! charts, and the raw result table.
//!
//! ## Modules
//!
//! - [`transcript`]: Append-only conversation log and its controller
//! - [`agent`]: The analytics API contract and HTTP client
//! - [`viz`]: Chart specs and their terminal rendering
//! - [`table`]: Result tables and CSV export
//! - [`display`]: Terminal rendering of whole messages
//! - [`chat`]: Suggested questions and chat commands
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use data_agent::{AgentClient, Config, TranscriptController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = AgentClient::new(config.agent)?;
//!     let mut controller = TranscriptController::new(client);
//!
//!     controller.set_input("What were our top-performing products last quarter?");
//!     if let Some(reply) = controller.submit().await {
//!         println!("{}", reply.content);
//!     }
//!
//!     if let Some(table) = controller.latest_table() {
//!         table.export_csv(&config.export.csv_path())?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod chat;
pub mod config;
pub mod display;
pub mod table;
pub mod transcript;
pub mod viz;

pub use agent::{AgentClient, AgentError, QueryBackend, QueryRequest, QueryResponse};

pub use transcript::{Message, MessageKind, Transcript, TranscriptController};

pub use viz::{
    render_visualization, CartesianChart, PieChart, Record, RenderedChart, Series, TableChart,
    Visualization, VisualizationSpec,
};

pub use table::{ExportError, TableResult, DEFAULT_EXPORT_FILENAME};

pub use config::{AgentConfig, Config, ConfigError, ExportConfig, LoggingConfig};
