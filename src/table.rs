//! Result Tables
//!
//! The raw query result attached to an answer (`tableData`), its text grid
//! and its CSV export.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

use crate::viz::Record;

/// File name used for CSV exports unless configured otherwise
pub const DEFAULT_EXPORT_FILENAME: &str = "query_results.csv";

/// Tabular query result: ordered column names plus rows keyed by them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Record>,
}

impl TableResult {
    /// Tables with no columns or no rows are not shown
    pub fn is_renderable(&self) -> bool {
        !self.columns.is_empty() && !self.rows.is_empty()
    }

    /// Render as an aligned text grid, or `None` if there is nothing to show
    pub fn render_lines(&self) -> Option<Vec<String>> {
        if !self.is_renderable() {
            return None;
        }
        Some(render_grid(&self.columns, &self.rows))
    }

    /// Serialize as CSV.
    ///
    /// The header row holds the column names; every data cell is quoted,
    /// with embedded quotes doubled.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        if self.columns.is_empty() {
            return Err(ExportError::NoTable);
        }

        let mut buf = Vec::new();
        {
            let mut header = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Necessary)
                .from_writer(&mut buf);
            header.write_record(&self.columns)?;
            header.flush()?;
        }
        {
            let mut body = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Always)
                .from_writer(&mut buf);
            for row in &self.rows {
                body.write_record(self.columns.iter().map(|col| cell_text(row.get(col))))?;
            }
            body.flush()?;
        }

        String::from_utf8(buf)
            .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Write the CSV export to `path`, creating parent directories as needed
    pub fn export_csv(&self, path: &Path) -> Result<(), ExportError> {
        let csv = self.to_csv()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, csv)?;

        tracing::info!(path = ?path, rows = self.rows.len(), "Exported query results");
        Ok(())
    }
}

/// Display text for a cell. Missing and `null` cells are empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Lay out rows as a `|`-separated grid with a header and rule
pub fn render_grid(columns: &[String], rows: &[Record]) -> Vec<String> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|col| cell_text(row.get(col))).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            cells
                .iter()
                .map(|row| row[idx].chars().count())
                .chain(std::iter::once(col.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |values: &[String]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format_row(columns));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(cells.iter().map(|row| format_row(row)));
    lines
}

/// Errors from exporting result tables
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No result table to export")]
    NoTable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
