//! Visualization Specs
//!
//! Server-provided chart descriptions attached to assistant answers, and
//! their terminal rendering.
//!
//! ## Wire shape
//!
//! Every spec is a JSON object tagged by `type`:
//!
//! - `bar` / `line`: `title`, `data`, `xAxis`, `series: [{ dataKey, color? }]`
//! - `pie`: `title`, `data`, `valueKey`, `nameKey`, `colors?`
//! - `table`: `title`, `data` (columns are the keys of the first record)
//!
//! The raw JSON of every spec is kept and serialized back unchanged, so the
//! conversation history echoes exactly what the server sent. Specs of any
//! other type, or that don't parse, render nothing.

mod render;

pub use render::{random_color, render_visualization, LegendEntry, RenderedChart};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One data record, keyed by field name in the order the server sent them
pub type Record = Map<String, Value>;

/// A visualization as received from the analytics API
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationSpec {
    raw: Value,
    chart: Option<Visualization>,
}

impl VisualizationSpec {
    pub fn from_value(raw: Value) -> Self {
        let chart = match Visualization::deserialize(&raw) {
            Ok(chart) => Some(chart),
            Err(e) => {
                tracing::debug!(error = %e, "Visualization will not be drawn");
                None
            }
        };
        Self { raw, chart }
    }

    /// Parsed chart, if the type is one this client draws
    pub fn chart(&self) -> Option<&Visualization> {
        self.chart.as_ref()
    }
}

impl Serialize for VisualizationSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VisualizationSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Known chart types, dispatched on the `type` tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Visualization {
    Bar(CartesianChart),
    Line(CartesianChart),
    Pie(PieChart),
    Table(TableChart),
}

/// Bar and line charts: one category axis, one or more value series
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartesianChart {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: Vec<Record>,
    /// Record key holding the category label
    #[serde(default)]
    pub x_axis: String,
    #[serde(default)]
    pub series: Vec<Series>,
}

/// A single plotted series
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Record key holding this series' values
    pub data_key: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Series {
    /// Label shown in the legend
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.data_key)
    }

    /// Explicit color, if one was given; an empty string counts as none
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub value_key: String,
    #[serde(default)]
    pub name_key: String,
    /// Slice colors, index-aligned with `data`; gaps may be null
    #[serde(default)]
    pub colors: Option<Vec<Option<String>>>,
}

impl PieChart {
    /// Explicit color of slice `idx`, if one was given
    pub fn slice_color(&self, idx: usize) -> Option<&str> {
        self.colors
            .as_ref()?
            .get(idx)?
            .as_deref()
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableChart {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: Vec<Record>,
}

/// Read a record field as a number.
///
/// Numeric strings are accepted, since chart libraries coerce them too.
pub fn numeric_field(record: &Record, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
