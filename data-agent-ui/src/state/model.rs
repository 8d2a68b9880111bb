//! Wire Types
//!
//! Messages, chart specs and result tables exchanged with the analytics API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One data record, keys in the order the server sent them
pub type Record = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Assistant,
    Error,
}

/// A transcript entry; sent back verbatim as `history`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visualizations: Vec<VisualizationSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableResult>,
}

impl Message {
    pub fn user(content: &str) -> Self {
        Self {
            kind: MessageKind::User,
            content: content.to_string(),
            visualizations: Vec::new(),
            sql_query: None,
            table_data: None,
        }
    }

    pub fn assistant(response: QueryResponse) -> Self {
        Self {
            kind: MessageKind::Assistant,
            content: response.text.unwrap_or_default(),
            visualizations: response.visualizations.unwrap_or_default(),
            sql_query: response.sql_query.filter(|sql| !sql.is_empty()),
            table_data: response.table_data,
        }
    }

    pub fn error(reason: &str) -> Self {
        Self {
            kind: MessageKind::Error,
            content: format!("Failed to get a response. {}", reason),
            visualizations: Vec::new(),
            sql_query: None,
            table_data: None,
        }
    }
}

/// Answer body from the analytics API
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub visualizations: Option<Vec<VisualizationSpec>>,
    #[serde(default)]
    pub sql_query: Option<String>,
    #[serde(default)]
    pub table_data: Option<TableResult>,
}

/// Chart spec as received. The raw JSON goes back to the server untouched;
/// `chart` is set when the type is one this app draws.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizationSpec {
    raw: Value,
    chart: Option<Visualization>,
}

impl VisualizationSpec {
    pub fn from_value(raw: Value) -> Self {
        let chart = Visualization::deserialize(&raw).ok();
        Self { raw, chart }
    }

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

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Visualization {
    Bar(CartesianChart),
    Line(CartesianChart),
    Pie(PieChart),
    Table(TableChart),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartesianChart {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub x_axis: String,
    #[serde(default)]
    pub series: Vec<Series>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub data_key: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Series {
    /// Explicit color; an empty string counts as none
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
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
    #[serde(default)]
    pub colors: Option<Vec<Option<String>>>,
}

impl PieChart {
    /// Explicit color of slice `idx`; null and empty entries count as none
    pub fn slice_color(&self, idx: usize) -> Option<&str> {
        self.colors
            .as_ref()?
            .get(idx)?
            .as_deref()
            .filter(|c| !c.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TableChart {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: Vec<Record>,
}

/// Raw query result
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Record>,
}

impl TableResult {
    pub fn is_renderable(&self) -> bool {
        !self.columns.is_empty() && !self.rows.is_empty()
    }
}

/// Display text for a cell; missing and `null` are blank
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Numeric value of a record field, accepting numeric strings
pub fn numeric_field(record: &Record, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
