//! Terminal chart rendering
//!
//! Turns a [`VisualizationSpec`] into plain text lines: proportional bars,
//! sparklines, pie shares and aligned grids.

use rand::Rng;
use std::fmt;

use super::{numeric_field, CartesianChart, PieChart, Record, TableChart, Visualization, VisualizationSpec};
use crate::table::{cell_text, render_grid};

/// Width in cells of a full-length bar
const BAR_WIDTH: usize = 32;

/// Sparkline levels, lowest to highest
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A chart ready to print
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub title: String,
    pub lines: Vec<String>,
    pub legend: Vec<LegendEntry>,
}

/// Legend swatch: what is drawn and in which color
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

impl fmt::Display for RenderedChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "─".repeat(self.title.chars().count().max(8)))?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        if !self.legend.is_empty() {
            let legend: Vec<String> = self
                .legend
                .iter()
                .map(|entry| format!("■ {} ({})", entry.label, entry.color))
                .collect();
            writeln!(f, "{}", legend.join("  "))?;
        }
        Ok(())
    }
}

/// Generate a random `#rrggbb` color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..=0xFF_FFFFu32))
}

fn color_or_random<R: Rng + ?Sized>(color: Option<&str>, rng: &mut R) -> String {
    match color {
        Some(color) => color.to_string(),
        None => random_color(rng),
    }
}

/// Render a visualization spec.
///
/// Returns `None` for unrecognized specs and for tables without data.
pub fn render_visualization<R: Rng + ?Sized>(
    spec: &VisualizationSpec,
    rng: &mut R,
) -> Option<RenderedChart> {
    match spec.chart()? {
        Visualization::Bar(chart) => Some(render_bar(chart, rng)),
        Visualization::Line(chart) => Some(render_line(chart, rng)),
        Visualization::Pie(chart) => Some(render_pie(chart, rng)),
        Visualization::Table(chart) => render_table(chart),
    }
}

fn series_legend<R: Rng + ?Sized>(chart: &CartesianChart, rng: &mut R) -> Vec<LegendEntry> {
    chart
        .series
        .iter()
        .map(|series| LegendEntry {
            label: series.label().to_string(),
            color: color_or_random(series.color(), rng),
        })
        .collect()
}

fn render_bar<R: Rng + ?Sized>(chart: &CartesianChart, rng: &mut R) -> RenderedChart {
    let legend = series_legend(chart, rng);

    let max = chart
        .data
        .iter()
        .flat_map(|record| chart.series.iter().filter_map(|s| numeric_field(record, &s.data_key)))
        .fold(0.0_f64, f64::max);

    let label_width = chart
        .series
        .iter()
        .map(|s| s.label().chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for record in &chart.data {
        lines.push(cell_text(record.get(&chart.x_axis)));
        for series in &chart.series {
            let value = numeric_field(record, &series.data_key);
            let bar = value.map(|v| "█".repeat(bar_length(v, max))).unwrap_or_default();
            let shown = value.map(format_number).unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "  {:<width$} {} {}",
                series.label(),
                bar,
                shown,
                width = label_width
            ));
        }
    }

    if lines.is_empty() {
        lines.push("(no data)".to_string());
    }

    RenderedChart {
        title: chart.title.clone(),
        lines,
        legend,
    }
}

fn render_line<R: Rng + ?Sized>(chart: &CartesianChart, rng: &mut R) -> RenderedChart {
    let legend = series_legend(chart, rng);

    let label_width = chart
        .series
        .iter()
        .map(|s| s.label().chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    if !chart.data.is_empty() {
        for series in &chart.series {
            let values: Vec<Option<f64>> = chart
                .data
                .iter()
                .map(|record| numeric_field(record, &series.data_key))
                .collect();

            let present = values.iter().flatten().copied();
            let min = present.clone().fold(f64::INFINITY, f64::min);
            let max = present.fold(f64::NEG_INFINITY, f64::max);

            let range = if min.is_finite() && max.is_finite() {
                format!("  min {} max {}", format_number(min), format_number(max))
            } else {
                String::new()
            };

            lines.push(format!(
                "{:<width$} {}{}",
                series.label(),
                sparkline(&values, min, max),
                range,
                width = label_width
            ));
        }

        let first = chart.data.first().map(|r| cell_text(r.get(&chart.x_axis)));
        let last = chart.data.last().map(|r| cell_text(r.get(&chart.x_axis)));
        if let (Some(first), Some(last)) = (first, last) {
            lines.push(format!("{:<width$} {} → {}", "", first, last, width = label_width));
        }
    } else {
        lines.push("(no data)".to_string());
    }

    RenderedChart {
        title: chart.title.clone(),
        lines,
        legend,
    }
}

fn render_pie<R: Rng + ?Sized>(chart: &PieChart, rng: &mut R) -> RenderedChart {
    let values: Vec<f64> = chart
        .data
        .iter()
        .map(|record| numeric_field(record, &chart.value_key).unwrap_or(0.0))
        .collect();
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();

    let labels: Vec<String> = chart
        .data
        .iter()
        .zip(&values)
        .map(|(record, value)| pie_label(record, &chart.name_key, *value, total))
        .collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut lines = Vec::new();
    let mut legend = Vec::new();
    for (idx, (record, value)) in chart.data.iter().zip(&values).enumerate() {
        let color = color_or_random(chart.slice_color(idx), rng);

        legend.push(LegendEntry {
            label: cell_text(record.get(&chart.name_key)),
            color,
        });
        lines.push(format!(
            "{:<width$} {}",
            labels[idx],
            "█".repeat(bar_length(*value, total)),
            width = label_width
        ));
    }

    if lines.is_empty() {
        lines.push("(no data)".to_string());
    }

    RenderedChart {
        title: chart.title.clone(),
        lines,
        legend,
    }
}

fn render_table(chart: &TableChart) -> Option<RenderedChart> {
    let first = chart.data.first()?;
    let columns: Vec<String> = first.keys().cloned().collect();

    Some(RenderedChart {
        title: chart.title.clone(),
        lines: render_grid(&columns, &chart.data),
        legend: Vec::new(),
    })
}

/// `<name>: <pct>%`, percentage rounded half away from zero
fn pie_label(record: &Record, name_key: &str, value: f64, total: f64) -> String {
    let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
    format!("{}: {}%", cell_text(record.get(name_key)), pct.round() as i64)
}

fn bar_length(value: f64, max: f64) -> usize {
    if value <= 0.0 || max <= 0.0 {
        return 0;
    }
    (((value / max) * BAR_WIDTH as f64).round() as usize).clamp(1, BAR_WIDTH)
}

fn sparkline(values: &[Option<f64>], min: f64, max: f64) -> String {
    let span = max - min;
    values
        .iter()
        .map(|value| match value {
            Some(v) if span > 0.0 => {
                let level = ((v - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            }
            Some(_) => SPARK_LEVELS[SPARK_LEVELS.len() / 2],
            None => ' ',
        })
        .collect()
}

/// Integers print without decimals, everything else with up to two
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> VisualizationSpec {
        serde_json::from_value(value).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn test_bar_chart_one_bar_per_series() {
        let chart = render_visualization(
            &spec(json!({
                "type": "bar",
                "title": "Revenue vs cost",
                "xAxis": "quarter",
                "data": [
                    { "quarter": "Q1", "revenue": 100, "cost": 50 },
                    { "quarter": "Q2", "revenue": 200, "cost": 75 }
                ],
                "series": [
                    { "dataKey": "revenue", "color": "#123456" },
                    { "dataKey": "cost" }
                ]
            })),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(chart.title, "Revenue vs cost");
        // Category line plus one line per series, for each record
        assert_eq!(chart.lines.len(), 6);
        assert_eq!(chart.lines[0], "Q1");
        assert!(chart.lines[4].contains(&"█".repeat(BAR_WIDTH)));
        assert!(chart.lines[4].ends_with("200"));

        assert_eq!(chart.legend.len(), 2);
        assert_eq!(chart.legend[0].color, "#123456");
        assert!(is_hex_color(&chart.legend[1].color));
    }

    #[test]
    fn test_line_chart_sparkline() {
        let chart = render_visualization(
            &spec(json!({
                "type": "line",
                "title": "CAC by month",
                "xAxis": "month",
                "data": [
                    { "month": "Jan", "cac": 10 },
                    { "month": "Feb", "cac": 20 },
                    { "month": "Mar", "cac": 30 }
                ],
                "series": [{ "dataKey": "cac", "name": "Paid search" }]
            })),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(chart.lines[0], "Paid search ▁▅█  min 10 max 30");
        assert!(chart.lines[1].ends_with("Jan → Mar"));
        assert_eq!(chart.legend[0].label, "Paid search");
    }

    #[test]
    fn test_pie_labels_and_colors() {
        let chart = render_visualization(
            &spec(json!({
                "type": "pie",
                "title": "Share by region",
                "valueKey": "sales",
                "nameKey": "region",
                "colors": ["#ff0000"],
                "data": [
                    { "region": "North", "sales": 1 },
                    { "region": "South", "sales": 2 }
                ]
            })),
            &mut rng(),
        )
        .unwrap();

        assert!(chart.lines[0].starts_with("North: 33%"));
        assert!(chart.lines[1].starts_with("South: 67%"));
        assert_eq!(chart.legend[0].color, "#ff0000");
        assert!(is_hex_color(&chart.legend[1].color));
    }

    #[test]
    fn test_pie_null_color_falls_back_to_random() {
        let chart = render_visualization(
            &spec(json!({
                "type": "pie",
                "title": "Share",
                "valueKey": "sales",
                "nameKey": "region",
                "colors": ["#ff0000", null],
                "data": [
                    { "region": "North", "sales": 1 },
                    { "region": "South", "sales": 1 }
                ]
            })),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(chart.legend[0].color, "#ff0000");
        assert!(is_hex_color(&chart.legend[1].color));
    }

    #[test]
    fn test_empty_series_color_gets_random_color() {
        let chart = render_visualization(
            &spec(json!({
                "type": "bar",
                "title": "Revenue",
                "xAxis": "q",
                "data": [{ "q": "Q1", "rev": 1 }],
                "series": [{ "dataKey": "rev", "color": "" }]
            })),
            &mut rng(),
        )
        .unwrap();

        assert!(is_hex_color(&chart.legend[0].color));
    }

    #[test]
    fn test_table_uses_first_record_keys() {
        let chart = render_visualization(
            &spec(json!({
                "type": "table",
                "title": "Top products",
                "data": [
                    { "product": "Widget", "revenue": 10 },
                    { "product": "Gadget", "revenue": 7 }
                ]
            })),
            &mut rng(),
        )
        .unwrap();

        assert!(chart.lines[0].starts_with("product"));
        assert!(chart.lines[0].contains("revenue"));
        assert_eq!(chart.lines.len(), 4);
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        let rendered = render_visualization(
            &spec(json!({ "type": "table", "title": "Nothing", "data": [] })),
            &mut rng(),
        );
        assert!(rendered.is_none());
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let rendered = render_visualization(
            &spec(json!({ "type": "heatmap", "title": "?", "data": [{ "a": 1 }] })),
            &mut rng(),
        );
        assert!(rendered.is_none());
    }

    #[test]
    fn test_random_color_is_padded_hex() {
        let mut rng = rng();
        for _ in 0..100 {
            assert!(is_hex_color(&random_color(&mut rng)));
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1200.0), "1200");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.125), "0.13");
    }
}
