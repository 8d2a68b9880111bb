//! Chart Components
//!
//! Renders server-provided visualization specs: bar, line and pie charts on
//! HTML5 Canvas, and table specs as an HTML grid.

use leptos::*;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::results_table::DataGrid;
use crate::state::model::{
    cell_text, numeric_field, CartesianChart, PieChart, TableChart, Visualization,
    VisualizationSpec,
};

/// Radius of the pie, in canvas pixels
const PIE_RADIUS: f64 = 80.0;

#[derive(Clone, Copy, PartialEq)]
enum CartesianKind {
    Bar,
    Line,
}

/// Dispatch a spec to its renderer. Unknown specs render nothing.
#[component]
pub fn VisualizationView(spec: VisualizationSpec) -> impl IntoView {
    match spec.chart().cloned() {
        Some(Visualization::Bar(chart)) => {
            view! { <CartesianCanvas chart=chart kind=CartesianKind::Bar /> }.into_view()
        }
        Some(Visualization::Line(chart)) => {
            view! { <CartesianCanvas chart=chart kind=CartesianKind::Line /> }.into_view()
        }
        Some(Visualization::Pie(chart)) => view! { <PieCanvas chart=chart /> }.into_view(),
        Some(Visualization::Table(chart)) => view! { <TableView chart=chart /> }.into_view(),
        None => view! {}.into_view(),
    }
}

/// Titled white card around a chart
#[component]
fn ChartCard(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="p-4 bg-white rounded-lg shadow-md overflow-x-auto">
            <h3 class="text-lg font-medium mb-2">{title}</h3>
            {children()}
        </div>
    }
}

/// Legend showing series colors
#[component]
fn Legend(entries: Vec<(String, String)>) -> impl IntoView {
    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-2">
            {entries
                .into_iter()
                .map(|(label, color)| {
                    view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", color)
                            />
                            <span class="text-sm text-gray-600">{label}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn CartesianCanvas(chart: CartesianChart, kind: CartesianKind) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Colors are fixed once per chart so redraws don't reshuffle them
    let colors: Vec<String> = chart
        .series
        .iter()
        .map(|s| color_or_random(s.color()))
        .collect();
    let legend: Vec<(String, String)> = chart
        .series
        .iter()
        .zip(&colors)
        .map(|(s, color)| (s.name.clone().unwrap_or_else(|| s.data_key.clone()), color.clone()))
        .collect();
    let title = chart.title.clone();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_cartesian(&canvas, &chart, &colors, kind);
        }
    });

    view! {
        <ChartCard title=title>
            <canvas node_ref=canvas_ref width="600" height="240" class="w-full h-64" />
            <Legend entries=legend />
        </ChartCard>
    }
}

#[component]
fn PieCanvas(chart: PieChart) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    let colors: Vec<String> = (0..chart.data.len())
        .map(|idx| color_or_random(chart.slice_color(idx)))
        .collect();
    let legend: Vec<(String, String)> = chart
        .data
        .iter()
        .zip(&colors)
        .map(|(record, color)| (cell_text(record.get(&chart.name_key)), color.clone()))
        .collect();
    let title = chart.title.clone();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_pie(&canvas, &chart, &colors);
        }
    });

    view! {
        <ChartCard title=title>
            <canvas node_ref=canvas_ref width="400" height="240" class="h-64" />
            <Legend entries=legend />
        </ChartCard>
    }
}

/// Table spec: columns are the keys of the first record
#[component]
fn TableView(chart: TableChart) -> impl IntoView {
    let Some(first) = chart.data.first() else {
        return view! {}.into_view();
    };
    let columns: Vec<String> = first.keys().cloned().collect();

    view! {
        <ChartCard title=chart.title.clone()>
            <DataGrid columns=columns rows=chart.data.clone() striped=false />
        </ChartCard>
    }
    .into_view()
}

/// Random `#rrggbb` color for series and slices without one
pub fn random_color() -> String {
    color_from_unit(js_sys::Math::random())
}

fn color_or_random(color: Option<&str>) -> String {
    color.map(str::to_string).unwrap_or_else(random_color)
}

/// Map a value in `[0, 1]` onto the 24-bit color range
fn color_from_unit(x: f64) -> String {
    format!("#{:06x}", (x.clamp(0.0, 1.0) * 16_777_215.0).floor() as u32)
}

/// `<name>: <pct>%` with the percentage rounded to a whole number
fn pie_label(name: &str, value: f64, total: f64) -> String {
    let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
    format!("{}: {}%", name, pct.round() as i64)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_no_data(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style(&"#6b7280".into());
    ctx.set_font("14px sans-serif");
    ctx.set_text_align("center");
    let _ = ctx.fill_text("No data", width / 2.0, height / 2.0);
}

/// Draw a bar or line chart, one series per entry in `chart.series`
fn draw_cartesian(
    canvas: &HtmlCanvasElement,
    chart: &CartesianChart,
    colors: &[String],
    kind: CartesianKind,
) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 50.0;
    let margin_right = 30.0;
    let margin_top = 10.0;
    let margin_bottom = 30.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.clear_rect(0.0, 0.0, width, height);

    if chart.data.is_empty() {
        draw_no_data(&ctx, width, height);
        return;
    }

    // Y range always includes zero so bars have a baseline
    let values: Vec<f64> = chart
        .data
        .iter()
        .flat_map(|record| chart.series.iter().filter_map(|s| numeric_field(record, &s.data_key)))
        .collect();
    let mut y_min = values.iter().copied().fold(0.0_f64, f64::min);
    let mut y_max = values.iter().copied().fold(0.0_f64, f64::max);
    if y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let y_of = |value: f64| margin_top + (y_max - value) / (y_max - y_min) * chart_height;

    // Dashed grid with y-axis labels
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    let _ = ctx.set_line_dash(&js_sys::Array::of2(&JsValue::from_f64(3.0), &JsValue::from_f64(3.0)));
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("right");
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 4.0) * (y_max - y_min);
        ctx.set_fill_style(&"#6b7280".into());
        let _ = ctx.fill_text(&format_tick(value), margin_left - 6.0, y + 4.0);
    }
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    // Category labels
    let band = chart_width / chart.data.len() as f64;
    ctx.set_text_align("center");
    ctx.set_fill_style(&"#6b7280".into());
    for (idx, record) in chart.data.iter().enumerate() {
        let x = margin_left + band * (idx as f64 + 0.5);
        let _ = ctx.fill_text(&cell_text(record.get(&chart.x_axis)), x, height - 10.0);
    }

    match kind {
        CartesianKind::Bar => {
            let group_width = band * 0.8;
            let bar_width = group_width / chart.series.len().max(1) as f64;
            let baseline = y_of(0.0);

            for (series_idx, series) in chart.series.iter().enumerate() {
                ctx.set_fill_style(&colors[series_idx].as_str().into());
                for (idx, record) in chart.data.iter().enumerate() {
                    if let Some(value) = numeric_field(record, &series.data_key) {
                        let x = margin_left + band * idx as f64 + band * 0.1 + bar_width * series_idx as f64;
                        let y = y_of(value);
                        ctx.fill_rect(x, y.min(baseline), bar_width, (baseline - y).abs());
                    }
                }
            }
        }
        CartesianKind::Line => {
            for (series_idx, series) in chart.series.iter().enumerate() {
                let color = colors[series_idx].as_str();
                let points: Vec<(f64, f64)> = chart
                    .data
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, record)| {
                        numeric_field(record, &series.data_key)
                            .map(|v| (margin_left + band * (idx as f64 + 0.5), y_of(v)))
                    })
                    .collect();

                ctx.set_stroke_style(&color.into());
                ctx.set_line_width(2.0);
                ctx.begin_path();
                for (i, (x, y)) in points.iter().enumerate() {
                    if i == 0 {
                        ctx.move_to(*x, *y);
                    } else {
                        ctx.line_to(*x, *y);
                    }
                }
                ctx.stroke();

                ctx.set_fill_style(&color.into());
                for (x, y) in &points {
                    ctx.begin_path();
                    let _ = ctx.arc(*x, *y, 3.0, 0.0, PI * 2.0);
                    ctx.fill();
                }
            }
        }
    }
}

/// Draw a pie with one slice per record, labelled with its share
fn draw_pie(canvas: &HtmlCanvasElement, chart: &PieChart, colors: &[String]) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, width, height);

    let values: Vec<f64> = chart
        .data
        .iter()
        .map(|record| numeric_field(record, &chart.value_key).unwrap_or(0.0))
        .collect();
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        draw_no_data(&ctx, width, height);
        return;
    }

    let cx = width / 2.0;
    let cy = height / 2.0;
    let mut angle = -PI / 2.0;

    ctx.set_font("12px sans-serif");
    for (idx, value) in values.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let sweep = value / total * PI * 2.0;

        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, PIE_RADIUS, angle, angle + sweep);
        ctx.close_path();
        ctx.set_fill_style(&colors[idx].as_str().into());
        ctx.fill();

        let mid = angle + sweep / 2.0;
        let label_x = cx + (PIE_RADIUS + 16.0) * mid.cos();
        let label_y = cy + (PIE_RADIUS + 16.0) * mid.sin();
        ctx.set_text_align(if mid.cos() >= 0.0 { "left" } else { "right" });
        ctx.set_fill_style(&colors[idx].as_str().into());
        let name = cell_text(chart.data[idx].get(&chart.name_key));
        let _ = ctx.fill_text(&pie_label(&name, *value, total), label_x, label_y);

        angle += sweep;
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
