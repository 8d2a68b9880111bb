//! Results Table Component
//!
//! Tabular query results with client-side CSV export.

use leptos::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::state::model::{cell_text, Record, TableResult};

/// Filename offered for the CSV download
pub const EXPORT_FILENAME: &str = "query_results.csv";

/// Query results with an "Export CSV" button
#[component]
pub fn ResultsTable(table: TableResult) -> impl IntoView {
    if !table.is_renderable() {
        return view! {}.into_view();
    }

    let export_table = table.clone();
    let on_export = move |_| {
        let result = to_csv(&export_table).and_then(|csv| download_csv(&csv, EXPORT_FILENAME));
        if let Err(e) = result {
            web_sys::console::error_1(&format!("CSV export failed: {}", e).into());
        }
    };

    view! {
        <div class="mt-4 p-4 bg-white rounded-lg shadow-md overflow-x-auto">
            <div class="flex justify-between items-center mb-2">
                <h3 class="text-lg font-medium">"Query Results"</h3>
                <button
                    on:click=on_export
                    class="flex items-center space-x-1 px-3 py-1 text-sm bg-blue-600 hover:bg-blue-700 text-white rounded-lg transition-colors"
                >
                    <span>"⬇"</span>
                    <span>"Export CSV"</span>
                </button>
            </div>
            <DataGrid columns=table.columns rows=table.rows striped=true />
        </div>
    }
    .into_view()
}

/// Plain grid: a header row of column names, then one row per record
#[component]
pub fn DataGrid(columns: Vec<String>, rows: Vec<Record>, striped: bool) -> impl IntoView {
    let header = columns.clone();

    view! {
        <table class="min-w-full divide-y divide-gray-200 text-sm">
            <thead class="bg-gray-50">
                <tr>
                    {header
                        .into_iter()
                        .map(|col| view! {
                            <th class="px-4 py-2 text-left font-medium text-gray-500 uppercase tracking-wider">
                                {col}
                            </th>
                        })
                        .collect_view()}
                </tr>
            </thead>
            <tbody class="bg-white divide-y divide-gray-200">
                {rows
                    .into_iter()
                    .enumerate()
                    .map(|(idx, row)| {
                        let row_class = if striped && idx % 2 == 1 { "bg-gray-50" } else { "" };
                        view! {
                            <tr class=row_class>
                                {columns
                                    .iter()
                                    .map(|col| view! {
                                        <td class="px-4 py-2 whitespace-nowrap">
                                            {cell_text(row.get(col))}
                                        </td>
                                    })
                                    .collect_view()}
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

/// CSV text: column names quoted only where needed, every data cell quoted
pub fn to_csv(table: &TableResult) -> Result<String, String> {
    let mut buf = Vec::new();
    {
        let mut header = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(&mut buf);
        header.write_record(&table.columns).map_err(|e| e.to_string())?;
        header.flush().map_err(|e| e.to_string())?;
    }
    {
        let mut body = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(&mut buf);
        for row in &table.rows {
            body.write_record(table.columns.iter().map(|col| cell_text(row.get(col))))
                .map_err(|e| e.to_string())?;
        }
        body.flush().map_err(|e| e.to_string())?;
    }
    String::from_utf8(buf).map_err(|e| e.to_string())
}

/// Hand the CSV to the browser as a file download
fn download_csv(csv: &str, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let body = document.body().ok_or("No body")?;

    let options = BlobPropertyBag::new();
    options.set_type("text/csv");
    let parts = js_sys::Array::of1(&JsValue::from_str(csv));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "Not an anchor element".to_string())?;
    anchor.set_hidden(true);
    anchor.set_href(&url);
    anchor.set_download(filename);

    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_error)?;

    Url::revoke_object_url(&url).map_err(js_error)
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_to_csv_quotes_every_cell() {
        let table = TableResult {
            columns: vec!["region".to_string(), "revenue".to_string()],
            rows: vec![
                record(json!({"region": "North", "revenue": 1200})),
                record(json!({"region": "South", "revenue": null})),
            ],
        };

        assert_eq!(
            to_csv(&table).unwrap(),
            "region,revenue\n\"North\",\"1200\"\n\"South\",\"\"\n"
        );
    }

    #[test]
    fn test_to_csv_doubles_embedded_quotes() {
        let table = TableResult {
            columns: vec!["name".to_string()],
            rows: vec![record(json!({"name": "The \"Best\" Widget"}))],
        };

        assert_eq!(to_csv(&table).unwrap(), "name\n\"The \"\"Best\"\" Widget\"\n");
    }

    #[test]
    fn test_to_csv_follows_column_order() {
        let table = TableResult {
            columns: vec!["b".to_string(), "a".to_string()],
            rows: vec![record(json!({"a": 1, "b": 2}))],
        };

        assert_eq!(to_csv(&table).unwrap(), "b,a\n\"2\",\"1\"\n");
    }

    #[test]
    fn test_to_csv_quotes_awkward_header() {
        let table = TableResult {
            columns: vec!["city, state".to_string()],
            rows: vec![record(json!({"city, state": "Austin, TX"}))],
        };

        assert_eq!(to_csv(&table).unwrap(), "\"city, state\"\n\"Austin, TX\"\n");
    }

    #[test]
    fn test_to_csv_empty_column_name() {
        let table = TableResult {
            columns: vec![String::new()],
            rows: vec![record(json!({"": "x"}))],
        };

        assert_eq!(to_csv(&table).unwrap(), "\"\"\n\"x\"\n");
    }
}
