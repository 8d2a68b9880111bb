//! Message Bubble Component
//!
//! One transcript entry: text, generated SQL, charts and result table.

use leptos::*;

use super::chart::VisualizationView;
use super::results_table::ResultsTable;
use crate::state::model::{Message, MessageKind};

/// Transcript entry, right-aligned for the user and full-width for answers
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let Message {
        kind,
        content,
        visualizations,
        sql_query,
        table_data,
    } = message;

    let (row_class, bubble_class, width) = match kind {
        MessageKind::User => (
            "mb-6 flex justify-end",
            "bg-blue-600 text-white border-blue-600",
            "width: auto",
        ),
        MessageKind::Assistant => (
            "mb-6 flex justify-start",
            "bg-white text-gray-800 border-gray-200 shadow-sm",
            "width: 100%",
        ),
        MessageKind::Error => (
            "mb-6 flex justify-start",
            "bg-red-50 text-red-700 border-red-200",
            "width: 100%",
        ),
    };

    view! {
        <div class=row_class>
            <div
                class=format!("rounded-2xl p-5 max-w-3xl border transition-all {}", bubble_class)
                style=width
            >
                <div class="text-base leading-relaxed whitespace-pre-line">{content}</div>

                {sql_query
                    .filter(|sql| !sql.is_empty())
                    .map(|sql| view! { <SqlBlock sql=sql /> })}

                {(!visualizations.is_empty()).then(|| view! {
                    <div class="mt-4 space-y-4">
                        {visualizations
                            .into_iter()
                            .map(|spec| view! { <VisualizationView spec=spec /> })
                            .collect_view()}
                    </div>
                })}

                {table_data.map(|table| view! { <ResultsTable table=table /> })}
            </div>
        </div>
    }
}

/// Generated SQL, verbatim in a dark code block
#[component]
fn SqlBlock(sql: String) -> impl IntoView {
    view! {
        <div class="mt-4">
            <div class="text-xs font-semibold uppercase tracking-wide text-gray-500 mb-1">
                "Generated SQL:"
            </div>
            <pre class="bg-gray-900 text-green-300 text-sm rounded-lg p-3 overflow-x-auto">
                <code>{sql}</code>
            </pre>
        </div>
    }
}
