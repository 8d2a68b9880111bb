//! App Root Component
//!
//! Chat layout: header, transcript, and the question box.

use leptos::*;

use crate::components::{AnswerSkeleton, ErrorBanner, Header, InlineLoading, MessageBubble};
use crate::state::chat::textarea_rows;
use crate::state::{provide_chat_state, ChatState};

const WELCOME_TITLE: &str = "Welcome to AI Data Agent";
const WELCOME_TEXT: &str =
    "Ask complex business questions about your data and get instant insights.";

/// Example questions offered on the welcome screen
const EXAMPLE_QUESTIONS: [&str; 5] = [
    "What were our top-performing products last quarter by revenue?",
    "Show me the trend of customer acquisition costs by channel over the past year",
    "Which sales regions had the highest growth rate compared to the same period last year?",
    "Analyze customer churn rates by demographic segment",
    "What's the correlation between marketing spend and revenue across different product categories?",
];

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_chat_state();
    let state = expect_context::<ChatState>();

    view! {
        <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col">
            <Header />

            <main class="flex-1 max-w-4xl w-full mx-auto px-4 py-8 pb-40">
                <Show when=move || state.messages.with(|m| m.is_empty())>
                    <Welcome />
                </Show>

                <Transcript />
            </main>

            <QueryForm />
        </div>
    }
}

/// Intro text with clickable example questions
#[component]
fn Welcome() -> impl IntoView {
    let state = expect_context::<ChatState>();

    view! {
        <div class="text-center py-12">
            <h1 class="text-3xl font-bold mb-3">{WELCOME_TITLE}</h1>
            <p class="text-gray-500 mb-8">{WELCOME_TEXT}</p>
            <p class="text-sm font-medium text-gray-600 mb-3 text-left">"Try asking:"</p>
            <div class="grid gap-3 md:grid-cols-2 text-left">
                {EXAMPLE_QUESTIONS
                    .iter()
                    .map(|question| {
                        let question = question.to_string();
                        let label = question.clone();
                        view! {
                            <button
                                on:click=move |_| state.input.set(question.clone())
                                class="p-4 bg-white border border-gray-200 rounded-lg shadow-sm hover:border-blue-400 hover:shadow transition-all text-sm"
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Message list, scrolled to the newest entry as it grows
#[component]
fn Transcript() -> impl IntoView {
    let state = expect_context::<ChatState>();
    let end_ref = create_node_ref::<html::Div>();

    create_effect(move |_| {
        state.messages.with(|m| m.len());
        state.loading.get();
        if let Some(end) = end_ref.get() {
            end.scroll_into_view();
        }
    });

    view! {
        <div>
            // The transcript is append-only, so the index is a stable key
            <For
                each=move || state.messages.get().into_iter().enumerate()
                key=|(idx, _)| *idx
                children=move |(_, message)| view! { <MessageBubble message=message /> }
            />

            <Show when=move || state.loading.get()>
                <AnswerSkeleton />
            </Show>

            <div node_ref=end_ref />
        </div>
    }
}

/// Question box pinned to the bottom of the page
#[component]
fn QueryForm() -> impl IntoView {
    let state = expect_context::<ChatState>();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.submit();
    };

    view! {
        <div class="fixed bottom-0 left-0 right-0 bg-white border-t border-gray-200 py-4 px-4">
            <div class="max-w-4xl mx-auto">
                <ErrorBanner />

                <form on:submit=on_submit class="flex items-end gap-2">
                    <textarea
                        prop:value=move || state.input.get()
                        on:input=move |ev| state.input.set(event_target_value(&ev))
                        rows=move || textarea_rows(&state.input.get()).to_string()
                        disabled=move || state.loading.get()
                        placeholder="Ask a business question..."
                        class="flex-1 resize-none px-4 py-3 border border-gray-300 rounded-xl focus:outline-none focus:ring-2 focus:ring-blue-500 disabled:bg-gray-100"
                    />
                    <button
                        type="submit"
                        disabled=move || state.loading.get()
                        aria-label="Send"
                        class="px-4 py-3 bg-blue-600 hover:bg-blue-700 disabled:bg-gray-300 text-white rounded-xl transition-colors"
                    >
                        {move || {
                            if state.loading.get() {
                                view! { <InlineLoading /> }.into_view()
                            } else {
                                view! { <span>"Send"</span> }.into_view()
                            }
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}
