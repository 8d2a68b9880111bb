//! Error Banner Component
//!
//! Shows the reason the last question failed.

use leptos::*;

use crate::state::ChatState;

/// Banner above the question box, present while an error is set
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let state = expect_context::<ChatState>();

    view! {
        {move || {
            state.error.get().map(|msg| view! {
                <div class="mb-3 flex items-center space-x-3 bg-red-600 text-white px-4 py-3 rounded-lg shadow-lg">
                    <span class="text-lg">"✕"</span>
                    <span class="text-sm font-medium">{msg}</span>
                    <button
                        on:click=move |_| state.error.set(None)
                        class="ml-auto text-white/80 hover:text-white"
                        aria-label="Dismiss"
                    >
                        "×"
                    </button>
                </div>
            })
        }}
    }
}
