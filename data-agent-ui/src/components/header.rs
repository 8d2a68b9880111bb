//! Header Component
//!
//! Title bar with the connection indicator.

use leptos::*;

use crate::api;
use crate::state::ChatState;

/// Page header
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<ChatState>();

    view! {
        <header class="bg-white border-b border-gray-200 shadow-sm">
            <div class="max-w-4xl mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"📊"</span>
                        <span class="text-xl font-bold text-gray-900">"AI Data Agent"</span>
                    </div>

                    <button
                        on:click=move |_| state.toggle_connected()
                        title=api::get_api_base()
                        class="flex items-center space-x-2 px-3 py-1 rounded-lg text-sm hover:bg-gray-100 transition-colors"
                    >
                        {move || {
                            if state.connected.get() {
                                view! {
                                    <span class="flex items-center space-x-1 text-green-600">
                                        <span class="w-2 h-2 bg-green-500 rounded-full pulse" />
                                        <span>"Connected"</span>
                                    </span>
                                }
                            } else {
                                view! {
                                    <span class="flex items-center space-x-1 text-red-600">
                                        <span class="w-2 h-2 bg-red-500 rounded-full" />
                                        <span>"Disconnected"</span>
                                    </span>
                                }
                            }
                        }}
                    </button>
                </div>
            </div>
        </header>
    }
}
