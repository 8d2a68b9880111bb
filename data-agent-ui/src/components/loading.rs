//! Loading Components
//!
//! Placeholders shown while a question is in flight.

use leptos::*;

/// Skeleton bubble standing in for the pending answer
#[component]
pub fn AnswerSkeleton() -> impl IntoView {
    view! {
        <div class="mb-6 flex justify-start">
            <div class="rounded-2xl p-5 bg-white border border-gray-200 shadow-sm w-full max-w-3xl animate-pulse">
                <div class="h-4 bg-gray-200 rounded w-3/4 mb-3" />
                <div class="h-4 bg-gray-200 rounded w-1/2 mb-3" />
                <div class="h-4 bg-gray-200 rounded w-5/6" />
            </div>
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
