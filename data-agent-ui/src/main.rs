//! AI Data Agent
//!
//! Conversational analytics frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Ask business questions in plain language
//! - Generated SQL shown alongside each answer
//! - Bar, line and pie charts drawn on canvas
//! - Result tables with CSV export
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the analytics API with one HTTP POST per question.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
