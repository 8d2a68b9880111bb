//! API Layer
//!
//! HTTP access to the analytics API.

mod client;

pub use client::{get_api_base, send_query};
