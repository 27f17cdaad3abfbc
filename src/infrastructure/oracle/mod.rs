//! HTTP adapter for the language-oracle port.

mod client;

pub use client::{HttpOracle, API_KEY_ENV};
