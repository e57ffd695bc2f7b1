//! HTTP API surface
//!
//! Thin axum layer over the ruling pipeline. The pipeline itself never
//! fails a request: degraded answers arrive as well-formed results, so the
//! only client-visible HTTP errors are request-shape problems.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use server::serve_api;
