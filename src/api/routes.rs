//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Rules questions
        .route("/ask", post(handlers::ask_question))
        // Glossary
        .route("/definitions", get(handlers::get_definitions))
        .with_state(state)
}
