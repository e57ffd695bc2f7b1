//! API request handlers

use std::sync::Arc;

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use tracing::info;

use crate::api::types::ApiResponse;
use crate::api::types::AskRequest;
use crate::api::types::AskResponse;
use crate::api::types::DefinitionsQuery;
use crate::api::types::HealthResponse;
use crate::definitions::Definition;
use crate::router::RulingService;

/// Club identifier reported in API envelopes
const CLUB_ID: &str = "columbia_cc";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RulingService>,
}

/// Answer a rules question
pub async fn ask_question(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Response {
    let question = req.question.trim().to_string();
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AskResponse>::error("Question is required")),
        )
            .into_response();
    }

    info!("POST /api/ask: {}", question.chars().take(100).collect::<String>());

    let ruling = state.service.answer(&question).await;

    Json(AskResponse {
        success: true,
        question,
        club_id: CLUB_ID,
        timestamp: Utc::now(),
        ruling,
    })
    .into_response()
}

/// Health check with loaded-data counts
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let corpus = state.service.corpus();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        club_rules_loaded: corpus.club_count(),
        general_rules_loaded: corpus.general_count(),
        templates_loaded: state.service.template_count(),
        definitions_loaded: state.service.definition_count(),
    })
}

/// Glossary lookups by id, search term, or category
pub async fn get_definitions(
    State(state): State<AppState>,
    Query(params): Query<DefinitionsQuery>,
) -> Response {
    let store = state.service.definitions();

    if let Some(id) = params.id.as_deref() {
        return match store.get(id) {
            Some(definition) => {
                Json(ApiResponse::success(vec![definition.clone()])).into_response()
            }
            None => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Vec<Definition>>::error("Definition not found")),
            )
                .into_response(),
        };
    }

    let matches: Vec<Definition> = if let Some(term) = params.search.as_deref() {
        store.search(term).into_iter().cloned().collect()
    } else if let Some(category) = params.category.as_deref() {
        store.by_category(category).into_iter().cloned().collect()
    } else {
        store.all().to_vec()
    };

    Json(ApiResponse::success(matches)).into_response()
}
