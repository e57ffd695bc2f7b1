//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::embeddings::EmbeddingClient;
use crate::llm::CompletionClient;
use crate::router::RulingService;
use crate::Result;

/// Start the API server
pub async fn serve_api(
    config: &AppConfig,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("Starting LinksLogic API server...");

    // Initialize services; rule embeddings are precomputed before the
    // listener binds so no request ever sees a partial table
    let embedding_client = Arc::new(EmbeddingClient::from_config(config)?);
    let completion_client = Arc::new(CompletionClient::from_config(config)?);
    let service = Arc::new(
        RulingService::bootstrap(config, embedding_client, completion_client).await?,
    );

    info!(
        "Loaded {} club rules, {} general rules, {} templates, {} definitions",
        service.corpus().club_count(),
        service.corpus().general_count(),
        service.template_count(),
        service.definition_count(),
    );

    let state = AppState { service };

    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{addr}");
    info!("Available endpoints:");
    info!("  GET  /api/health      - Health check");
    info!("  POST /api/ask         - Answer a rules question");
    info!("  GET  /api/definitions - Glossary lookups");

    axum::serve(listener, app).await?;

    Ok(())
}
