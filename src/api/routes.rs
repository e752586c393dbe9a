//! Routing definitions.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, health_check, process_prompt, root_status};
use crate::infrastructure::PromptProcessor;

/// Creates the application router with all routes and middleware.
///
/// # Examples
///
/// ```ignore
/// let state = AppState::new(SimulatedProcessor::default());
/// let router = create_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router<Processor: PromptProcessor>(state: AppState<Processor>) -> Router {
    let api = Router::new()
        .route("/process", post(process_prompt::<Processor>))
        .route("/health", get(health_check));

    Router::new()
        .route("/", get(root_status))
        .nest("/api/ai", api)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Development posture: any origin, method and header.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
