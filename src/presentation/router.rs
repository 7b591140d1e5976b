use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{GenerativeClient, TextExtractor};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{analyze_handler, chat_handler, health_handler};
use crate::presentation::state::AppState;

/// Headroom on top of the upload ceiling for multipart framing and the other
/// form fields.
const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

pub fn create_router<E, G>(state: AppState<E, G>) -> Router
where
    E: TextExtractor + 'static,
    G: GenerativeClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.settings.limits.max_upload_bytes + BODY_LIMIT_OVERHEAD;

    Router::new()
        .route("/health", get(health_handler::<E, G>))
        .route("/analyze", post(analyze_handler::<E, G>))
        .route("/chat", post(chat_handler::<E, G>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
