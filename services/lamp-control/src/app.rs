//! Lamp control HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and testable.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::observability;
use crate::store::LampStore;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub api_version: String,
    pub store: Arc<dyn LampStore + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route("/health", axum::routing::get(api::system::health))
        .route("/system/info", axum::routing::get(api::system::system_info))
        .route(
            "/lamps",
            axum::routing::get(api::lamps::list_lamps).post(api::lamps::create_lamp),
        )
        .route(
            "/lamps/:lamp_id",
            axum::routing::get(api::lamps::get_lamp)
                .put(api::lamps::update_lamp)
                .delete(api::lamps::delete_lamp),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()),
        )
        .fallback(api::error::unknown_route)
        .layer(axum::middleware::map_response(api::error::ensure_error_body))
        .layer(trace_layer)
        .with_state(state)
}
