use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Gatekeeper core: route classification, session claim, decision.
pub mod auth;
pub mod gatekeeper;
pub mod models;
pub mod route_table;

// Serving: configuration, errors, handlers and the frontend proxy.
pub mod config;
pub mod errors;
pub mod handlers;
pub mod upstream;

// Module for routing segregation (gate endpoints, gated navigations).
pub mod routes;
use routes::{gate, gated};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use gatekeeper::{Decision, RedirectReason, decide, evaluate};
pub use models::{AuthClaim, Role};
pub use upstream::{HttpUpstream, MockUpstream, UpstreamState};

/// ApiDoc
///
/// OpenAPI document for the gatekeeper's own endpoints, served at
/// `/_gate/openapi.json` with a Swagger UI at `/_gate/docs`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::get_session, handlers::get_decision),
    components(schemas(
        models::AuthClaim,
        models::DecisionReport,
        models::Role,
        route_table::RouteCategory,
    )),
    tags((name = "tutoring-gate", description = "Navigation gatekeeper for the tutoring marketplace"))
)]
struct ApiDoc;

/// AppState
///
/// The single shared container of services and configuration, cloned into
/// every request.
#[derive(Clone)]
pub struct AppState {
    /// Where allowed navigations are forwarded.
    pub upstream: UpstreamState,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for UpstreamState {
    fn from_ref(app_state: &AppState) -> UpstreamState {
        app_state.upstream.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the gate endpoints, the gated fallback and the observability layers.
pub fn create_router(state: AppState) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/_gate/docs").url("/_gate/openapi.json", ApiDoc::openapi()))
        // Gate endpoints: no gatekeeper.
        .merge(gate::gate_routes())
        // Everything else: gatekeeper, then the frontend.
        .merge(gated::gated_routes(state.clone()))
        .with_state(state);

    // Request IDs are set first so the trace span can record them.
    base_router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Span for one request, tagged with its `x-request-id` so every log line of a
/// navigation (including the gatekeeper's decision) can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "navigation",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
