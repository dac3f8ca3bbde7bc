use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Gate Router Module
///
/// Operational endpoints of the gatekeeper itself. They live under `/_gate/`
/// so they never shadow a frontend page, and they sit outside the
/// gatekeeper middleware.
pub fn gate_routes() -> Router<AppState> {
    Router::new()
        // GET /_gate/health
        // Liveness probe. Returns "ok" immediately.
        .route("/_gate/health", get(handlers::health))
        // GET /_gate/session
        // The normalised claim read from the caller's auth cookie.
        .route("/_gate/session", get(handlers::get_session))
        // GET /_gate/decision?path=...
        // What the gatekeeper would do for a path with the caller's cookie.
        .route("/_gate/decision", get(handlers::get_decision))
}
