use crate::{AppState, gatekeeper::gatekeeper_middleware, handlers};
use axum::{Router, middleware};

/// Gated Router Module
///
/// Catch-all for page navigations. Nothing is routed explicitly: every path
/// that is not a gate endpoint reaches the fallback, which proxies to the
/// frontend.
///
/// Access Control:
/// The gatekeeper middleware wraps the fallback, so each navigation is
/// allowed or redirected before any byte is forwarded.
pub fn gated_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .fallback(handlers::forward_to_frontend)
        .layer(middleware::from_fn_with_state(state, gatekeeper_middleware))
}
