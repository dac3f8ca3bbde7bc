use crate::{
    AppState,
    errors::UpstreamError,
    gatekeeper::evaluate,
    models::{AuthClaim, DecisionQuery, DecisionReport},
};
use axum::{
    Json,
    extract::{Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

// --- Handlers ---

/// health
///
/// [Gate Route] Liveness probe for load balancers. Never gated.
#[utoipa::path(
    get,
    path = "/_gate/health",
    responses((status = 200, description = "Gatekeeper is running", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}

/// get_session
///
/// [Gate Route] Returns the claim decoded from the caller's `auth-storage`
/// cookie, after normalisation. A broken cookie shows up here as
/// `{"isAuthenticated": false, "user": null}`.
#[utoipa::path(
    get,
    path = "/_gate/session",
    responses((status = 200, description = "Decoded session claim", body = AuthClaim))
)]
pub async fn get_session(claim: AuthClaim) -> Json<AuthClaim> {
    Json(claim)
}

/// get_decision
///
/// [Gate Route] Evaluates the gatekeeper for `?path=` with the caller's cookie
/// without navigating. Used to compare this gatekeeper against the frontend's
/// own routing.
#[utoipa::path(
    get,
    path = "/_gate/decision",
    params(DecisionQuery),
    responses(
        (status = 200, description = "Gatekeeper decision", body = DecisionReport),
        (status = 400, description = "Path is not absolute")
    )
)]
pub async fn get_decision(
    claim: AuthClaim,
    Query(query): Query<DecisionQuery>,
) -> Result<Json<DecisionReport>, StatusCode> {
    if !query.path.starts_with('/') {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(evaluate(&query.path, &claim).report(&query.path)))
}

/// forward_to_frontend
///
/// [Gated Fallback] Every navigation the gatekeeper allows ends up here and is
/// proxied to the frontend. An oversized body is a 413, a malformed length a
/// 400, and an unreachable frontend a 502.
pub async fn forward_to_frontend(State(state): State<AppState>, request: Request) -> Response {
    let path = request.uri().path().to_owned();
    match state.upstream.forward(request).await {
        Ok(response) => response,
        Err(e @ UpstreamError::PayloadTooLarge(_)) => {
            tracing::warn!(path = %path, error = %e, "rejected oversized request body");
            StatusCode::PAYLOAD_TOO_LARGE.into_response()
        }
        Err(UpstreamError::InvalidContentLength) => StatusCode::BAD_REQUEST.into_response(),
        Err(e) => {
            tracing::error!(path = %path, error = %e, "failed to forward navigation");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
