use thiserror::Error;

/// ClaimError
///
/// Why an `auth-storage` cookie could not be read as a session.
/// Never leaves the auth module: every variant resolves to an anonymous claim.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("auth cookie is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("auth cookie has no `state` object")]
    MissingState,
}

/// UpstreamError
///
/// Failures while forwarding an allowed navigation to the frontend.
/// Mapped to an HTTP status by the fallback handler: body problems are the
/// client's (413/400), everything else is `502 Bad Gateway`.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url `{0}`")]
    InvalidUrl(String),
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error("invalid content-length header")]
    InvalidContentLength,
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),
    #[error("frontend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("frontend unavailable: {0}")]
    Unavailable(String),
}
