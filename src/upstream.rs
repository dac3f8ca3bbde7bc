use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    response::Response,
};
use std::sync::Arc;

use crate::errors::UpstreamError;

/// Largest request body forwarded to the frontend (form posts from pages).
pub const MAX_FORWARD_BODY: usize = 8 * 1024 * 1024;

// 1. Upstream Contract
/// Upstream
///
/// Where a navigation goes once the gatekeeper allows it. Lets the router use
/// the real frontend proxy in production and an in-memory double in tests.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Forwards the request and returns the frontend's response unchanged.
    async fn forward(&self, request: Request) -> Result<Response, UpstreamError>;
}

// 2. The Real Implementation (HTTP proxy to the web frontend)
/// HttpUpstream
///
/// Reverse proxy to the frontend server. Redirects returned by the frontend are
/// passed back to the browser, not followed.
#[derive(Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    base_url: String,
    max_body_bytes: usize,
}

impl HttpUpstream {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        Self::with_body_limit(base_url, MAX_FORWARD_BODY)
    }

    pub fn with_body_limit(base_url: &str, max_body_bytes: usize) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_body_bytes,
        })
    }
}

/// Rejects a declared body size over the limit before reading anything.
fn enforce_body_limit(headers: &HeaderMap, max_body_bytes: usize) -> Result<(), UpstreamError> {
    if let Some(value) = headers.get(header::CONTENT_LENGTH) {
        let length = value
            .to_str()
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .ok_or(UpstreamError::InvalidContentLength)?;
        if length > max_body_bytes {
            return Err(UpstreamError::PayloadTooLarge(max_body_bytes));
        }
    }
    Ok(())
}

/// Headers that describe one hop, not the message.
fn is_hop_header(name: &header::HeaderName) -> bool {
    name == header::HOST
        || name == header::CONNECTION
        || name == header::TRANSFER_ENCODING
        || name == header::CONTENT_LENGTH
}

fn end_to_end_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !is_hop_header(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn forward(&self, request: Request) -> Result<Response, UpstreamError> {
        let (parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = format!("{}{}", self.base_url, path_and_query);
        let url = reqwest::Url::parse(&url).map_err(|_| UpstreamError::InvalidUrl(url))?;

        enforce_body_limit(&parts.headers, self.max_body_bytes)?;
        // Chunked bodies carry no length header; the limit is hit while reading.
        let body = to_bytes(body, self.max_body_bytes).await.map_err(|e| {
            if e.to_string().contains("length limit") {
                UpstreamError::PayloadTooLarge(self.max_body_bytes)
            } else {
                UpstreamError::Body(e)
            }
        })?;

        let upstream_response = self
            .client
            .request(parts.method, url)
            .headers(end_to_end_headers(&parts.headers))
            .body(body)
            .send()
            .await?;

        let status = upstream_response.status();
        let headers = end_to_end_headers(upstream_response.headers());
        let bytes = upstream_response.bytes().await?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

// 3. The Mock Implementation (For Tests)
/// MockUpstream
///
/// Answers every forwarded request itself with `200 frontend:<path>`, so tests
/// can tell a pass-through apart from a gatekeeper redirect.
#[derive(Clone, Default)]
pub struct MockUpstream {
    /// When true, every forward fails as if the frontend were down.
    pub should_fail: bool,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn new_failing() -> Self {
        Self { should_fail: true }
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn forward(&self, request: Request) -> Result<Response, UpstreamError> {
        if self.should_fail {
            return Err(UpstreamError::Unavailable(
                "Mock Upstream Error: Simulation requested".to_string(),
            ));
        }

        let mut response = Response::new(Body::from(format!("frontend:{}", request.uri().path())));
        *response.status_mut() = StatusCode::OK;
        Ok(response)
    }
}

/// UpstreamState
///
/// The concrete type used to share the upstream across the application state.
pub type UpstreamState = Arc<dyn Upstream>;
