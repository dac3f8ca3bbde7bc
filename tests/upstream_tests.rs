use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use tutoring_gate::{
    HttpUpstream, MockUpstream,
    errors::UpstreamError,
    upstream::Upstream,
};

fn request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

#[cfg(test)]
mod mock_tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_path() {
        let mock = MockUpstream::new();
        let response = mock.forward(request("/episodes/12?tab=notes")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"frontend:/episodes/12");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockUpstream::new_failing();
        let result = mock.forward(request("/about")).await;
        assert!(matches!(result, Err(UpstreamError::Unavailable(_))));
    }
}

#[cfg(test)]
mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_frontend_is_transport_error() {
        // Port 9 (discard) on loopback is not expected to serve HTTP.
        let upstream = HttpUpstream::new("http://127.0.0.1:9/").unwrap();
        let result = upstream.forward(request("/about")).await;
        assert!(matches!(result, Err(UpstreamError::Transport(_))));
    }

    #[tokio::test]
    async fn test_declared_oversized_body_is_rejected() {
        let upstream = HttpUpstream::with_body_limit("http://127.0.0.1:9", 16).unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/contact")
            .header("content-length", "64")
            .body(Body::from(vec![b'x'; 64]))
            .unwrap();

        let result = upstream.forward(request).await;

        assert!(matches!(result, Err(UpstreamError::PayloadTooLarge(16))));
    }

    #[tokio::test]
    async fn test_undeclared_oversized_body_is_rejected() {
        // No content-length: the limit is only noticed while reading.
        let upstream = HttpUpstream::with_body_limit("http://127.0.0.1:9", 16).unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/contact")
            .body(Body::from(vec![b'x'; 64]))
            .unwrap();

        let result = upstream.forward(request).await;

        assert!(matches!(result, Err(UpstreamError::PayloadTooLarge(16))));
    }

    #[tokio::test]
    async fn test_invalid_content_length_is_rejected() {
        let upstream = HttpUpstream::new("http://127.0.0.1:9").unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/contact")
            .header("content-length", "nope")
            .body(Body::empty())
            .unwrap();

        let result = upstream.forward(request).await;

        assert!(matches!(result, Err(UpstreamError::InvalidContentLength)));
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected() {
        let upstream = HttpUpstream::new("not a url").unwrap();
        let result = upstream.forward(request("/about")).await;
        assert!(matches!(result, Err(UpstreamError::InvalidUrl(_))));
    }
}
