//! HTTP router.
//!
//! Layers (outermost first): CORS, request tracing, body limit removal, then
//! the handlers.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::application::AnalysisService;
use crate::domain::analysis::ProfileId;

/// Build the service router with all routes and middleware.
pub fn build_router(service: Arc<AnalysisService>) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            ProfileId::Overview.route(),
            post(endpoints::analysis::generate_overview),
        )
        .route(
            ProfileId::Detailed.route(),
            post(endpoints::analysis::generate_detailed),
        )
        .with_state(service)
        // Transcripts are forwarded whole, whatever their size
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Permissive CORS: any origin, method and header, with credentials.
///
/// Wildcards cannot be combined with credentials, so the request's own
/// origin, method and headers are echoed back instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::endpoints::health::HealthResponse;
    use crate::api::error::ErrorBody;
    use crate::application::ports::{CompletionOracle, CompletionRequest, OracleError};
    use crate::application::ProfileRegistry;
    use crate::domain::config::ValidationMode;

    /// Oracle that fails every call and counts invocations
    #[derive(Default)]
    struct BrokenOracle {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionOracle for BrokenOracle {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(OracleError::InvalidApiKey(
                "Incorrect API key provided".to_string(),
            ))
        }
    }

    fn app(oracle: Arc<BrokenOracle>) -> Router {
        let service = AnalysisService::new(
            ProfileRegistry::default(),
            oracle,
            ValidationMode::Passthrough,
        );
        build_router(Arc::new(service))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn health_ignores_broken_oracle() {
        let oracle = Arc::new(BrokenOracle::default());
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app(oracle.clone()).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, "audio-intercept-api");
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oracle_failure_is_500_on_both_routes() {
        for uri in ["/generate-overview", "/generate-detailed-analysis"] {
            let oracle = Arc::new(BrokenOracle::default());
            let response = app(oracle.clone())
                .oneshot(post_json(uri, r#"{"transcript":"Unit Alpha"}"#))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body: ErrorBody = serde_json::from_slice(&body_bytes(response).await).unwrap();
            assert_eq!(body.detail, "Invalid API key: Incorrect API key provided");
            assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn get_on_analysis_route_is_405() {
        let req = Request::builder()
            .uri("/generate-overview")
            .body(Body::empty())
            .unwrap();
        let response = app(Arc::new(BrokenOracle::default())).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn cors_echoes_origin_with_credentials() {
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/generate-overview")
            .header(header::ORIGIN, "https://console.example.org")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app(Arc::new(BrokenOracle::default())).oneshot(req).await.unwrap();
        let headers = response.headers();

        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://console.example.org"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }
}
