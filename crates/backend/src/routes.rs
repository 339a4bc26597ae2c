use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::system::auth::middleware::require_nonce;
use crate::system::middleware::request_logger::request_logger;

/// Shared by handlers and the nonce middleware
#[derive(Clone)]
pub struct AppState {
    pub token: Arc<str>,
    pub dist_dir: PathBuf,
}

impl AppState {
    pub fn new(token: &str, dist_dir: impl Into<PathBuf>) -> Self {
        Self {
            token: Arc::from(token),
            dist_dir: dist_dir.into(),
        }
    }
}

/// All application routes
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-wp-nonce"),
        ]);

    // REST endpoints of the debug log, protected by the nonce. CORS is scoped
    // here; pages that embed the nonce stay same-origin.
    let api = Router::new()
        .route(
            "/api/logs",
            get(handlers::debug_log::list).post(handlers::debug_log::create),
        )
        .route("/api/logs/clear", post(handlers::debug_log::clear))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_nonce))
        .layer(cors);

    Router::new()
        .route("/", get(handlers::debug_page::host_page))
        .route("/health", get(|| async { "ok" }))
        .merge(api)
        .fallback_service(ServeDir::new(&state.dist_dir))
        .layer(middleware::from_fn(request_logger))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use contracts::shared::debug_log::AUTH_HEADER;
    use tower::ServiceExt;

    #[test]
    fn test_cors_header_matches_auth_header() {
        assert_eq!(HeaderName::from_static("x-wp-nonce").as_str(), AUTH_HEADER.to_ascii_lowercase());
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = configure_routes(AppState::new("t", "dist"));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_routes_are_not_cross_origin_readable() {
        for uri in ["/health", "/pkg/frontend.js"] {
            let app = configure_routes(AppState::new("t", "dist"));
            let response = app
                .oneshot(
                    Request::builder()
                        .uri(uri)
                        .header(header::ORIGIN, "https://attacker.example")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert!(
                response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none(),
                "{}",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_api_preflight_is_answered() {
        let app = configure_routes(AppState::new("t", "dist"));
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/logs")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-wp-nonce")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_api_requires_nonce() {
        for (method, uri) in [("GET", "/api/logs"), ("POST", "/api/logs/clear"), ("POST", "/api/logs")] {
            let app = configure_routes(AppState::new("t", "dist"));
            let response = app
                .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        }
    }
}
