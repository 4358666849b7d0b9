//! Axum front end: HTML pages, the stats API and per-session tracking.

pub mod error;
pub mod html;
pub mod routes;
pub mod session;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::LoaderFailure;
pub use session::{SESSION_COOKIE, Session};
pub use state::AppState;

/// Create the application router with request tracing.
pub fn create_app(state: Arc<AppState>) -> Router {
    routes::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::pages::fake::{FakeExecutor, rows};
    use crate::types::RowValues;

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, cookie, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = create_app(AppState::new(Arc::new(FakeExecutor::default())));
        let (status, _, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn first_visit_sets_session_cookie() {
        let app = create_app(AppState::new(Arc::new(FakeExecutor::default())));
        let (status, cookie, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(cookie.unwrap().starts_with("northwind_session="));
        assert!(body.contains("Northwind Traders"));
    }

    #[tokio::test]
    async fn empty_search_runs_nothing() {
        let executor = Arc::new(FakeExecutor::default());
        let app = create_app(AppState::new(executor.clone()));
        let (status, _, body) = get(app, "/search?q=%20&table=products").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<form action=\"/search\""));
        assert!(executor.statements().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found_without_querying() {
        let executor = Arc::new(FakeExecutor::default());
        let app = create_app(AppState::new(executor.clone()));
        let (status, _, body) = get(app, "/product/abc").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("No such product"));
        assert!(executor.statements().is_empty());
    }

    #[tokio::test]
    async fn loader_failure_hides_database_text() {
        let app = create_app(AppState::new(Arc::new(FakeExecutor::default())));
        let (status, _, body) = get(app, "/products").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("No results"));
        assert!(body.contains(error::GENERIC_FAILURE));
        assert!(!body.contains("canned"));
    }

    #[tokio::test]
    async fn detail_page_renders_row() {
        let executor = Arc::new(FakeExecutor::answering(vec![rows(
            &["Id", "CompanyName"],
            vec![vec![RowValues::Int(1), "Exotic Liquids".into()]],
            "primary",
            0.3,
        )]));
        let app = create_app(AppState::new(executor));
        let (status, _, body) = get(app, "/supplier/1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Exotic Liquids"));
    }
}
