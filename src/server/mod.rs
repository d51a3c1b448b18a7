//! Data App HTTP Server
//!
//! HTTP layer built with Axum. Every page in the registry is mounted at its
//! own path; anything else is a 404.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Home page
//! - `GET /dashboard` - Analytics dashboard
//! - `GET /explorer` - Data explorer
//!
//! Non-root pages also answer with a trailing slash (`/dashboard/`).
//!
//! ## API
//! - `GET /api/v1/pages` - List mounted pages
//! - `GET /api/v1/export?page=..&binding=..` - Download a page's sample table as CSV
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use data_app::config::Config;
//! use data_app::pages::default_registry;
//! use data_app::server::{serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let state = AppState::new(default_registry()?, config.render.clone());
//!     serve(state, &config.server).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with every page, the API routes and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    let mut page_routes: Router<Arc<AppState>> = Router::new();
    for (path, title) in shared_state.registry.routes() {
        tracing::debug!(path = %path, title = %title, "Mounting page");
        page_routes = page_routes.route(path, get(routes::pages::render_page));
        if path != "/" {
            page_routes = page_routes.route(&format!("{}/", path), get(routes::pages::render_page));
        }
    }

    let api_routes = Router::new()
        .route("/pages", get(routes::pages::list_pages))
        .route("/export", get(routes::export::export_frame));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    page_routes
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .fallback(routes::pages::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ServerError> {
    let pages = state.registry.len();
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Data App listening on {} ({} pages)", addr, pages);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Data App shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::pages::default_registry;
    use crate::server::dto::{HealthResponse, PageListResponse};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let render = RenderConfig {
            seed: Some(42),
            width: None,
        };
        let state = AppState::new(default_registry().unwrap(), render);
        build_router(state)
    }

    async fn get_path(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_page() {
        let response = get_path(create_test_app(), "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let body = body_string(response).await;
        assert!(body.contains("<h1>Welcome to the Data App</h1>"));
        assert!(body.contains("Sample Data Visualization"));
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let response = get_path(create_test_app(), "/dashboard").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<h1>Analytics Dashboard</h1>"));
        assert!(body.contains("Summary Statistics"));
        assert!(body.contains("Daily Revenue"));
    }

    #[tokio::test]
    async fn test_explorer_page() {
        let response = get_path(create_test_app(), "/explorer").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<h1>Data Explorer</h1>"));
    }

    #[tokio::test]
    async fn test_trailing_slash_serves_page() {
        let response = get_path(create_test_app(), "/dashboard/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let with_slash = body_string(response).await;
        assert!(with_slash.contains("<h1>Analytics Dashboard</h1>"));

        let without_slash = body_string(get_path(create_test_app(), "/dashboard").await).await;
        assert_eq!(with_slash, without_slash);

        let response = get_path(create_test_app(), "/explorer/").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_seeded_pages_are_stable() {
        let first = body_string(get_path(create_test_app(), "/dashboard").await).await;
        let second = body_string(get_path(create_test_app(), "/dashboard").await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let response = get_path(create_test_app(), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_string(response).await;
        assert!(body.contains("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_health() {
        let response = get_path(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get_path(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.pages, 3);
    }

    #[tokio::test]
    async fn test_list_pages() {
        let response = get_path(create_test_app(), "/api/v1/pages").await;
        assert_eq!(response.status(), StatusCode::OK);

        let list: PageListResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(list.total, 3);
        assert_eq!(list.pages[1].path, "/dashboard");
        assert_eq!(list.pages[1].title, "Analytics Dashboard");
    }

    #[tokio::test]
    async fn test_export_csv() {
        let response = get_path(
            create_test_app(),
            "/api/v1/export?page=/dashboard&binding=metrics_data",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"dashboard_metrics_data.csv\""
        );

        let body = body_string(response).await;
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "date,users,revenue,conversion_rate");
        assert_eq!(lines.len(), 31);
        assert!(lines[1].starts_with("2024-01-01,"));
    }

    #[tokio::test]
    async fn test_export_errors() {
        let response = get_path(
            create_test_app(),
            "/api/v1/export?page=/dashboard&binding=nothing",
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get_path(
            create_test_app(),
            "/api/v1/export?page=/dashboard&binding=total_users",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get_path(create_test_app(), "/api/v1/export?page=/missing&binding=x").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get_path(create_test_app(), "/api/v1/export?page=/dashboard").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["request_id"].is_string());
    }
}
