//! Page Routes
//!
//! - GET <page path> - Render the notebook mounted at that path
//! - GET /api/v1/pages - List mounted pages
//! - any other path - 404

use axum::{
    extract::{MatchedPath, State},
    http::Uri,
    response::Html,
    Json,
};
use std::sync::Arc;
use std::time::Instant;

use crate::server::dto::{PageInfo, PageListResponse};
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

/// GET <page path>
///
/// Runs every cell of the page and returns the full HTML document.
pub async fn render_page(
    State(state): State<Arc<AppState>>,
    path: MatchedPath,
) -> ServerResult<Html<String>> {
    let started = Instant::now();
    let page = state.render_page(path.as_str())?;
    let html = page.to_html().into_string();

    tracing::debug!(
        path = %path.as_str(),
        outputs = page.outputs.len(),
        bytes = html.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Page rendered"
    );

    Ok(Html(html))
}

/// GET /api/v1/pages
pub async fn list_pages(State(state): State<Arc<AppState>>) -> Json<PageListResponse> {
    let pages: Vec<PageInfo> = state
        .registry
        .routes()
        .map(|(path, title)| PageInfo {
            path: path.to_string(),
            title: title.to_string(),
        })
        .collect();

    Json(PageListResponse {
        total: pages.len(),
        pages,
    })
}

/// Fallback for unmatched paths
pub async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(format!("No page mounted at {}", uri.path()))
}
