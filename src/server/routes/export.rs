//! Export Routes
//!
//! - GET /api/v1/export?page=<path>&binding=<name> - Render a page and
//!   download one of its sample tables as CSV

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::registry::normalize_path;
use crate::server::dto::ExportParams;
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

/// GET /api/v1/export
///
/// The page is rendered fresh, so unseeded servers export a new sample on
/// every call.
pub async fn export_frame(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ExportParams>, QueryRejection>,
) -> ServerResult<Response> {
    let Query(params) = params.map_err(|e| ServerError::Validation(e.body_text()))?;
    let page = state.render_page(&params.page)?;

    let value = page.bindings.get(&params.binding).ok_or_else(|| {
        ServerError::NotFound(format!(
            "Page {} has no binding '{}'",
            params.page, params.binding
        ))
    })?;

    let frame = value.as_frame().ok_or_else(|| {
        ServerError::Validation(format!(
            "'{}' is a {}, only frames can be exported",
            params.binding,
            value.type_name()
        ))
    })?;

    let body = frame.to_csv()?;

    tracing::info!(
        page = %params.page,
        binding = %params.binding,
        rows = frame.n_rows(),
        "Exported sample table"
    );

    let filename = format!("{}_{}.csv", page_slug(&params.page), params.binding);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// File-name friendly form of a page path: `/` -> `index`, `/a/b` -> `a_b`
fn page_slug(path: &str) -> String {
    let normalized = normalize_path(path);
    let slug = normalized.trim_start_matches('/').replace('/', "_");
    if slug.is_empty() {
        "index".to_string()
    } else {
        slug
    }
}
