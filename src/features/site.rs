use crate::AppState;
use crate::error::CmsError;
use crate::services::render::RequestContext;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::Uri,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::collections::BTreeMap;

/// Visitor-facing HTML routes.
pub fn site_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(blog_index_handler))
        .route("/page/{*path}", get(page_handler))
}

async fn home_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
    uri: Uri,
) -> Response {
    let home = state.renderer.site().home_path.clone();
    render_or_error_page(&state, &home, request_context(&uri, query)).await
}

async fn page_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
    uri: Uri,
) -> Response {
    render_or_error_page(&state, &path, request_context(&uri, query)).await
}

async fn blog_index_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
    uri: Uri,
) -> Response {
    let request = request_context(&uri, query);
    match state.renderer.render_index(request.clone()).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_page(&state, err, &request).await,
    }
}

/// Any URL no route claims gets the themed 404 page.
pub async fn not_found_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
    uri: Uri,
) -> Response {
    let request = request_context(&uri, query);
    let err = CmsError::NotFound(format!("route {}", request.path));
    error_page(&state, err, &request).await
}

async fn render_or_error_page(state: &AppState, path: &str, request: RequestContext) -> Response {
    match state.renderer.render(path, request.clone()).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_page(state, err, &request).await,
    }
}

// 404 and 500 become a themed page; anything else keeps the plain JSON error
async fn error_page(state: &AppState, err: CmsError, request: &RequestContext) -> Response {
    match &err {
        CmsError::NotFound(what) => {
            tracing::debug!("Visitor hit missing {}", what);
        }
        CmsError::ServerError(detail) => {
            tracing::error!("Failed to render {}: {}", request.path, detail);
        }
        _ => return err.into_response(),
    }

    let html = state.renderer.render_error(&err, request).await;
    (err.status(), Html(html)).into_response()
}

fn request_context(uri: &Uri, query: BTreeMap<String, String>) -> RequestContext {
    RequestContext {
        path: uri.path().to_string(),
        query,
    }
}
