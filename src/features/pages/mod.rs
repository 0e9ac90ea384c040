pub mod model;

use crate::AppState;
use crate::domain::PageFilter;
use crate::error::CmsError;
use crate::features::auth::AdminUser;
use crate::features::json::CmsJson;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use model::{CreatePageRequest, CreatedPage, JsonPage, UpdatePageRequest};
use tracing::instrument;

pub fn pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pages_handler).post(create_page_handler))
        .route("/by-path/{*path}", get(get_page_by_path_handler))
        .route(
            "/{id}",
            get(get_page_handler)
                .put(update_page_handler)
                .delete(delete_page_handler),
        )
}

async fn list_pages_handler(
    State(state): State<AppState>,
    Query(filter): Query<PageFilter>,
) -> Result<Json<Vec<JsonPage>>, CmsError> {
    let pages = state.pages.list(&filter).await?;
    Ok(Json(pages.iter().map(JsonPage::from).collect()))
}

async fn get_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JsonPage>, CmsError> {
    let page = state.pages.get(&id).await?;
    Ok(Json(JsonPage::from(&page)))
}

async fn get_page_by_path_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<JsonPage>, CmsError> {
    let page = state.pages.get_by_path(&path).await?;
    Ok(Json(JsonPage::from(&page)))
}

// when an image is attached it is fetched and stored before the page is written.
// a failed page write leaves that blob behind; nothing cleans it up
#[instrument(skip(_admin, state, request), fields(path = %request.path))]
async fn create_page_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    CmsJson(request): CmsJson<CreatePageRequest>,
) -> Result<(StatusCode, Json<CreatedPage>), CmsError> {
    let mut content = request.content;

    if let Some(image) = request.image {
        let media = state
            .media
            .store_from_url(&image.url, &image.slug, state.config.fetch_timeout)
            .await?;
        content.insert(image.field, serde_json::Value::String(media.url));
    }

    let id = state
        .pages
        .create(&request.path, &request.template, content)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedPage { id })))
}

#[instrument(skip(_admin, state, request))]
async fn update_page_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    CmsJson(request): CmsJson<UpdatePageRequest>,
) -> Result<StatusCode, CmsError> {
    state.pages.update(&id, request.content).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(_admin, state))]
async fn delete_page_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CmsError> {
    state.pages.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
