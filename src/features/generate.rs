use crate::AppState;
use crate::error::CmsError;
use crate::features::auth::AdminUser;
use crate::features::json::CmsJson;
use crate::services::generate::{ArticleDraft, ContentGenerator, GeneratedImage};
use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ArticleRequest {
    pub content: String,
}

#[derive(Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

pub fn generate_router() -> Router<AppState> {
    Router::new()
        .route("/article", post(complement_article_handler))
        .route("/image", post(generate_image_handler))
}

fn generator(state: &AppState) -> Result<Arc<dyn ContentGenerator>, CmsError> {
    state
        .generator
        .clone()
        .ok_or_else(|| CmsError::ServerError("content generation is not configured".into()))
}

async fn complement_article_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    CmsJson(request): CmsJson<ArticleRequest>,
) -> Result<Json<ArticleDraft>, CmsError> {
    if request.content.trim().is_empty() {
        return Err(CmsError::BadRequest("content is required".into()));
    }

    let draft = generator(&state)?
        .complement_article(&request.content)
        .await?;
    Ok(Json(draft))
}

async fn generate_image_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    CmsJson(request): CmsJson<ImageRequest>,
) -> Result<Json<GeneratedImage>, CmsError> {
    if request.prompt.trim().is_empty() {
        return Err(CmsError::BadRequest("prompt is required".into()));
    }

    let image = generator(&state)?.generate_image(&request.prompt).await?;
    Ok(Json(image))
}
