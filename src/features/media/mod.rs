pub mod model;

use crate::AppState;
use crate::domain::PutOutcome;
use crate::error::CmsError;
use crate::features::auth::AdminUser;
use crate::features::json::CmsJson;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use model::{IngestRequest, UploadResponse};
use tracing::instrument;

const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Admin endpoints, nested under `/api/media`.
pub fn media_api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(upload_media_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/ingest", post(ingest_media_handler))
        .route("/{filename}", delete(delete_media_handler))
}

/// Public blob reads, nested under `/media`.
pub fn media_router() -> Router<AppState> {
    Router::new().route("/{filename}", get(get_media_handler))
}

async fn get_media_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> Result<Response, CmsError> {
    let media = state.media.get(&filename).await?;
    let etag = format!("\"{}\"", media.content_hash);

    let unchanged = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.split(',').any(|tag| tag.trim() == etag));
    if unchanged {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, media.content_type),
            (header::ETAG, etag),
        ],
        media.bytes,
    )
        .into_response())
}

// multipart fields: `file` (required), `filename` (overrides the uploaded name),
// `overwrite` ("true"/"1"/"on" confirms replacing an existing blob)
#[instrument(skip(_admin, state, multipart))]
async fn upload_media_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, CmsError> {
    let mut file: Option<(Option<String>, Vec<u8>)> = None;
    let mut filename: Option<String> = None;
    let mut overwrite = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CmsError::BadRequest(format!("multipart error: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let uploaded_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| CmsError::BadRequest(format!("unreadable file: {}", e)))?;
                file = Some((uploaded_name, bytes.to_vec()));
            }
            Some("filename") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| CmsError::BadRequest(format!("unreadable filename: {}", e)))?;
                filename = Some(text).filter(|t| !t.trim().is_empty());
            }
            Some("overwrite") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| CmsError::BadRequest(format!("unreadable overwrite flag: {}", e)))?;
                overwrite = matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "1" | "on");
            }
            _ => {}
        }
    }

    let (uploaded_name, bytes) =
        file.ok_or_else(|| CmsError::BadRequest("missing file field".into()))?;
    let filename = filename
        .or(uploaded_name)
        .ok_or_else(|| CmsError::BadRequest("missing filename".into()))?;

    let response = match state.media.put(&filename, bytes, overwrite).await? {
        PutOutcome::Stored(media) => (
            StatusCode::CREATED,
            Json(UploadResponse::Stored(media)),
        )
            .into_response(),
        PutOutcome::ConflictPending(filename) => (
            StatusCode::OK,
            Json(UploadResponse::ConflictPending { filename }),
        )
            .into_response(),
    };

    Ok(response)
}

#[instrument(skip(_admin, state, request), fields(slug = %request.slug))]
async fn ingest_media_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    CmsJson(request): CmsJson<IngestRequest>,
) -> Result<(StatusCode, Json<UploadResponse>), CmsError> {
    let media = state
        .media
        .store_from_url(&request.url, &request.slug, state.config.fetch_timeout)
        .await?;

    Ok((StatusCode::CREATED, Json(UploadResponse::Stored(media))))
}

#[instrument(skip(_admin, state))]
async fn delete_media_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<StatusCode, CmsError> {
    state.media.delete(&filename).await?;
    Ok(StatusCode::NO_CONTENT)
}
