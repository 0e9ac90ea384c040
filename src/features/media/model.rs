use crate::domain::{MediaBlob, MediaRef};
use chrono::NaiveDateTime;
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Eq, PartialEq, Clone, Display)]
#[display("{}", filename)]
pub struct DbMedia {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_hash: String,
    pub size: i64,
    pub created_at: NaiveDateTime,
}

impl From<&MediaBlob> for DbMedia {
    fn from(blob: &MediaBlob) -> Self {
        DbMedia {
            filename: blob.filename.clone(),
            bytes: blob.bytes.clone(),
            content_hash: blob.content_hash.clone(),
            size: blob.size() as i64,
            created_at: blob.created_at,
        }
    }
}

impl From<DbMedia> for MediaBlob {
    fn from(db_media: DbMedia) -> Self {
        MediaBlob {
            filename: db_media.filename,
            bytes: db_media.bytes,
            content_hash: db_media.content_hash,
            created_at: db_media.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct IngestRequest {
    pub url: String,
    pub slug: String,
}

/// Body of a media upload response. `conflict_pending` asks the caller to confirm.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadResponse {
    Stored(MediaRef),
    ConflictPending {
        filename: String,
    },
}
