use chrono::NaiveDateTime;
use derive_more::derive::Display;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_hash: String,
    pub created_at: NaiveDateTime,
}

impl MediaBlob {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// What callers get back after a blob was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[display("{}", url)]
pub struct MediaRef {
    pub filename: String,
    pub url: String,
    pub content_type: String,
}

/// A blob as served to readers, with its content type derived from the filename.
#[derive(Debug, Clone)]
pub struct MediaObject {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub content_hash: String,
}

/// Outcome of a put. A name clash without `overwrite` is not an error: the caller is
/// expected to confirm and retry with `overwrite = true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    Stored(MediaRef),
    ConflictPending(String),
}
