use crate::database::MediaRepository;
use crate::domain::{MediaBlob, MediaObject, MediaRef, PutOutcome};
use crate::error::{CmsError, CmsResult};
use crate::services::fetch::{FetchError, ImageFetcher};
use chrono::Utc;
use image::ImageFormat;
use std::time::Duration;
use xxhash_rust::xxh3::xxh3_64;

pub const MEDIA_ROUTE_PREFIX: &str = "/media";

/// Named blobs with confirm-before-overwrite semantics.
pub struct MediaStore {
    repo: Box<dyn MediaRepository>,
    fetcher: Box<dyn ImageFetcher>,
}

impl MediaStore {
    pub fn new(repo: Box<dyn MediaRepository>, fetcher: Box<dyn ImageFetcher>) -> Self {
        Self { repo, fetcher }
    }

    /// Stores `bytes` under `filename`.
    ///
    /// An existing blob is left untouched unless `overwrite` is set, in which case
    /// it is deleted and the new one inserted. Those are two separate writes: a
    /// failure in between leaves no blob under that name.
    pub async fn put(&self, filename: &str, bytes: Vec<u8>, overwrite: bool) -> CmsResult<PutOutcome> {
        let filename = validate_filename(filename)?;

        if self.repo.media_exists(filename).await? {
            if !overwrite {
                tracing::info!("Upload of {} needs overwrite confirmation", filename);
                return Ok(PutOutcome::ConflictPending(filename.to_string()));
            }

            self.repo.delete_media(filename).await?;
            tracing::info!("Replacing media {}", filename);
        }

        let blob = MediaBlob {
            filename: filename.to_string(),
            content_hash: content_hash(&bytes),
            bytes,
            created_at: Utc::now().naive_utc(),
        };
        self.repo.insert_media(&blob).await?;
        tracing::info!("Stored media {} ({} bytes)", blob.filename, blob.size());

        Ok(PutOutcome::Stored(media_ref(filename)))
    }

    pub async fn get(&self, filename: &str) -> CmsResult<MediaObject> {
        let filename = validate_filename(filename)?;
        let blob = self
            .repo
            .get_media(filename)
            .await?
            .ok_or_else(|| CmsError::NotFound(format!("media {}", filename)))?;

        Ok(MediaObject {
            content_type: content_type_for(&blob.filename),
            filename: blob.filename,
            bytes: blob.bytes,
            content_hash: blob.content_hash,
        })
    }

    pub async fn delete(&self, filename: &str) -> CmsResult<()> {
        let filename = validate_filename(filename)?;
        if !self.repo.delete_media(filename).await? {
            return Err(CmsError::NotFound(format!("media {}", filename)));
        }

        tracing::info!("Deleted media {}", filename);
        Ok(())
    }

    /// Downloads an image and stores the raw payload as `{slug}.webp`, replacing any
    /// blob of that name.
    ///
    /// The bytes are not transcoded, so the stored encoding may not be WebP even
    /// though the name says so. A mismatch is logged.
    pub async fn store_from_url(
        &self,
        url: &str,
        slug: &str,
        timeout: Duration,
    ) -> CmsResult<MediaRef> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(CmsError::BadRequest("slug is required".into()));
        }
        let filename = format!("{}.webp", slug);
        validate_filename(&filename)?;

        let parsed = reqwest::Url::parse(url.trim())
            .map_err(|e| CmsError::BadRequest(format!("invalid url {}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CmsError::BadRequest(format!(
                "unsupported url scheme {}",
                parsed.scheme()
            )));
        }

        let fetched = self
            .fetcher
            .fetch(parsed.as_str(), timeout)
            .await
            .map_err(|e| match e {
                FetchError::InvalidUrl(_) | FetchError::Status(_) => {
                    CmsError::BadRequest(format!("could not fetch {}: {}", url, e))
                }
                FetchError::Timeout(_) | FetchError::Transport(_) => {
                    CmsError::ServerError(format!("could not fetch {}: {}", url, e))
                }
            })?;

        let declared = fetched.content_type.as_deref().unwrap_or("");
        if !declared.trim().to_ascii_lowercase().starts_with("image/") {
            return Err(CmsError::BadRequest(format!(
                "{} is not an image (content type '{}')",
                url, declared
            )));
        }

        match image::guess_format(&fetched.bytes) {
            Ok(ImageFormat::WebP) => {}
            Ok(format) => tracing::warn!(
                "Storing {:?} bytes from {} under {} without conversion",
                format,
                url,
                filename
            ),
            Err(_) => tracing::warn!(
                "Storing unrecognized image bytes from {} under {}",
                url,
                filename
            ),
        }

        match self.put(&filename, fetched.bytes, true).await? {
            PutOutcome::Stored(media) => Ok(media),
            // overwrite is forced above, so a conflict cannot come back
            PutOutcome::ConflictPending(name) => Err(CmsError::ServerError(format!(
                "unexpected conflict storing {}",
                name
            ))),
        }
    }
}

pub fn media_ref(filename: &str) -> MediaRef {
    MediaRef {
        filename: filename.to_string(),
        url: format!("{}/{}", MEDIA_ROUTE_PREFIX, filename),
        content_type: content_type_for(filename),
    }
}

pub fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:016x}", xxh3_64(bytes))
}

/// Accepts flat names only: no separators, traversal, control characters or
/// hidden files.
pub fn validate_filename(filename: &str) -> CmsResult<&str> {
    let trimmed = filename.trim();
    let reject = |reason: &str| Err(CmsError::BadRequest(format!("invalid filename: {}", reason)));

    if trimmed.is_empty() {
        return reject("empty");
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return reject("control characters are not allowed");
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return reject("path separators are not allowed");
    }
    if trimmed.contains("..") {
        return reject("'..' is not allowed");
    }
    if trimmed.starts_with('.') {
        return reject("hidden files are not allowed");
    }

    Ok(trimmed)
}
