use crate::domain::{MediaBlob, Page, PageContent, PageFilter};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

pub mod sqlite;

// a repository can be shared between threads (sqlx::Pool is thread safe)
// generic page/blob primitives live here, db specific implementations in "sqlite.rs"
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn get_page_by_id(&self, id: &str) -> Result<Option<Page>>;
    // oldest record wins when several share a path
    async fn get_page_by_path(&self, path: &str) -> Result<Option<Page>>;
    // newest first
    async fn list_pages(&self, filter: &PageFilter) -> Result<Vec<Page>>;

    // write operations; the bool reports whether a row was touched
    async fn insert_page(&self, page: &Page) -> Result<()>;
    async fn replace_content(
        &self,
        id: &str,
        content: &PageContent,
        modified_at: NaiveDateTime,
    ) -> Result<bool>;
    async fn delete_page(&self, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn get_media(&self, filename: &str) -> Result<Option<MediaBlob>>;
    async fn media_exists(&self, filename: &str) -> Result<bool>;
    async fn insert_media(&self, blob: &MediaBlob) -> Result<()>;
    async fn delete_media(&self, filename: &str) -> Result<bool>;
}
