use crate::database::{MediaRepository, PageRepository};
use crate::domain::{MediaBlob, Page, PageContent, PageFilter};
use crate::features::media::model::DbMedia;
use crate::features::pages::model::DbPage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Pool, Sqlite};

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageRepository for SqliteRepository {
    async fn get_page_by_id(&self, id: &str) -> Result<Option<Page>> {
        let db_page_opt = sqlx::query_as::<_, DbPage>("SELECT * FROM pages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        // translate to pure Page model
        match db_page_opt {
            Some(db_page) => Ok(Some(db_page.try_into()?)),
            None => Ok(None),
        }
    }

    async fn get_page_by_path(&self, path: &str) -> Result<Option<Page>> {
        let db_page_opt = sqlx::query_as::<_, DbPage>(
            "SELECT * FROM pages WHERE path = ? ORDER BY created_at ASC, id ASC LIMIT 1",
        )
        .bind(path)
        .fetch_optional(&self.pool)
        .await?;

        match db_page_opt {
            Some(db_page) => Ok(Some(db_page.try_into()?)),
            None => Ok(None),
        }
    }

    async fn list_pages(&self, filter: &PageFilter) -> Result<Vec<Page>> {
        // prefix match via substr keeps '%' and '_' in paths literal
        let db_pages = sqlx::query_as::<_, DbPage>(
            r#"
            SELECT * FROM pages
            WHERE (?1 IS NULL OR template = ?1)
              AND (?2 IS NULL OR substr(path, 1, length(?2)) = ?2)
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(filter.template.as_deref())
        .bind(filter.prefix.as_deref())
        .fetch_all(&self.pool)
        .await?;

        let mut pages = Vec::new();
        for db_page in db_pages {
            pages.push(db_page.try_into()?);
        }

        Ok(pages)
    }

    async fn insert_page(&self, page: &Page) -> Result<()> {
        // translate the pure Page down into a DbPage for SQLite
        let db_page: DbPage = page.try_into()?;

        sqlx::query(
            r#"
            INSERT INTO pages (id, path, template, content, created_at, modified_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&db_page.id)
        .bind(&db_page.path)
        .bind(&db_page.template)
        .bind(&db_page.content)
        .bind(db_page.created_at)
        .bind(db_page.modified_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert page {}", page.path))?;

        Ok(())
    }

    async fn replace_content(
        &self,
        id: &str,
        content: &PageContent,
        modified_at: NaiveDateTime,
    ) -> Result<bool> {
        let content_json = serde_json::to_string(content)?;

        let result = sqlx::query("UPDATE pages SET content = ?, modified_at = ? WHERE id = ?")
            .bind(content_json)
            .bind(modified_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to update page {}", id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_page(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete page {}", id))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MediaRepository for SqliteRepository {
    async fn get_media(&self, filename: &str) -> Result<Option<MediaBlob>> {
        let db_media = sqlx::query_as::<_, DbMedia>("SELECT * FROM media WHERE filename = ?")
            .bind(filename)
            .fetch_optional(&self.pool)
            .await?;

        Ok(db_media.map(MediaBlob::from))
    }

    async fn media_exists(&self, filename: &str) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM media WHERE filename = ?")
            .bind(filename)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    async fn insert_media(&self, blob: &MediaBlob) -> Result<()> {
        let db_media = DbMedia::from(blob);

        sqlx::query(
            r#"
            INSERT INTO media (filename, bytes, content_hash, size, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&db_media.filename)
        .bind(&db_media.bytes)
        .bind(&db_media.content_hash)
        .bind(db_media.size)
        .bind(db_media.created_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to store media {}", blob.filename))?;

        Ok(())
    }

    async fn delete_media(&self, filename: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM media WHERE filename = ?")
            .bind(filename)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete media {}", filename))?;

        Ok(result.rows_affected() > 0)
    }
}
