use crate::database::PageRepository;
use crate::domain::{Page, PageContent, PageFilter, normalize_path};
use crate::error::{CmsError, CmsResult};
use chrono::Utc;
use uuid::Uuid;

/// Page records keyed by id, addressable by path.
pub struct ContentRecordStore {
    repo: Box<dyn PageRepository>,
}

impl ContentRecordStore {
    pub fn new(repo: Box<dyn PageRepository>) -> Self {
        Self { repo }
    }

    /// Inserts a new page and returns its id.
    ///
    /// Paths are not required to be unique. When one is already taken the new
    /// record is still written, and `get_by_path` keeps resolving to the oldest.
    pub async fn create(
        &self,
        path: &str,
        template: &str,
        content: PageContent,
    ) -> CmsResult<String> {
        let template = template.trim();
        if template.is_empty() {
            return Err(CmsError::BadRequest("template is required".into()));
        }

        let path = normalize_path(path);
        if let Some(existing) = self.repo.get_page_by_path(&path).await? {
            tracing::warn!(
                "Path '{}' already belongs to page {}; creating a duplicate",
                path,
                existing.id
            );
        }

        let now = Utc::now().naive_utc();
        let page = Page {
            id: Uuid::new_v4().to_string(),
            path,
            template: template.to_string(),
            content,
            created_at: now,
            modified_at: now,
        };

        self.repo.insert_page(&page).await?;
        tracing::info!("Created page {} at '{}'", page.id, page.path);

        Ok(page.id)
    }

    pub async fn get(&self, id: &str) -> CmsResult<Page> {
        self.repo
            .get_page_by_id(id)
            .await?
            .ok_or_else(|| CmsError::NotFound(format!("page {}", id)))
    }

    pub async fn get_by_path(&self, path: &str) -> CmsResult<Page> {
        let path = normalize_path(path);
        self.repo
            .get_page_by_path(&path)
            .await?
            .ok_or_else(|| CmsError::NotFound(format!("page at '{}'", path)))
    }

    /// Pages matching the filter, newest first. The prefix is a plain string prefix.
    pub async fn list(&self, filter: &PageFilter) -> CmsResult<Vec<Page>> {
        let filter = PageFilter {
            template: filter
                .template
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            // only the leading slash goes; a trailing one narrows the match to children
            prefix: filter
                .prefix
                .as_deref()
                .map(|p| p.trim().trim_start_matches('/').to_string())
                .filter(|p| !p.is_empty()),
        };

        Ok(self.repo.list_pages(&filter).await?)
    }

    /// Replaces the whole content mapping. Fields absent from `content` are dropped.
    pub async fn update(&self, id: &str, content: PageContent) -> CmsResult<()> {
        let now = Utc::now().naive_utc();
        let touched = self.repo.replace_content(id, &content, now).await?;
        if !touched {
            return Err(CmsError::NotFound(format!("page {}", id)));
        }

        tracing::info!("Updated page {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> CmsResult<()> {
        if !self.repo.delete_page(id).await? {
            return Err(CmsError::NotFound(format!("page {}", id)));
        }

        tracing::info!("Deleted page {}", id);
        Ok(())
    }
}
