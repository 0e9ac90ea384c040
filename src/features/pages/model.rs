use crate::domain::{Page, PageContent};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

/// Row shape of the `pages` table. Content is stored as a JSON object string.
#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{}", path)]
pub struct DbPage {
    pub id: String,
    pub path: String,
    pub template: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
}

impl TryFrom<&Page> for DbPage {
    type Error = anyhow::Error;

    fn try_from(page: &Page) -> Result<Self> {
        Ok(DbPage {
            id: page.id.clone(),
            path: page.path.clone(),
            template: page.template.clone(),
            content: serde_json::to_string(&page.content)?,
            created_at: page.created_at,
            modified_at: page.modified_at,
        })
    }
}

impl TryFrom<DbPage> for Page {
    type Error = anyhow::Error;

    fn try_from(db_page: DbPage) -> Result<Self> {
        // an empty column is treated as an empty mapping
        let content: PageContent = if db_page.content.trim().is_empty() {
            PageContent::new()
        } else {
            serde_json::from_str(&db_page.content)
                .with_context(|| format!("Page {} has malformed content", db_page.id))?
        };

        Ok(Page {
            id: db_page.id,
            path: db_page.path,
            template: db_page.template,
            content,
            created_at: db_page.created_at,
            modified_at: db_page.modified_at,
        })
    }
}

#[derive(Serialize, Deserialize)]
pub struct JsonPage {
    pub id: String,
    pub path: String,
    pub template: String,
    pub content: PageContent,
    pub created_at: String,
    pub modified_at: String,
}

pub const JSON_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl From<&Page> for JsonPage {
    fn from(page: &Page) -> Self {
        JsonPage {
            id: page.id.clone(),
            path: page.path.clone(),
            template: page.template.clone(),
            content: page.content.clone(),
            created_at: page.created_at.format(JSON_DATETIME_FORMAT).to_string(),
            modified_at: page.modified_at.format(JSON_DATETIME_FORMAT).to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct CreatePageRequest {
    pub path: String,
    pub template: String,
    #[serde(default)]
    pub content: PageContent,
    pub image: Option<ImageIngestRequest>,
}

/// Fetches a remote image before the page is written and points `field` at it.
#[derive(Deserialize)]
pub struct ImageIngestRequest {
    pub url: String,
    pub slug: String,
    #[serde(default = "default_image_field")]
    pub field: String,
}

fn default_image_field() -> String {
    "image".to_string()
}

#[derive(Deserialize)]
pub struct UpdatePageRequest {
    pub content: PageContent,
}

#[derive(Serialize)]
pub struct CreatedPage {
    pub id: String,
}
