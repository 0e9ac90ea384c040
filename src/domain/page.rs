use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Free-form field data attached to a page. Values are usually strings, but
/// editors may supply nested JSON; nothing checks them against the template.
pub type PageContent = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub id: String,
    pub path: String,
    pub template: String,
    pub content: PageContent,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
}

impl Page {
    /// Returns a content field only when it holds a non-empty string.
    pub fn content_str(&self, field: &str) -> Option<&str> {
        self.content
            .get(field)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

// filters accepted by listing; both are optional and combine with AND
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageFilter {
    pub template: Option<String>,
    pub prefix: Option<String>,
}

/// Normalizes a page path: surrounding whitespace and slashes are dropped so that
/// `/blog/post/` and `blog/post` address the same record.
pub fn normalize_path(path: &str) -> String {
    path.trim().trim_matches('/').to_string()
}
