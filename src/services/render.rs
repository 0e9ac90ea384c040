use crate::config::SiteConfig;
use crate::domain::{Page, PageContent, PageFilter, normalize_path};
use crate::error::{CmsError, CmsResult};
use crate::io::TemplateSource;
use crate::parser::markdown::markdown_filter;
use crate::services::breadcrumbs::{self, Breadcrumb};
use crate::services::content::ContentRecordStore;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

// used when the site has no error template of its own
const FALLBACK_ERROR_TEMPLATE: &str = r#"<!doctype html>
<html>
<head><title>{{ title }} | {{ domain }}</title></head>
<body>
<nav>{% for crumb in breadcrumbs %}<a href="{{ crumb.link }}">{{ crumb.name }}</a>{% if not loop.last %} / {% endif %}{% endfor %}</nav>
<h1>{{ status }}</h1>
<p>{{ description }}</p>
</body>
</html>
"#;

/// The part of the incoming request exposed to templates as `request`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestContext {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

/// Keys owned by the renderer. They always win over same-named content fields.
#[derive(Debug, Clone, Serialize)]
pub struct ReservedContext {
    pub title: String,
    pub description: String,
    pub domain: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub page: Option<Page>,
    pub request: RequestContext,
}

/// Two-layer render context: content fields underneath, reserved keys on top.
pub struct RenderContext {
    pub reserved: ReservedContext,
    pub content: PageContent,
}

impl RenderContext {
    pub fn into_value(self) -> CmsResult<serde_json::Value> {
        let mut merged = self.content;

        let reserved = serde_json::to_value(&self.reserved)
            .map_err(|e| CmsError::ServerError(format!("render context: {}", e)))?;
        if let serde_json::Value::Object(reserved) = reserved {
            for (key, value) in reserved {
                merged.insert(key, value);
            }
        }

        Ok(serde_json::Value::Object(merged))
    }
}

pub struct PageRenderer {
    pages: Arc<ContentRecordStore>,
    templates: Arc<dyn TemplateSource>,
    site: SiteConfig,
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new(
        pages: Arc<ContentRecordStore>,
        templates: Arc<dyn TemplateSource>,
        site: SiteConfig,
    ) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_filter("markdown", markdown_filter);

        Self {
            pages,
            templates,
            site,
            env,
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Renders the page stored at `path` with its bound template.
    pub async fn render(&self, path: &str, request: RequestContext) -> CmsResult<String> {
        let page = self.pages.get_by_path(path).await?;
        let crumbs = breadcrumbs::build(&page.path);
        let source = self.load_template(&page.template).await?;

        let reserved = ReservedContext {
            title: page
                .content_str("title")
                .unwrap_or(&self.site.title)
                .to_string(),
            description: page
                .content_str("description")
                .unwrap_or(&self.site.description)
                .to_string(),
            domain: self.site.domain.clone(),
            breadcrumbs: crumbs,
            page: None,
            request,
        };

        let content = page.content.clone();
        let context = RenderContext {
            reserved: ReservedContext {
                page: Some(page),
                ..reserved
            },
            content,
        };

        self.render_source(&source, context)
    }

    /// Lists every page under the blog prefix, newest first, through the index template.
    pub async fn render_index(&self, request: RequestContext) -> CmsResult<String> {
        let prefix = normalize_path(&self.site.blog_prefix);
        let pages = self
            .pages
            .list(&PageFilter {
                template: None,
                // an empty blog prefix lists every page
                prefix: Some(&prefix)
                    .filter(|p| !p.is_empty())
                    .map(|p| format!("{}/", p)),
            })
            .await?;
        let source = self.load_template(&self.site.blog_index_template).await?;

        let mut content = PageContent::new();
        content.insert(
            "pages".into(),
            serde_json::to_value(&pages)
                .map_err(|e| CmsError::ServerError(format!("page listing: {}", e)))?,
        );

        let context = RenderContext {
            reserved: ReservedContext {
                title: self.site.title.clone(),
                description: self.site.description.clone(),
                domain: self.site.domain.clone(),
                breadcrumbs: breadcrumbs::build(&prefix),
                page: None,
                request,
            },
            content,
        };

        self.render_source(&source, context)
    }

    /// Human-readable error page. Never fails: a broken error template falls back to
    /// the built-in markup.
    pub async fn render_error(&self, err: &CmsError, request: &RequestContext) -> String {
        let status = err.status();

        let mut content = PageContent::new();
        content.insert("status".into(), status.as_u16().into());

        let context = RenderContext {
            reserved: ReservedContext {
                title: status
                    .canonical_reason()
                    .unwrap_or("Error")
                    .to_string(),
                description: err.public_message(),
                domain: self.site.domain.clone(),
                breadcrumbs: breadcrumbs::build(
                    request
                        .path
                        .strip_prefix("/page/")
                        .unwrap_or(&request.path),
                ),
                page: None,
                request: request.clone(),
            },
            content,
        };

        let value = match context.into_value() {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to build error page context: {}", e);
                return status.to_string();
            }
        };

        let custom = match self.templates.load(&self.site.error_template).await {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Error template unavailable: {:#}", e);
                None
            }
        };

        if let Some(source) = custom {
            match self.env.render_str(&source, &value) {
                Ok(html) => return html,
                Err(e) => tracing::error!("Error template failed to render: {:#}", e),
            }
        }

        self.env
            .render_str(FALLBACK_ERROR_TEMPLATE, &value)
            .unwrap_or_else(|_| status.to_string())
    }

    async fn load_template(&self, name: &str) -> CmsResult<String> {
        self.templates
            .load(name)
            .await
            .map_err(|e| CmsError::ServerError(format!("template '{}' unreadable: {:#}", name, e)))?
            .ok_or_else(|| CmsError::ServerError(format!("template '{}' is missing", name)))
    }

    fn render_source(&self, source: &str, context: RenderContext) -> CmsResult<String> {
        let value = context.into_value()?;
        self.env
            .render_str(source, value)
            .map_err(|e| CmsError::ServerError(format!("render failed: {:#}", e)))
    }
}
