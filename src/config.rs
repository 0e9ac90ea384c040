use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct CmsConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
    pub templates_dir: PathBuf,
    pub admin_secret: String,
    pub site: SiteConfig,
    pub fetch_timeout: Duration,
    pub fetch_user_agent: String,
    pub generator: Option<GeneratorConfig>,
}

// values that land in the reserved render context
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub domain: String,
    pub title: String,
    pub description: String,
    pub home_path: String,
    pub blog_prefix: String,
    pub blog_index_template: String,
    pub error_template: String,
}

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub base_url: String,
    pub copywriter_model: String,
    pub image_model: String,
    pub image_style: Option<String>,
}

impl CmsConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .context("Failed to determine DATABASE_URL from environment variables")?;

        let max_connections = std::env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(15);

        let bind_addr = env_or("BIND_ADDR", "0.0.0.0:3000");

        let templates_dir = PathBuf::from(env_or("TEMPLATES_DIR", "./templates"));
        if !templates_dir.is_dir() {
            anyhow::bail!(
                "TEMPLATES_DIR {} is not a directory",
                templates_dir.display()
            );
        }

        let admin_secret = std::env::var("ADMIN_SECRET").unwrap_or_default();

        let site = SiteConfig {
            domain: env_or("SITE_DOMAIN", "localhost"),
            title: env_or("SITE_TITLE", "Chasqui"),
            description: env_or("SITE_DESCRIPTION", ""),
            home_path: env_or("HOME_PATH", "index"),
            blog_prefix: env_or("BLOG_PREFIX", "blog"),
            blog_index_template: env_or("BLOG_INDEX_TEMPLATE", "blog_index"),
            error_template: env_or("ERROR_TEMPLATE", "error"),
        };

        let fetch_timeout_secs = std::env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .map(|val| {
                val.parse::<u64>()
                    .with_context(|| format!("FETCH_TIMEOUT_SECS is not a number: {val}"))
            })
            .transpose()?
            .unwrap_or(10);

        let fetch_user_agent = env_or(
            "FETCH_USER_AGENT",
            concat!("chasqui-cms/", env!("CARGO_PKG_VERSION")),
        );

        // generation is only wired when a key is present
        let generator = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|api_key| GeneratorConfig {
                api_key,
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                copywriter_model: env_or("COPYWRITER_MODEL", "gpt-4o"),
                image_model: env_or("IMAGE_MODEL", "dall-e-3"),
                image_style: std::env::var("IMAGE_STYLE").ok().filter(|s| !s.is_empty()),
            });

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            templates_dir,
            admin_secret,
            site,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            fetch_user_agent,
            generator,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
