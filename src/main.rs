use crate::config::CmsConfig;
use crate::database::sqlite::SqliteRepository;
use crate::io::TemplateSource;
use crate::io::local::LocalTemplateSource;
use crate::services::fetch::HttpImageFetcher;
use crate::services::generate::{ContentGenerator, OpenAiGenerator};
use crate::services::{ContentRecordStore, MediaStore, PageRenderer};
use anyhow::Context;
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub mod config;
mod database;
mod domain;
mod error;
mod features;
mod io;
mod parser;
mod services;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub pages: Arc<ContentRecordStore>,
    pub media: Arc<MediaStore>,
    pub renderer: Arc<PageRenderer>,
    pub templates: Arc<dyn TemplateSource>,
    pub generator: Option<Arc<dyn ContentGenerator>>,
    pub config: Arc<CmsConfig>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // load centralized config
    let config = Arc::new(CmsConfig::from_env()?);

    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        tracing::info!(
            "Unable to connect to database at {}, creating...",
            config.database_url
        );
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    // connect to our db
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    // run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations.")?;

    let templates: Arc<dyn TemplateSource> =
        Arc::new(LocalTemplateSource::new(config.templates_dir.clone()));

    let pages = Arc::new(ContentRecordStore::new(Box::new(SqliteRepository::new(
        pool.clone(),
    ))));
    let media = Arc::new(MediaStore::new(
        Box::new(SqliteRepository::new(pool.clone())),
        Box::new(HttpImageFetcher::new(&config.fetch_user_agent)?),
    ));
    let renderer = Arc::new(PageRenderer::new(
        pages.clone(),
        templates.clone(),
        config.site.clone(),
    ));

    let generator = config.generator.clone().map(|generator_config| {
        Arc::new(OpenAiGenerator::new(generator_config)) as Arc<dyn ContentGenerator>
    });
    if generator.is_none() {
        tracing::info!("OPENAI_API_KEY not set; generation endpoints are disabled");
    }
    if config.admin_secret.is_empty() {
        tracing::warn!("ADMIN_SECRET not set; every admin request will be rejected");
    }

    let app_state = AppState {
        pages,
        media,
        renderer,
        templates,
        generator,
        config: config.clone(),
    };

    let app = features::app_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
