use crate::io::{TemplateSource, verify_absolute_path, verify_template_name};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use walkdir::WalkDir;

pub const TEMPLATE_EXTENSION: &str = "html";

/// Templates stored as `{root}/{name}.html`.
pub struct LocalTemplateSource {
    pub root_path: PathBuf,
}

impl LocalTemplateSource {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }
}

#[async_trait]
impl TemplateSource for LocalTemplateSource {
    async fn load(&self, name: &str) -> Result<Option<String>> {
        let name = match verify_template_name(name) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Rejected template lookup: {}", e);
                return Ok(None);
            }
        };

        let candidate = self
            .root_path
            .join(format!("{}.{}", name, TEMPLATE_EXTENSION));

        if !candidate.is_file() {
            return Ok(None);
        }

        let verified = verify_absolute_path(&self.root_path, &candidate)?;
        match tokio::fs::read_to_string(&verified).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read template {}", verified.display()))
            }
        }
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root_path)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file()
                || entry.path().extension().and_then(|s| s.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root_path) {
                Ok(relative) => relative,
                Err(_) => continue,
            };

            names.push(
                relative
                    .with_extension("")
                    .to_string_lossy()
                    .replace('\\', "/"),
            );
        }
        names.sort();
        Ok(names)
    }
}
