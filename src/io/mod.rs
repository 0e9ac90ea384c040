use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

pub mod local;

/// Where template text comes from. `load` answers `Ok(None)` when no template has
/// that name; read failures are errors.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn load(&self, name: &str) -> Result<Option<String>>;
    async fn list(&self) -> Result<Vec<String>>;
}

// template names are relative, slash-separated, and may not climb out of the root
pub fn verify_template_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Template name is empty"));
    }
    if trimmed.contains('\\') || trimmed.contains('\0') {
        return Err(anyhow!("Template name {} contains invalid characters", name));
    }

    let path = Path::new(trimmed);
    let only_normal = path
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !only_normal {
        return Err(anyhow!("Template name {} escapes the template root", name));
    }

    Ok(trimmed)
}

// joins a verified name onto the root and makes sure symlinks did not lead elsewhere
pub fn verify_absolute_path(root: &Path, candidate: &Path) -> Result<PathBuf> {
    let root = std::fs::canonicalize(root)
        .map_err(|e| anyhow!("Template root {} is unusable: {}", root.display(), e))?;
    let resolved = std::fs::canonicalize(candidate)?;

    if !resolved.starts_with(&root) {
        return Err(anyhow!(
            "{} resolves outside of {}",
            candidate.display(),
            root.display()
        ));
    }

    Ok(resolved)
}
